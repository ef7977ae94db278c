use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Known xlog keys.
///
/// Keys not listed here still flow through a [`RawLogEntry`](super::RawLogEntry)
/// and end up in [`GameRecord::extra`](crate::record::GameRecord::extra).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Version,
    Points,
    Deathdnum,
    Deathlev,
    Maxlvl,
    Hp,
    Maxhp,
    Deaths,
    Deathdate,
    Birthdate,
    Uid,
    Role,
    Race,
    Gender,
    Align,
    Name,
    Death,
    Conduct,
    Turns,
    Achieve,
    Realtime,
    Starttime,
    Endtime,
    Gender0,
    Align0,
    Flags,
    While,
    Tnntachieve0,
    Tnntachieve1,
    Tnntachieve2,
    Tnntachieve3,
}

/// How the validator treats a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Must be present before any derivation runs
    Required,
    /// Copied onto the record when present
    Optional,
    /// Raw bitmask input, replaced by derived labels and never persisted
    Stripped,
}

impl Field {
    /// Checked in this order; the first absent one is reported.
    pub const REQUIRED: [Field; 7] = [
        Field::Version,
        Field::Name,
        Field::Death,
        Field::Turns,
        Field::Role,
        Field::Starttime,
        Field::Endtime,
    ];

    pub const STRIPPED: [Field; 7] = [
        Field::Flags,
        Field::Conduct,
        Field::Achieve,
        Field::Tnntachieve0,
        Field::Tnntachieve1,
        Field::Tnntachieve2,
        Field::Tnntachieve3,
    ];

    /// Bitmask fields decoded into conduct labels, in output order
    pub const CONDUCT_SOURCES: [Field; 2] = [Field::Conduct, Field::Achieve];

    /// Bitmask fields decoded into achievement labels, in output order
    pub const ACHIEVEMENT_SOURCES: [Field; 5] = [
        Field::Achieve,
        Field::Tnntachieve0,
        Field::Tnntachieve1,
        Field::Tnntachieve2,
        Field::Tnntachieve3,
    ];

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn role(&self) -> FieldRole {
        if Self::REQUIRED.contains(self) {
            FieldRole::Required
        } else if Self::STRIPPED.contains(self) {
            FieldRole::Stripped
        } else {
            FieldRole::Optional
        }
    }

    pub fn is_required(&self) -> bool {
        self.role() == FieldRole::Required
    }

    pub fn is_stripped(&self) -> bool {
        self.role() == FieldRole::Stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::iter() {
            assert_eq!(Field::from_str(field.name()).unwrap(), field);
        }
        assert_eq!(Field::Tnntachieve2.name(), "tnntachieve2");
        assert_eq!(Field::Align0.to_string(), "align0");
        assert!(Field::from_str("server").is_err());
    }

    #[test]
    fn test_field_roles() {
        assert_eq!(Field::Role.role(), FieldRole::Required);
        assert_eq!(Field::Achieve.role(), FieldRole::Stripped);
        assert_eq!(Field::Realtime.role(), FieldRole::Optional);
        assert!(Field::REQUIRED.iter().all(|f| !f.is_stripped()));
    }

    #[test]
    fn test_decoded_sources_are_stripped() {
        assert!(Field::CONDUCT_SOURCES.iter().all(Field::is_stripped));
        assert!(Field::ACHIEVEMENT_SOURCES.iter().all(Field::is_stripped));
    }
}
