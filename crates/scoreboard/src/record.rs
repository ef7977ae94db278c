use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::GameMode;
use crate::xlog::XlogValue;

/// Provenance supplied by the caller, never read from the log itself
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngestContext {
    pub server: String,
    pub variant: String,
}

impl IngestContext {
    pub fn new<S: Into<String>, V: Into<String>>(server: S, variant: V) -> Self {
        Self {
            server: server.into(),
            variant: variant.into(),
        }
    }
}

/// A validated game, ready to be persisted.
///
/// Timestamps serialize as Unix seconds and durations as whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub server: String,
    pub variant: String,
    pub version: String,
    pub name: String,
    pub role: String,
    pub race: Option<String>,
    pub gender: Option<String>,
    pub align: Option<String>,
    pub gender0: Option<String>,
    pub align0: Option<String>,
    pub points: Option<i64>,
    pub turns: i64,
    pub deathdnum: Option<i64>,
    pub deathlev: Option<i64>,
    pub maxlvl: Option<i64>,
    pub hp: Option<i64>,
    pub maxhp: Option<i64>,
    pub deaths: Option<i64>,
    pub deathdate: Option<i64>,
    pub birthdate: Option<i64>,
    pub uid: Option<i64>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub starttime: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub endtime: DateTime<Utc>,
    /// endtime - starttime
    #[serde(with = "duration_secs")]
    pub wallclock: TimeDelta,
    /// Active play time, never more than `wallclock`
    #[serde(with = "duration_secs")]
    pub realtime: TimeDelta,
    pub death: String,
    #[serde(rename = "while")]
    pub while_reason: Option<String>,
    pub mode: Option<GameMode>,
    pub bonesless: bool,
    pub won: bool,
    /// Comma-joined conduct labels
    pub conducts: String,
    pub nconducts: usize,
    /// Comma-joined achievement labels
    pub achievements: String,
    /// xlog fields without a dedicated column
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, XlogValue>,
}

impl GameRecord {
    /// Role, race, gender and alignment joined with `-`, skipping empty parts
    pub fn character(&self) -> String {
        [
            Some(self.role.as_str()),
            self.race.as_deref(),
            self.gender.as_deref(),
            self.align.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
    }

    /// `deathlev/maxlvl`
    pub fn dlvl(&self) -> String {
        format!("{}/{}", or_unknown(self.deathlev), or_unknown(self.maxlvl))
    }

    /// `hp/maxhp`
    pub fn hit_points(&self) -> String {
        format!("{}/{}", or_unknown(self.hp), or_unknown(self.maxhp))
    }

    pub fn conduct_list(&self) -> impl Iterator<Item = &str> {
        split_labels(&self.conducts)
    }

    pub fn achievement_list(&self) -> impl Iterator<Item = &str> {
        split_labels(&self.achievements)
    }
}

fn or_unknown(value: Option<i64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

fn split_labels(joined: &str) -> impl Iterator<Item = &str> {
    joined.split(',').filter(|s| !s.is_empty())
}

mod duration_secs {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let secs = i64::deserialize(deserializer)?;
        TimeDelta::try_seconds(secs)
            .ok_or_else(|| serde::de::Error::custom(format!("duration out of range: {}", secs)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_record() -> GameRecord {
        GameRecord {
            server: "hdf".to_string(),
            variant: "tnnt".to_string(),
            version: "3.6.6".to_string(),
            name: "Foo".to_string(),
            role: "Val".to_string(),
            race: Some("Hum".to_string()),
            gender: Some("Fem".to_string()),
            align: Some("Neu".to_string()),
            gender0: Some("Fem".to_string()),
            align0: Some("Neu".to_string()),
            points: Some(2_500_000),
            turns: 40_000,
            deathdnum: Some(7),
            deathlev: Some(-5),
            maxlvl: Some(53),
            hp: Some(300),
            maxhp: Some(350),
            deaths: Some(0),
            deathdate: Some(20210806),
            birthdate: Some(20210801),
            uid: Some(5),
            starttime: DateTime::from_timestamp(1_628_000_000, 0).unwrap(),
            endtime: DateTime::from_timestamp(1_628_100_000, 0).unwrap(),
            wallclock: TimeDelta::seconds(100_000),
            realtime: TimeDelta::seconds(50_000),
            death: "ascended".to_string(),
            while_reason: None,
            mode: Some(GameMode::Normal),
            bonesless: false,
            won: true,
            conducts: "Foodless,Atheist".to_string(),
            nconducts: 2,
            achievements: "ascended,blind".to_string(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_character_skips_missing_parts() {
        let mut record = sample_record();
        assert_eq!(record.character(), "Val-Hum-Fem-Neu");
        record.gender = None;
        record.align = Some(String::new());
        assert_eq!(record.character(), "Val-Hum");
    }

    #[test]
    fn test_dlvl_and_hit_points() {
        let mut record = sample_record();
        assert_eq!(record.dlvl(), "-5/53");
        assert_eq!(record.hit_points(), "300/350");
        record.maxhp = None;
        assert_eq!(record.hit_points(), "300/?");
    }

    #[test]
    fn test_label_lists() {
        let mut record = sample_record();
        assert_eq!(record.conduct_list().collect::<Vec<_>>(), vec!["Foodless", "Atheist"]);
        record.conducts.clear();
        assert_eq!(record.conduct_list().count(), 0);
        assert_eq!(record.achievement_list().count(), 2);
    }

    #[test]
    fn test_serializes_seconds() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["starttime"], 1_628_000_000);
        assert_eq!(json["wallclock"], 100_000);
        assert_eq!(json["mode"], "normal");
        assert_eq!(json["while"], serde_json::Value::Null);
        assert!(json.get("extra").is_none());

        let back: GameRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample_record());
    }
}
