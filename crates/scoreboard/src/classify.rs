use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::tables::FlagBits;

/// Game mode stored with a record.
///
/// Only `Normal`, `Explore` and `Wizard` are derived from xlog flags; the
/// other modes exist for records created elsewhere.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    #[default]
    Normal,
    Explore,
    Polyinit,
    Hah,
    Wizard,
}

impl GameMode {
    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

/// Wizard wins over explore; no flags means no mode.
pub fn derive_mode(flags: Option<u64>, bits: &FlagBits) -> Option<GameMode> {
    let flags = flags?;
    if flags & bits.wizard != 0 {
        Some(GameMode::Wizard)
    } else if flags & bits.explore != 0 {
        Some(GameMode::Explore)
    } else {
        Some(GameMode::Normal)
    }
}

pub fn derive_bonesless(flags: Option<u64>, bits: &FlagBits) -> bool {
    flags.is_some_and(|f| f & bits.bonesless != 0)
}

/// A game is won if the ascended achievement bit is set or the death reason is exactly "ascended"
pub fn derive_won(achieve: Option<u64>, death: &str, ascended_bit: u64) -> bool {
    achieve.is_some_and(|a| a & ascended_bit != 0) || death == "ascended"
}
