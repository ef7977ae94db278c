use std::fmt;

use serde::{Deserialize, Serialize};

/// A single xlog value after numeric auto-detection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XlogValue {
    Int(u64),
    Text(String),
}

impl XlogValue {
    /// Convert a raw token into an integer when it is a decimal or `0x` hex literal.
    ///
    /// Anything else, including literals too large for `u64`, stays text.
    pub fn convert(raw: &str) -> Self {
        match parse_int_literal(raw) {
            Some(value) => Self::Int(value),
            None => Self::Text(raw.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(s) => Some(s),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl fmt::Display for XlogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for XlogValue {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for XlogValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Parse `^[0-9]+$` as base 10 or `^0x[0-9a-fA-F]+$` as base 16.
///
/// The full unsigned 64-bit range is accepted so bitmasks with the top bit
/// set stay numeric.
pub fn parse_int_literal(raw: &str) -> Option<u64> {
    if let Some(hex) = raw.strip_prefix("0x") {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return u64::from_str_radix(hex, 16).ok();
    }
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_decimal_and_hex_agree() {
        assert_eq!(XlogValue::convert("42"), XlogValue::Int(42));
        assert_eq!(XlogValue::convert("0x2a"), XlogValue::Int(42));
        assert_eq!(XlogValue::convert("0x2A"), XlogValue::Int(42));
        assert_eq!(XlogValue::convert("0"), XlogValue::Int(0));
    }

    #[test]
    fn test_convert_keeps_text() {
        assert_eq!(XlogValue::convert("3.6.6"), XlogValue::Text("3.6.6".into()));
        assert_eq!(XlogValue::convert("-5"), XlogValue::Text("-5".into()));
        assert_eq!(XlogValue::convert("0x"), XlogValue::Text("0x".into()));
        assert_eq!(XlogValue::convert("0X1f"), XlogValue::Text("0X1f".into()));
        assert_eq!(XlogValue::convert("0xfg"), XlogValue::Text("0xfg".into()));
        assert_eq!(XlogValue::convert(""), XlogValue::Text(String::new()));
        assert_eq!(
            XlogValue::convert("killed by a jackal"),
            XlogValue::Text("killed by a jackal".into())
        );
    }

    #[test]
    fn test_convert_overflow_stays_text() {
        let huge = "99999999999999999999999";
        assert_eq!(XlogValue::convert(huge), XlogValue::Text(huge.into()));
        assert_eq!(
            XlogValue::convert("0xffffffff"),
            XlogValue::Int(0xffff_ffff)
        );
    }

    #[test]
    fn test_convert_top_bit_masks() {
        assert_eq!(
            XlogValue::convert("0x8000000000000000"),
            XlogValue::Int(1 << 63)
        );
        assert_eq!(
            XlogValue::convert("0xffffffffffffffff"),
            XlogValue::Int(u64::MAX)
        );
        assert_eq!(
            XlogValue::convert("18446744073709551615"),
            XlogValue::Int(u64::MAX)
        );
        let wider = "0x10000000000000000";
        assert_eq!(XlogValue::convert(wider), XlogValue::Text(wider.into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(XlogValue::Int(1234).to_string(), "1234");
        assert_eq!(XlogValue::from("Foo").to_string(), "Foo");
    }
}
