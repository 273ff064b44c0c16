use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Scalar value carried by one configuration entry.
///
/// Values keep their natural type in memory and render deterministically when
/// a deck is serialized: integers without a decimal point, floats with the
/// shortest digit string that parses back to the same value (always including
/// a decimal point), strings as bare text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer valued parameter (switches, grid sizes, mode tags).
    Int(i64),
    /// Floating point parameter (times, couplings, windows).
    Float(f64),
    /// Bare string parameter (file names, directory names).
    Text(String),
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(value) => write!(f, "{value}"),
            // The Debug form of f64 is the shortest representation that
            // round-trips, and plain magnitudes keep their decimal point
            // (40.0, not 40).
            ParamValue::Float(value) => write!(f, "{value:?}"),
            ParamValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}
