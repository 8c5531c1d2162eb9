use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Form slots that go through a normalizer before they reach the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Age,
    AnnualSalary,
    CreditUtilization,
}

impl SlotName {
    pub const ALL: [SlotName; 3] = [Self::Age, Self::AnnualSalary, Self::CreditUtilization];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::AnnualSalary => "annual_salary",
            Self::CreditUtilization => "credit_utilization",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSlot(pub String);

impl fmt::Display for UnknownSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown slot `{}` (expected age|annual_salary|credit_utilization)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSlot {}

impl std::str::FromStr for SlotName {
    type Err = UnknownSlot;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "age" => Ok(Self::Age),
            "annual_salary" => Ok(Self::AnnualSalary),
            "credit_utilization" => Ok(Self::CreditUtilization),
            other => Err(UnknownSlot(other.to_string())),
        }
    }
}

/// A slot value as the host hands it over, before any parsing.
///
/// Hosts send whatever the user typed or whatever an earlier turn stored,
/// so the shape is only known at runtime. Every variant renders to text
/// with [`RawValue::to_text`] and normalizers only ever parse that text.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Other(Value),
}

impl RawValue {
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            // whole floats keep their trailing `.0` so `500000.0` renders as stored
            Self::Float(value) if is_whole(*value) => format!("{value:.1}"),
            Self::Float(value) => value.to_string(),
            Self::Other(value) => value.to_string(),
        }
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Self::Integer(integer)
                } else if let Some(float) = number.as_f64() {
                    Self::Float(float)
                } else {
                    Self::Other(Value::Number(number))
                }
            }
            other => Self::Other(other),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A value that passed its normalizer and may be stored in the slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotValue {
    Integer(i64),
    Float(f64),
}

impl SlotValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Integer(value) => *value as f64,
            Self::Float(value) => *value,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Integer(value) => Value::from(*value),
            Self::Float(value) => Value::from(*value),
        }
    }
}
