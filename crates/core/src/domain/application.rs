use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ScoringError;

/// Request body sent to the scoring service.
///
/// Every slot the host currently tracks is copied over as-is, unset slots
/// included, so the scoring model sees exactly what the conversation
/// collected.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApplicationPayload(Map<String, Value>);

impl ApplicationPayload {
    pub fn from_slots(slots: &Map<String, Value>) -> Self {
        Self(slots.clone())
    }

    pub fn get(&self, slot: &str) -> Option<&Value> {
        self.0.get(slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    NotEligible,
    Unknown,
}

impl Eligibility {
    /// Labels other than the two decisions, including non-string values,
    /// count as `Unknown`.
    pub fn from_label(label: Option<&Value>) -> Self {
        match label.and_then(Value::as_str) {
            Some("eligible") => Self::Eligible,
            Some("not_eligible") => Self::NotEligible,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::NotEligible => "not_eligible",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoringResult {
    pub eligibility: Eligibility,
    pub score: Option<f64>,
}

impl ScoringResult {
    /// Reads a scoring response body.
    ///
    /// A missing `eligibility` reads as unknown and a missing or null
    /// `score` reads as absent. The score only matters for a definite
    /// decision, so an unknown outcome drops it unread. A body that is not
    /// an object, or a decision whose `score` is not a number, is malformed.
    pub fn from_json(body: &Value) -> Result<Self, ScoringError> {
        let fields = body.as_object().ok_or_else(|| {
            ScoringError::MalformedBody("response body is not a JSON object".to_string())
        })?;

        let eligibility = Eligibility::from_label(fields.get("eligibility"));
        if eligibility == Eligibility::Unknown {
            return Ok(Self { eligibility, score: None });
        }

        let score = match fields.get("score") {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => number.as_f64(),
            Some(other) => {
                return Err(ScoringError::MalformedBody(format!(
                    "score must be numeric, got `{other}`"
                )))
            }
        };

        Ok(Self { eligibility, score })
    }

    /// Score as a whole percentage, rounding halves to even.
    ///
    /// A score whose percentage does not fit an `i64` yields no confidence
    /// rather than a clamped one.
    pub fn confidence_pct(&self) -> Option<i64> {
        let pct = (self.score? * 100.0).round_ties_even();
        if !pct.is_finite() || pct < i64::MIN as f64 || pct >= i64::MAX as f64 {
            return None;
        }
        Some(pct as i64)
    }
}
