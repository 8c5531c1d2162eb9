//! Slot normalizers.
//!
//! Each normalizer turns a raw host value into the typed value stored in
//! the slot, or a [`Rejection`] carrying the re-prompt shown to the user.
//! Raw values are rendered to text first and only that text is parsed.

use serde::Serialize;
use thiserror::Error;

use crate::domain::slot::{RawValue, SlotName, SlotValue};

pub const MINIMUM_AGE: i64 = 18;
pub const MINIMUM_ANNUAL_SALARY: f64 = 5_000.0;
pub const CREDIT_UTILIZATION_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

pub const AGE_PARSE_MESSAGE: &str = "Please enter a valid age (numbers only).";
pub const AGE_RANGE_MESSAGE: &str = "You must be at least 18 years old to apply for a loan.";
pub const SALARY_PARSE_MESSAGE: &str =
    "Please enter your salary as a number (e.g. 500000 or 5LPA).";
pub const SALARY_RANGE_MESSAGE: &str = "The salary looks too low. Please confirm.";
pub const CREDIT_UTILIZATION_PARSE_MESSAGE: &str =
    "Please give credit utilization as a percentage, e.g. 45 or 45%.";
pub const CREDIT_UTILIZATION_RANGE_MESSAGE: &str =
    "Credit utilization must be between 0 and 100 percent.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// The text is not in any recognised numeric shape.
    Parse,
    /// The text parsed but breaks the slot's domain constraint.
    Range,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize)]
#[error("{slot} rejected ({kind:?}): {message}")]
pub struct Rejection {
    pub slot: SlotName,
    pub kind: RejectionKind,
    pub message: &'static str,
}

impl Rejection {
    fn parse(slot: SlotName, message: &'static str) -> Self {
        Self { slot, kind: RejectionKind::Parse, message }
    }

    fn range(slot: SlotName, message: &'static str) -> Self {
        Self { slot, kind: RejectionKind::Range, message }
    }
}

pub fn normalize(slot: SlotName, raw: &RawValue) -> Result<SlotValue, Rejection> {
    match slot {
        SlotName::Age => normalize_age(raw).map(SlotValue::Integer),
        SlotName::AnnualSalary => normalize_annual_salary(raw).map(SlotValue::Float),
        SlotName::CreditUtilization => normalize_credit_utilization(raw).map(SlotValue::Float),
    }
}

/// Ages are whole numbers that fit an `i64`; longer digit strings are
/// rejected with the parse message.
pub fn normalize_age(raw: &RawValue) -> Result<i64, Rejection> {
    let age = raw
        .to_text()
        .trim()
        .parse::<i64>()
        .map_err(|_| Rejection::parse(SlotName::Age, AGE_PARSE_MESSAGE))?;

    if age < MINIMUM_AGE {
        return Err(Rejection::range(SlotName::Age, AGE_RANGE_MESSAGE));
    }
    Ok(age)
}

/// Accepts plain amounts (`500000`), lakhs (`5LPA`, `5 lpa`, `5l`) and
/// thousands (`50k`).
///
/// Any text containing an `l` is read as lakhs, whether or not the `l` is
/// part of a unit suffix, and the `k` check only runs when no `l` is
/// present.
pub fn normalize_annual_salary(raw: &RawValue) -> Result<f64, Rejection> {
    let lowered = raw.to_text().to_lowercase().replace(',', "");
    let text = lowered.trim();

    let amount = if text.contains('l') {
        parse_finite(&text.replace('l', "").replace("pa", "")).map(|lakhs| lakhs * LAKH)
    } else if text.contains('k') {
        parse_finite(&text.replace('k', "")).map(|thousands| thousands * THOUSAND)
    } else {
        parse_finite(text)
    }
    .ok_or_else(|| Rejection::parse(SlotName::AnnualSalary, SALARY_PARSE_MESSAGE))?;

    if amount < MINIMUM_ANNUAL_SALARY {
        return Err(Rejection::range(SlotName::AnnualSalary, SALARY_RANGE_MESSAGE));
    }
    Ok(amount)
}

pub fn normalize_credit_utilization(raw: &RawValue) -> Result<f64, Rejection> {
    let utilization = parse_finite(&raw.to_text().replace('%', "")).ok_or_else(|| {
        Rejection::parse(SlotName::CreditUtilization, CREDIT_UTILIZATION_PARSE_MESSAGE)
    })?;

    if !CREDIT_UTILIZATION_RANGE.contains(&utilization) {
        return Err(Rejection::range(SlotName::CreditUtilization, CREDIT_UTILIZATION_RANGE_MESSAGE));
    }
    Ok(utilization)
}

// `inf` and `nan` parse as f64 but have no JSON encoding, so they count as
// unparseable.
fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
