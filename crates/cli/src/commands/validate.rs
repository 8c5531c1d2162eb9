use loanbot_agent::form::validate_slot;
use loanbot_agent::protocol::{Dispatcher, Tracker};
use loanbot_core::{RawValue, SlotName};
use serde::Serialize;
use serde_json::Value;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct ValidateReport<'a> {
    command: &'static str,
    status: &'static str,
    slot: &'static str,
    input: &'a str,
    value: Value,
    messages: Vec<&'a str>,
}

/// Exit code 0 when the value is stored, 1 when the slot would be cleared,
/// 2 for an unknown slot name.
pub fn run(slot: &str, raw: &str) -> CommandResult {
    let slot = match slot.parse::<SlotName>() {
        Ok(slot) => slot,
        Err(error) => {
            return CommandResult::failure("validate", "unknown_slot", error.to_string(), 2)
        }
    };

    let mut dispatcher = Dispatcher::default();
    let update = validate_slot(slot, &RawValue::from(raw), &mut dispatcher, &Tracker::new("cli"));

    let report = ValidateReport {
        command: "validate",
        status: if update.is_cleared() { "rejected" } else { "ok" },
        slot: slot.as_str(),
        input: raw,
        value: update.value.map(|value| value.to_json()).unwrap_or(Value::Null),
        messages: dispatcher.texts(),
    };
    CommandResult::report("validate", if update.is_cleared() { 1 } else { 0 }, &report)
}
