use loanbot_agent::protocol::{Dispatcher, Tracker};
use loanbot_agent::replies::ReplyTemplates;
use loanbot_agent::scoring::HttpScoringClient;
use loanbot_agent::submit::SubmitLoanApplication;
use loanbot_core::config::{AppConfig, LoadOptions};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct SubmitReport {
    command: &'static str,
    status: &'static str,
    scoring_url: String,
    payload: Map<String, Value>,
    messages: Vec<String>,
}

pub fn run(assignments: &[String]) -> CommandResult {
    let slots = match parse_assignments(assignments) {
        Ok(slots) => slots,
        Err(message) => return CommandResult::failure("submit", "usage", message, 2),
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("submit", "config_validation", error.to_string(), 2)
        }
    };

    let replies = match ReplyTemplates::new() {
        Ok(replies) => replies,
        Err(error) => return CommandResult::failure("submit", "templates", error.to_string(), 3),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => return CommandResult::failure("submit", "runtime", error.to_string(), 3),
    };

    let client = HttpScoringClient::from_config(&config.scoring);
    let action = SubmitLoanApplication::new(client, replies);
    let tracker = Tracker::from_slots("cli", slots);
    let mut dispatcher = Dispatcher::default();
    runtime.block_on(action.submit(&mut dispatcher, &tracker));

    let report = SubmitReport {
        command: "submit",
        status: "ok",
        scoring_url: config.scoring.url,
        payload: tracker.slots,
        messages: dispatcher.texts().into_iter().map(str::to_string).collect(),
    };
    CommandResult::report("submit", 0, &report)
}

/// Parses `slot=value` pairs. Values that read as JSON (numbers, `null`,
/// booleans, quoted strings) keep that type; anything else is sent as text.
pub fn parse_assignments(assignments: &[String]) -> Result<Map<String, Value>, String> {
    let mut slots = Map::new();
    for assignment in assignments {
        let Some((name, raw)) = assignment.split_once('=') else {
            return Err(format!("expected SLOT=VALUE, got `{assignment}`"));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("slot name is empty in `{assignment}`"));
        }

        let value = serde_json::from_str::<Value>(raw.trim())
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        slots.insert(name.to_string(), value);
    }
    Ok(slots)
}
