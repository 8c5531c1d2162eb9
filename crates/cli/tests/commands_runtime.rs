use std::env;
use std::sync::{Mutex, OnceLock};

use loanbot_cli::commands::{config, submit, validate};
use serde_json::{json, Value};

const FALLBACK_REPLY: &str = "Sorry — we couldn't reach the eligibility service. Your details have been saved and will be processed by our team.";
const FOLLOW_UP: &str =
    "If you'd like, I can connect you to a human agent or start another check.";

#[test]
fn validate_stores_normalized_salary() {
    let result = validate::run("annual_salary", "5LPA");
    assert_eq!(result.exit_code, 0, "expected the value to be stored");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "validate");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["slot"], "annual_salary");
    assert_eq!(payload["value"], json!(500000.0));
    assert_eq!(payload["messages"], json!([]));
}

#[test]
fn validate_reports_rejection_with_reprompt() {
    let result = validate::run("age", "16");
    assert_eq!(result.exit_code, 1, "expected the slot to be cleared");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "rejected");
    assert_eq!(payload["value"], Value::Null);
    assert_eq!(
        payload["messages"],
        json!(["You must be at least 18 years old to apply for a loan."])
    );
}

#[test]
fn validate_rejects_unknown_slot_names() {
    let result = validate::run("loan_amount", "10000");
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "unknown_slot");
}

#[test]
fn submit_falls_back_when_scoring_service_is_unreachable() {
    with_env(&[("LOANBOT_SCORING_URL", "http://127.0.0.1:9/predict")], || {
        let result = submit::run(&[
            "age=30".to_string(),
            "annual_salary=500000".to_string(),
            "credit_utilization=40".to_string(),
        ]);
        assert_eq!(result.exit_code, 0, "scoring failures still produce a reply");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "submit");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["scoring_url"], "http://127.0.0.1:9/predict");
        assert_eq!(payload["payload"]["age"], json!(30));
        assert_eq!(payload["messages"], json!([FALLBACK_REPLY, FOLLOW_UP]));
    });
}

#[test]
fn submit_returns_config_failure_for_invalid_scoring_url() {
    with_env(&[("LOANBOT_SCORING_URL", "ftp://models/predict")], || {
        let result = submit::run(&["age=30".to_string()]);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn submit_rejects_malformed_assignments() {
    with_env(&[], || {
        let result = submit::run(&["age:30".to_string()]);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "usage");
    });
}

#[test]
fn config_attributes_sources_and_redacts_api_key() {
    with_env(
        &[
            ("ML_API_URL", "http://models.internal:5001/predict"),
            ("LOANBOT_SCORING_API_KEY", "sk-live-secret"),
        ],
        || {
            let output = config::run();

            assert!(output.contains(
                "scoring.url = http://models.internal:5001/predict (source: env (ML_API_URL))"
            ));
            assert!(output
                .contains("scoring.api_key = sk-*** (source: env (LOANBOT_SCORING_API_KEY))"));
            assert!(output.contains("scoring.timeout_secs = 10 (source: fixed)"));
            assert!(output.contains("server.port = 5055 (source: default)"));
            assert!(!output.contains("sk-live-secret"));
        },
    );
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "ML_API_URL",
        "LOANBOT_SCORING_URL",
        "LOANBOT_SCORING_API_KEY",
        "LOANBOT_SERVER_BIND_ADDRESS",
        "LOANBOT_SERVER_PORT",
        "LOANBOT_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "LOANBOT_LOGGING_LEVEL",
        "LOANBOT_LOGGING_FORMAT",
        "LOANBOT_LOG_LEVEL",
        "LOANBOT_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
