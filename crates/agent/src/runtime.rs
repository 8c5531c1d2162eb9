use loanbot_core::config::ScoringConfig;
use loanbot_core::ApplicationError;
use tracing::info;

use crate::form::ValidateLoanApplicationForm;
use crate::protocol::{ActionCall, ActionResponse, Dispatcher};
use crate::registry::ActionRegistry;
use crate::replies::ReplyTemplates;
use crate::restart::RestartSession;
use crate::scoring::HttpScoringClient;
use crate::submit::SubmitLoanApplication;

/// Routes host calls to registered actions.
#[derive(Default)]
pub struct ActionRuntime {
    registry: ActionRegistry,
}

impl ActionRuntime {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    /// Form validation, submission and restart, wired to the configured
    /// scoring service.
    pub fn loan_application(scoring: &ScoringConfig) -> Result<Self, ApplicationError> {
        let replies = ReplyTemplates::new().map_err(|error| {
            ApplicationError::Configuration(format!("reply templates failed to compile: {error}"))
        })?;

        let mut registry = ActionRegistry::default();
        registry.register(ValidateLoanApplicationForm);
        registry.register(SubmitLoanApplication::new(
            HttpScoringClient::from_config(scoring),
            replies,
        ));
        registry.register(RestartSession);
        Ok(Self::new(registry))
    }

    pub fn action_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub async fn handle(&self, call: &ActionCall) -> Result<ActionResponse, ApplicationError> {
        let action_name = call.next_action.trim();
        if action_name.is_empty() {
            return Err(ApplicationError::InvalidCall("next_action is empty".to_string()));
        }

        let action = self
            .registry
            .get(action_name)
            .ok_or_else(|| ApplicationError::UnknownAction(action_name.to_string()))?;

        info!(
            event_name = "action.run",
            action = action_name,
            sender_id = %call.sender_id,
            "running action"
        );

        let mut dispatcher = Dispatcher::default();
        let events = action.run(&mut dispatcher, &call.tracker).await;
        Ok(ActionResponse { events, responses: dispatcher.into_messages() })
    }
}
