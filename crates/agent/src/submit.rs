use async_trait::async_trait;
use loanbot_core::{ApplicationPayload, ScoringError, ScoringResult};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::protocol::{Dispatcher, Event, Tracker};
use crate::registry::Action;
use crate::replies::{
    headline, ReplyTemplates, FOLLOW_UP_MESSAGE, SERVICE_UNAVAILABLE_MESSAGE,
};
use crate::scoring::{HttpScoringClient, ScoringClient};

pub const SUBMIT_ACTION: &str = "action_submit_loan_application";

/// Sends the collected slots to the scoring service and relays its decision.
///
/// Whatever goes wrong with the scoring call, the user gets the same
/// fallback reply and the follow-up offer; nothing is retried.
pub struct SubmitLoanApplication<C = HttpScoringClient> {
    client: C,
    replies: ReplyTemplates,
}

impl<C> SubmitLoanApplication<C>
where
    C: ScoringClient,
{
    pub fn new(client: C, replies: ReplyTemplates) -> Self {
        Self { client, replies }
    }

    pub async fn submit(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        let correlation_id = Uuid::new_v4();
        let payload = ApplicationPayload::from_slots(tracker.current_slot_values());
        info!(
            event_name = "action.submit.start",
            correlation_id = %correlation_id,
            sender_id = %tracker.sender_id,
            slot_count = payload.len(),
            "submitting application for scoring"
        );

        let outcome = self.client.score(&payload).await;
        match &outcome {
            Ok(result) => info!(
                event_name = "action.submit.scored",
                correlation_id = %correlation_id,
                eligibility = result.eligibility.as_str(),
                score = ?result.score,
                "scoring service returned a decision"
            ),
            Err(scoring_error) => warn!(
                event_name = "action.submit.scoring_failed",
                correlation_id = %correlation_id,
                error_class = scoring_error.class(),
                error = %scoring_error,
                "scoring service unavailable, sending fallback reply"
            ),
        }

        dispatcher.utter_text(self.reply_for(&outcome));
        dispatcher.utter_text(FOLLOW_UP_MESSAGE);
        Vec::new()
    }

    fn reply_for(&self, outcome: &Result<ScoringResult, ScoringError>) -> String {
        match outcome {
            Ok(result) => self.replies.decision(result).unwrap_or_else(|render_error| {
                error!(
                    event_name = "action.submit.render_failed",
                    error = %render_error,
                    "decision template failed to render"
                );
                headline(result.eligibility).to_string()
            }),
            Err(_) => SERVICE_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

#[async_trait]
impl<C> Action for SubmitLoanApplication<C>
where
    C: ScoringClient + 'static,
{
    fn name(&self) -> &'static str {
        SUBMIT_ACTION
    }

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        self.submit(dispatcher, tracker).await
    }
}
