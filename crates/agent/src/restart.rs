use async_trait::async_trait;
use tracing::info;

use crate::protocol::{Dispatcher, Event, Tracker};
use crate::registry::Action;
use crate::replies::RESTARTED_RESPONSE;

pub const RESTART_ACTION: &str = "action_restart";

/// Confirms the restart and asks the host to drop the conversation state.
#[derive(Clone, Copy, Debug, Default)]
pub struct RestartSession;

#[async_trait]
impl Action for RestartSession {
    fn name(&self) -> &'static str {
        RESTART_ACTION
    }

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        info!(
            event_name = "action.restart",
            sender_id = %tracker.sender_id,
            "restarting conversation"
        );
        dispatcher.utter_template(RESTARTED_RESPONSE);
        vec![Event::Restarted]
    }
}
