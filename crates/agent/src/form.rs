use async_trait::async_trait;
use loanbot_core::slots::{self, Rejection};
use loanbot_core::{RawValue, SlotName, SlotValue};
use serde_json::Value;
use tracing::debug;

use crate::protocol::{Dispatcher, Event, Tracker};
use crate::registry::Action;

pub const FORM_VALIDATION_ACTION: &str = "validate_loan_application_form";

/// Outcome of validating one slot: the value to store, or `None` to clear
/// the slot so the host asks again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotUpdate {
    pub slot: SlotName,
    pub value: Option<SlotValue>,
}

impl SlotUpdate {
    pub fn is_cleared(&self) -> bool {
        self.value.is_none()
    }

    pub fn into_event(self) -> Event {
        let value = self.value.map(|value| value.to_json()).unwrap_or(Value::Null);
        Event::slot(self.slot.as_str(), value)
    }
}

pub fn validate_age(raw: &RawValue, dispatcher: &mut Dispatcher, tracker: &Tracker) -> SlotUpdate {
    validate_slot(SlotName::Age, raw, dispatcher, tracker)
}

pub fn validate_annual_salary(
    raw: &RawValue,
    dispatcher: &mut Dispatcher,
    tracker: &Tracker,
) -> SlotUpdate {
    validate_slot(SlotName::AnnualSalary, raw, dispatcher, tracker)
}

pub fn validate_credit_utilization(
    raw: &RawValue,
    dispatcher: &mut Dispatcher,
    tracker: &Tracker,
) -> SlotUpdate {
    validate_slot(SlotName::CreditUtilization, raw, dispatcher, tracker)
}

/// Runs the slot's normalizer. A rejection dispatches exactly one message
/// and clears the slot; success dispatches nothing.
pub fn validate_slot(
    slot: SlotName,
    raw: &RawValue,
    dispatcher: &mut Dispatcher,
    tracker: &Tracker,
) -> SlotUpdate {
    match slots::normalize(slot, raw) {
        Ok(value) => SlotUpdate { slot, value: Some(value) },
        Err(rejection) => {
            log_rejection(&rejection, tracker);
            dispatcher.utter_text(rejection.message);
            SlotUpdate { slot, value: None }
        }
    }
}

fn log_rejection(rejection: &Rejection, tracker: &Tracker) {
    debug!(
        event_name = "action.form.slot_rejected",
        sender_id = %tracker.sender_id,
        slot = %rejection.slot,
        kind = ?rejection.kind,
        "slot value rejected"
    );
}

/// Validates the form slots the host set since the latest user message.
///
/// Slots filled on earlier turns were validated then and are left alone.
/// A slot set to `null` this turn is a clear, not user input, and is skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidateLoanApplicationForm;

#[async_trait]
impl Action for ValidateLoanApplicationForm {
    fn name(&self) -> &'static str {
        FORM_VALIDATION_ACTION
    }

    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event> {
        let changed = tracker.slots_set_this_turn();
        SlotName::ALL
            .into_iter()
            .filter_map(|slot| {
                let value = changed.get(slot.as_str()).filter(|value| !value.is_null())?;
                let raw = RawValue::from(value.clone());
                Some(validate_slot(slot, &raw, dispatcher, tracker).into_event())
            })
            .collect()
    }
}
