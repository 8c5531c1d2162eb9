//! Wire types shared with the conversational host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only view of the conversation the host passes with every call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub slots: Map<String, Value>,
    /// The host's event log for this conversation, oldest first.
    #[serde(default)]
    pub events: Vec<Value>,
}

impl Tracker {
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self { sender_id: sender_id.into(), slots: Map::new(), events: Vec::new() }
    }

    pub fn from_slots(sender_id: impl Into<String>, slots: Map<String, Value>) -> Self {
        Self { slots, ..Self::new(sender_id) }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// Records a user message, starting a new turn.
    pub fn with_user_message(mut self, text: impl Into<String>) -> Self {
        self.events.push(serde_json::json!({"event": "user", "text": text.into()}));
        self
    }

    /// Sets a slot the way the host does when it fills one from user input:
    /// stored value plus a `slot` event in the log.
    pub fn with_slot_event(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        self.events.push(serde_json::json!({"event": "slot", "name": name, "value": value}));
        self.slots.insert(name, value);
        self
    }

    /// Slots set since the latest user message, with the last value each
    /// one was given.
    pub fn slots_set_this_turn(&self) -> Map<String, Value> {
        let mut changed = Map::new();
        for event in self.events.iter().rev() {
            match event.get("event").and_then(Value::as_str) {
                Some("user") => break,
                Some("slot") => {
                    if let Some(name) = event.get("name").and_then(Value::as_str) {
                        let value = event.get("value").cloned().unwrap_or(Value::Null);
                        changed.entry(name.to_string()).or_insert(value);
                    }
                }
                _ => {}
            }
        }
        changed
    }

    /// A slot holding `null` counts as unset.
    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).filter(|value| !value.is_null())
    }

    pub fn current_slot_values(&self) -> &Map<String, Value> {
        &self.slots
    }
}

/// State changes an action asks the host to apply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    #[serde(rename = "slot")]
    SlotSet { name: String, value: Value },
    #[serde(rename = "restart")]
    Restarted,
}

impl Event {
    pub fn slot(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::SlotSet { name: name.into(), value: value.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BotMessage {
    Text { text: String },
    /// A response template the host renders itself.
    Template { response: String },
}

/// Collects the messages an action sends back to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatcher {
    messages: Vec<BotMessage>,
}

impl Dispatcher {
    pub fn utter_text(&mut self, text: impl Into<String>) {
        self.messages.push(BotMessage::Text { text: text.into() });
    }

    pub fn utter_template(&mut self, response: impl Into<String>) {
        self.messages.push(BotMessage::Template { response: response.into() });
    }

    pub fn messages(&self) -> &[BotMessage] {
        &self.messages
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|message| match message {
                BotMessage::Text { text } => Some(text.as_str()),
                BotMessage::Template { .. } => None,
            })
            .collect()
    }

    pub fn into_messages(self) -> Vec<BotMessage> {
        self.messages
    }
}

/// Body of a host request to run one action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    pub domain: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}
