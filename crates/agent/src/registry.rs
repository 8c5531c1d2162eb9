use std::collections::HashMap;

use async_trait::async_trait;

use crate::protocol::{Dispatcher, Event, Tracker};

/// A named handler the host can invoke for one conversation turn.
///
/// Actions never fail towards the host: every error is turned into a user
/// message on the dispatcher.
#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;
    async fn run(&self, dispatcher: &mut Dispatcher, tracker: &Tracker) -> Vec<Event>;
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Box<dyn Action>>,
}

impl ActionRegistry {
    pub fn register<A>(&mut self, action: A)
    where
        A: Action + 'static,
    {
        self.actions.insert(action.name().to_string(), Box::new(action));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions.get(name).map(|action| action.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = self.actions.values().map(|action| action.name()).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
