//! Loanbot actions - the handlers a conversational host calls per turn
//!
//! The host owns dialogue, slot storage and rendering. This crate only:
//! - validates the loan form slots (`form`), clearing rejected ones
//! - submits the collected slots for scoring and relays the decision
//!   (`submit`, `scoring`, `replies`)
//! - restarts the conversation on request (`restart`)
//!
//! # Key Types
//!
//! - `ActionRuntime` - routes an `ActionCall` to a registered `Action`
//! - `ScoringClient` - seam for the remote scoring service
//! - `Dispatcher` - collects the messages an action sends back
//!
//! No action returns an error to the host. Bad input becomes a re-prompt and
//! a failed scoring call becomes a fallback reply.

pub mod form;
pub mod protocol;
pub mod registry;
pub mod replies;
pub mod restart;
pub mod runtime;
pub mod scoring;
pub mod submit;
