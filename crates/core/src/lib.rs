//! Loanbot core - slot normalization and scoring domain model
//!
//! Everything here is synchronous and free of I/O apart from config
//! loading:
//! - **Slots** (`domain::slot`, `slots`) - raw host values, typed slot
//!   values and the normalizers that turn one into the other
//! - **Applications** (`domain::application`) - the payload sent to the
//!   scoring service and the decision it returns
//! - **Config** (`config`) - layered defaults, file, env and overrides
//! - **Errors** (`errors`) - scoring failures and the interface mapping used
//!   by the action server

pub mod config;
pub mod domain;
pub mod errors;
pub mod slots;

pub use domain::application::{ApplicationPayload, Eligibility, ScoringResult};
pub use domain::slot::{RawValue, SlotName, SlotValue};
pub use errors::{ApplicationError, InterfaceError, ScoringError};
pub use slots::{Rejection, RejectionKind};
