pub mod application;
pub mod slot;
