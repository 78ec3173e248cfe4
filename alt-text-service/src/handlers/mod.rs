//! HTTP handlers for the alt-text service.

pub mod alt_text;
pub mod health;

pub use alt_text::generate_alt_text;
pub use health::{health_check, liveness};
