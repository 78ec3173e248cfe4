//! Alt-text relay: accepts an image upload and asks a hosted multimodal model
//! for a short accessibility description.

pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;
