//! Error types shared across the bot

pub mod bot_error;

pub use bot_error::*;
