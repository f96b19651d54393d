//! Configuration management for the warm-up bot

pub mod settings;

pub use settings::*;
