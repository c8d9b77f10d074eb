//! linkscan — a matching engine for detecting URLs, email addresses,
//! hashtags, mentions, and phone numbers in plain text.
//!
//! This crate root wires together the modules present in `src/`. Character
//! membership is decided exclusively in [`charclass`]; named limits live in
//! [`constants`]; construction-time configuration errors in [`error`].

mod charclass;
pub mod constants;
pub mod error;

pub use error::ConfigError;
