//! Core domain + application logic for the Discord → Telegram relay.
//!
//! This crate is intentionally framework-agnostic. Discord and Telegram live
//! behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod mapping;
pub mod messaging;
pub mod relay;

pub use errors::{Error, Result};
