//! Core domain + application logic for the homework status bot.
//!
//! This crate is framework-agnostic. The Practicum HTTP client and the Telegram
//! bot live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod credentials;
pub mod domain;
pub mod errors;
pub mod homework;
pub mod logging;
pub mod notifier;
pub mod poller;
pub mod ports;

pub use errors::{Error, Result};
