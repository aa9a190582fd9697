//! Shared utilities for deckbot
//!
//! This crate provides common functionality used across the deckbot workspace:
//! logging setup and configuration file loading.

pub mod config;
pub mod logging;

pub use config::{ConfigError, env_override, load_json, load_json_if_exists};
pub use logging::{DEFAULT_FILTER, LogFormat, init_tracing};
