//! Databook data access for deckbot
//!
//! This crate fetches the records a factpack is built from:
//!
//! - the company list (or the built-in offline sample list)
//! - company overviews
//! - the metrics offered for a company and their chart data
//! - external assets such as company logos
//!
//! Requests are authenticated with a bearer token obtained from the login
//! credentials in [`DatabookConfig`]. An expired token is refreshed and the
//! request retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use deckbot_api::{CompanySource, DatabookClient, DatabookConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DatabookConfig::load(None)?;
//!     let client = DatabookClient::new(config)?;
//!
//!     for company in client.list_companies().await? {
//!         println!("{} - {}", company.id, company.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod samples;
pub mod source;

pub use client::DatabookClient;
pub use config::{DatabookConfig, DatabookConfigBuilder};
pub use error::{ApiError, Result};
pub use samples::sample_companies;
pub use source::CompanySource;
