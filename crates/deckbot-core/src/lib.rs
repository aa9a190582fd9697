//! Core records for deckbot
//!
//! This crate defines the company and metric records fetched from the Databook
//! API and the error type shared by the other deckbot crates.

pub mod company;
pub mod error;
pub mod metric;

pub use company::{Company, CompanyRef, LatestRevenue, QuarterRef};
pub use error::{Error, Result};
pub use metric::{ChartBlock, CompanySeries, DataPoint, MetricDetail, MetricRef};
