//! deckbot command-line application
//!
//! Picks a company (interactively or by id), fetches its records from a
//! [`deckbot_api::CompanySource`] and exports the factpack.

pub mod app;
pub mod picker;

pub use app::{Deckbot, RunOptions};
pub use picker::{CompanyPicker, PickerError};
