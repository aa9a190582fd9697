//! Factpack composition for deckbot
//!
//! Turns a company overview and its revenue metric into a three-slide deck
//! and writes it as a `.pptx` package.
//!
//! ```no_run
//! use deckbot_deck::{Factpack, PptxWriter};
//! # fn run(company: &deckbot_core::Company, revenue: &deckbot_core::MetricDetail) -> deckbot_deck::Result<()> {
//! let today = chrono::Local::now().date_naive();
//! let deck = Factpack::new(company, revenue, today).compose()?;
//! PptxWriter::new().save(&deck, std::path::Path::new("exports/Apple.pptx"))?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod chart;
pub mod error;
pub mod image;
pub mod model;
pub mod pptx;
pub mod sentences;
pub mod slides;
pub mod units;

pub use analysis::{LastThreeYears, PeerRanking, Quartile, Trend};
pub use error::{DeckError, Result};
pub use self::image::{Image, ImageFormat};
pub use model::{Deck, Slide};
pub use pptx::PptxWriter;
pub use sentences::{SentenceSplitter, split_into_sentences};
pub use slides::Factpack;
