// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email list purification
//!
//! Pulls email addresses out of messy delimited text, free text or
//! spreadsheets, normalizes and deduplicates them, classifies each one
//! against a configurable rule set and exports the outcome.
//!
//! # Pipeline
//!
//! - [`Ingestor`] reads a source and returns unique canonical addresses
//! - [`Runner`] classifies them in order, reporting progress
//! - [`Summary`] aggregates the [`ProcessResult`]
//! - [`Exporter`] writes the clean list and the detailed report
//!
//! # Example
//!
//! ```rust
//! use email_purify::{Ingestor, Runner, Summary, ValidationRules};
//!
//! let addresses = Ingestor::default()
//!     .ingest_file("list.csv", b"a@b.com, ADMIN@company.com ; a@b.com")
//!     .unwrap();
//! assert_eq!(addresses, ["a@b.com", "admin@company.com"]);
//!
//! let result = tokio_test::block_on(
//!     Runner::default().run(&addresses, &ValidationRules::default()),
//! )
//! .unwrap();
//! let summary = Summary::from_result(&result);
//! println!("{summary}");
//! ```

mod catalog;
mod classify;
mod error;
mod export;
mod extract;
mod ingest;
mod normalize;
mod runner;
mod summary;
mod types;

pub use catalog::Catalog;
pub use classify::Classifier;
pub use error::{PurifyError, Result};
pub use export::*;
pub use extract::extract_tokens;
pub use ingest::*;
pub use normalize::{Deduplicator, Normalizer, clean};
pub use runner::*;
pub use summary::*;
pub use types::*;
