//! Core library for toxiscan.
//!
//! Counts word frequencies in free-text comments, flags words found in a
//! toxic-word dictionary, ranks words by frequency and renders reports.
//!
//! # Modules
//!
//! - [`normalize`] - Token splitting and canonical word form
//! - [`dictionary`] - Toxic-word dictionary
//! - [`table`] - Word table with insert-or-increment updates
//! - [`rank`] - Stable descending-frequency ranking
//! - [`report`] - Statistics and text rendering
//! - [`session`] - Analysis session tying the above together
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use toxiscan_core::{AnalysisSession, Dictionary, Limits, report};
//!
//! let dictionary = Dictionary::from_text("stupid idiot", None);
//! let mut session = AnalysisSession::new(dictionary, Limits::default());
//! session.load_text("You are STUPID!! stupid idiot idiot idiot nice");
//!
//! let ranking = session.ranking();
//! assert_eq!(ranking[0].word, "idiot");
//! println!("{}", report::render_report_document(&ranking, 20));
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod session;
pub mod table;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use dictionary::Dictionary;
pub use error::{ConfigError, ConfigResult, SourceError, SourceResult};
pub use normalize::normalize;
pub use rank::rank;
pub use report::Summary;
pub use session::{AnalysisReport, AnalysisSession, Limits, LoadSummary};
pub use table::{Update, WordRecord, WordTable};

/// Default maximum size of a comment file, in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
