//! `valocoach` library crate.
//!
//! Reads a post-match scoreboard screenshot, extracts the player's combat
//! score, kills, deaths and assists, and turns them into a coaching verdict.
//!
//! ```text
//! image bytes ─▶ ocr::preprocessing ─▶ ocr::detection ─▶ ocr::text_extraction
//!                                                            │
//!                                    report::MatchReport ◀── stats::{metrics, verdict}
//! ```
//!
//! The binary (`valocoach`) is a thin wrapper; free-form coaching advice
//! from an external model lives in `advice` and never feeds back into the
//! extracted stats.

pub mod advice;
pub mod config;
pub mod error;
pub mod logging;
pub mod ocr;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod utils;

pub use error::{AdviceError, ConfigError, OcrError, PipelineError};
pub use pipeline::{analyze_text, ScanOutcome, ScoreboardPipeline};
pub use report::MatchReport;
pub use stats::{DerivedMetrics, StatRecord, VerdictCategory};
