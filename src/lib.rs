//! Batch pipeline over a snapshot of short-term-rental listings: load one
//! sheet, clean it, write grouped summaries, chart the busiest
//! neighbourhoods and print a few highlights.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod services;

pub use config::Config;
pub use error::{PipelineError, Result};
pub use models::{CleaningReport, SummaryKind};
pub use pipeline::{run, RunReport};
