#![doc(test(attr(deny(warnings))))]

//! GoFinances core: decodes stored transactions, aggregates them into dashboard
//! highlights and per-category spending summaries, and formats the results for
//! the app screens.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{
    AmountPolicy, CategoryBreakdown, CategorySummary, Highlights, SummaryService,
};
pub use errors::{FinanceError, Result};

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    if utils::init_tracing() {
        tracing::info!(build = %utils::build_info::current().summary(), "GoFinances core tracing initialized.");
    }
}
