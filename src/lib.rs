#![doc(test(attr(deny(warnings))))]

//! Bill Planner offers the bill ledger, CSV persistence, and work-hours
//! planning primitives behind the interactive `bill_planner_cli` shell.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod solver;
pub mod storage;
pub mod timesource;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bill Planner tracing initialized.");
    });
}
