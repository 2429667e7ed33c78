#![doc(test(attr(deny(warnings))))]

//! Availability rule authoring core for the Coaster supplier tools: the
//! multi-step wizard state machine, per-step validation, the time-slot
//! editor, and the payload assembler for the booking backend's
//! availability-rule endpoints.

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod payload;
pub mod rules;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Availability core tracing initialized.");
    });
}
