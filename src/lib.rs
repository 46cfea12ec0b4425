#![doc(test(attr(deny(warnings))))]

//! Subtrack Core offers foundational subscription, billing-schedule, and
//! spend-aggregation primitives that power subscription-tracker frontends.

pub mod config;
pub mod currency;
pub mod errors;
pub mod subscriptions;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Subtrack Core tracing initialized.");
    });
}
