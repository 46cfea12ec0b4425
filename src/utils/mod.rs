use std::sync::Once;

use chrono::{Local, NaiveDate};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("subtrack_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// The one place the system clock is read. Every schedule function takes its
/// reference date as a parameter; callers at the UI boundary pass this in.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
