use std::env;
use std::sync::Once;
use tracing::info;

use crate::config::Settings;
use crate::logging::init_logging;

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per test binary; defaults to `trace`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let settings = Settings {
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| "trace".into()),
            ..Settings::default()
        };
        // global logging subscriber, used by all tracing log macros
        init_logging(&settings);
        info!("Test Setup complete");
    });
}
