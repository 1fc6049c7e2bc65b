//! Tracing setup for the binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string
pub const LOG_ENV: &str = "BILLTRACK_LOG";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `BILLTRACK_LOG` wins when set; otherwise only warnings are shown, or
/// debug output with `verbose`. Output goes to stderr.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let fallback = if verbose {
            "billtrack=debug"
        } else {
            "billtrack=warn"
        };

        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        // A subscriber installed by a test harness is not an error here.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
