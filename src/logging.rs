use std::sync::Once;

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a fmt subscriber once per process.
///
/// `RUST_LOG` takes precedence; `default_filter` applies when it is unset or invalid.
pub fn setup_logger(default_filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        // Another subscriber may already be installed (e.g. by an embedding application).
        let _ = tracing_subscriber::fmt::Subscriber::builder()
            .without_time()
            .with_target(false)
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish()
            .try_init();
    });
}
