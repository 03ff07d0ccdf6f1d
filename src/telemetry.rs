use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Log as JSON to stderr, stdout is reserved for the generated manifest.
pub fn init() {
    let logger = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .expect("Fallback should be valid");

    Registry::default().with(logger).with(env_filter).init();
}
