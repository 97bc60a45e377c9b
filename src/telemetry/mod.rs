mod config;

pub use config::LogConfig;

use tracing_subscriber::EnvFilter;

/// Install the stderr fmt subscriber; stdout stays reserved for progress lines
pub fn init_logging(verbose: bool) {
    let config = LogConfig::from_env(verbose);
    let env_filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("apicase=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("logging initialized with filter {}", config.filter);
}
