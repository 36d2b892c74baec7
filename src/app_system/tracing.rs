use super::LogFormat;

/// Configure tracing once at application startup for the entire process.
///
/// `RUST_LOG` controls verbosity (default `info`). Output goes to stderr so
/// stdout stays reserved for responses.
///
/// ```bash
/// RUST_LOG=debug inventory_monitor
/// RUST_LOG=inventory_monitor::actors=debug,info inventory_monitor
/// INVENTORY_LOG_FORMAT=json inventory_monitor
/// ```
pub fn setup_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr);

    // try_init: a second call (tests, embedding) keeps the first subscriber
    match format {
        LogFormat::Compact => {
            let _ = builder.compact().try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
