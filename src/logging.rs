use crate::config::Config;
use std::sync::Mutex;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `proxy.log_level`. With
/// `logging.log_to_file` set, events are written to the log file as well as stdout.
pub fn init(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.proxy.log_level))?;

    if config.logging.log_to_file {
        let file = std::fs::File::create(&config.logging.log_file_path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file));

        let stdout_layer = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(stdout_layer)
            .try_init()?;
    } else {
        let stdout_layer = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .try_init()?;
    }

    Ok(())
}
