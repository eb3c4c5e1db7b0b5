// Logging module - tracing subscriber setup
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use std::io;

/// Directive used when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "pacicli=debug"
    } else {
        "pacicli=info"
    }
}

/// Initialize logging system
///
/// Events go to stderr so stdout carries only command output.
pub fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(verbose)
                .with_level(true)
                .with_file(verbose)
                .with_line_number(verbose),
        )
        .try_init()?;

    tracing::debug!("Pacicli logging system initialized");
    Ok(())
}
