use anyhow::Result;
use std::{env::var, io};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Set to `json` for one JSON object per log line.
pub const ENV_LOG_FORMAT: &str = "COURSEDESK_LOG_FORMAT";

fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
}

/// Initialize logging. Logs go to stderr so stdout stays machine readable.
/// `RUST_LOG` directives are honored on top of the verbosity level.
///
/// # Errors
///
/// Returns an error if a filter directive is invalid or a subscriber is
/// already installed
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("reqwest=warn".parse()?);

    if wants_json(var(ENV_LOG_FORMAT).ok().as_deref()) {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_current_span(true)
            .with_target(false);

        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false);

        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}
