use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// `-v` count to the level of the stderr log. No flag keeps the log quiet so
/// only the JSON result reaches the terminal.
const fn get_verbosity_level(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// Parses the command line and resolves it into an [`Action`] that the binary
/// awaits. Nothing touches the network or the session file here.
///
/// # Errors
///
/// Returns an error if logging cannot be installed or the arguments do not
/// resolve to a valid client configuration.
pub fn start() -> Result<Action> {
    // 1. Parse command-line arguments
    let matches = commands::new().get_matches();

    // 2. Extract verbosity level
    let verbosity_level = get_verbosity_level(
        matches
            .get_one::<u8>(commands::logging::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    );

    // 3. Route logs to stderr; stdout is reserved for results
    telemetry::init(verbosity_level)?;

    // 4. Resolve config and subcommand
    let action = dispatch::handler(&matches)?;

    // 5. Hand the action to the async runtime
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(get_verbosity_level(0), None);
        assert_eq!(get_verbosity_level(1), Some(tracing::Level::WARN));
        assert_eq!(get_verbosity_level(3), Some(tracing::Level::DEBUG));
        assert_eq!(get_verbosity_level(9), Some(tracing::Level::TRACE));
    }
}
