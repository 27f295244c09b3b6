//! `-v` flag shared by every coursedesk subcommand.

use clap::{builder::ValueParser, Arg, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ENV_LOG_LEVEL: &str = "COURSEDESK_LOG_LEVEL";

/// Accepts `0..=4` or a level name. Used when the count comes from
/// `COURSEDESK_LOG_LEVEL` instead of repeated `-v`.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 4 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err(format!(
                "invalid log level '{level}', expected 0-4 or error|warn|info|debug|trace"
            )),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log requests and session changes to stderr, -v for warnings up to -vvvv for traces")
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
