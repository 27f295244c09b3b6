use crate::client::config::{Overrides, ENV_API_URL, ENV_SESSION_FILE, ENV_TIMEOUT};
use clap::{Arg, ArgMatches, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the course management API (default: http://localhost:8000)")
                .env(ENV_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Where the session token and profile are kept (default: ~/.coursedesk/session.json)")
                .env(ENV_SESSION_FILE)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds (default: 10)")
                .env(ENV_TIMEOUT)
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
}

/// Connection options shared by every subcommand. Unset values fall back to
/// the client defaults.
#[derive(Debug, Default)]
pub struct Options {
    pub api_url: Option<String>,
    pub session_file: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            api_url: matches.get_one::<String>(ARG_API_URL).cloned(),
            session_file: matches.get_one::<String>(ARG_SESSION_FILE).cloned(),
            timeout_secs: matches.get_one::<u64>(ARG_TIMEOUT).copied(),
        }
    }

    #[must_use]
    pub fn into_overrides(self) -> Overrides {
        Overrides {
            api_base_url: self.api_url,
            session_path: self.session_file,
            timeout_secs: self.timeout_secs,
        }
    }
}
