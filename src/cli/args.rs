use crate::handler::WatcherKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Watch a MetaTrader 4 export directory and upload new files
#[derive(Parser, Debug)]
#[command(name = "mt4-watcher")]
#[command(about = "Watch MetaTrader 4 csv exports and upload them", long_about = None)]
pub struct CliArgs {
    /// YAML configuration file
    #[arg(
        long = "config",
        value_name = "FILE",
        default_value = "config.yaml",
        help = "Path to the YAML configuration file"
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Process to run
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Watch for account trading exports and upload them as JSON
    Account,
    /// Watch for market price exports and upload them as files
    Market,
    /// Send periodic liveness pings for both watchers
    Health,
}

impl Command {
    /// Watcher kind for the two watching commands
    pub fn watcher_kind(&self) -> Option<WatcherKind> {
        match self {
            Command::Account => Some(WatcherKind::Account),
            Command::Market => Some(WatcherKind::Market),
            Command::Health => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::account(&["program", "account"], Command::Account)]
    #[case::market(&["program", "market"], Command::Market)]
    #[case::health(&["program", "health"], Command::Health)]
    fn test_command_parsing(#[case] args: &[&str], #[case] expected: Command) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command, expected);
    }

    #[rstest]
    #[case::default_config(&["program", "account"], "config.yaml")]
    #[case::explicit_config(&["program", "--config", "/etc/mt4/watch.yaml", "market"], "/etc/mt4/watch.yaml")]
    fn test_config_path(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.config, PathBuf::from(expected));
    }

    #[rstest]
    #[case::account(Command::Account, Some(WatcherKind::Account))]
    #[case::market(Command::Market, Some(WatcherKind::Market))]
    #[case::health(Command::Health, None)]
    fn test_watcher_kind(#[case] command: Command, #[case] expected: Option<WatcherKind>) {
        assert_eq!(command.watcher_kind(), expected);
    }

    #[rstest]
    #[case::missing_command(&["program"])]
    #[case::unknown_command(&["program", "prices"])]
    #[case::missing_config_value(&["program", "account", "--config"])]
    fn test_invalid_arguments(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
