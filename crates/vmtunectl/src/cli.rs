//! CLI - Command-line argument parsing
//!
//! Flag-style actions, exactly one per invocation. Keeps argument parsing
//! separate from execution logic.

use clap::{error::ErrorKind, ArgGroup, Parser};
use std::path::PathBuf;

use crate::errors::{EXIT_GENERAL_ERROR, EXIT_SUCCESS};

/// Linux virtual memory optimizer
#[derive(Parser, Debug)]
#[command(name = "vmtunectl")]
#[command(about = "Report and tune Linux virtual memory", long_about = None)]
#[command(disable_version_flag = true)]
#[command(group(ArgGroup::new("action").multiple(false)))]
#[command(after_help = "Examples:\n  sudo vmtunectl --optimize\n  sudo vmtunectl --gaming\n  vmtunectl --info")]
pub struct Cli {
    /// Show version information
    #[arg(short = 'v', long, group = "action")]
    pub version: bool,

    /// Display memory information
    #[arg(short, long, group = "action")]
    pub info: bool,

    /// Optimize memory (drop caches)
    #[arg(short, long, group = "action")]
    pub optimize: bool,

    /// Aggressive optimization (drop caches + compact)
    #[arg(short, long, group = "action")]
    pub aggressive: bool,

    /// Tune for gaming performance
    #[arg(short, long, group = "action")]
    pub gaming: bool,

    /// Tune for desktop usage
    #[arg(short, long, group = "action")]
    pub desktop: bool,

    /// Monitor memory in real-time
    #[arg(short, long, group = "action")]
    pub monitor: bool,

    /// Print --info as JSON
    #[arg(long, requires = "info")]
    pub json: bool,

    /// Monitor refresh interval in seconds (overrides config)
    #[arg(long, value_name = "SECS", requires = "monitor", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file (overrides ~/.config/vmtune/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// The single thing an invocation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Version,
    Info { json: bool },
    Monitor,
    Optimize,
    Aggressive,
    Gaming,
    Desktop,
}

impl Action {
    /// Actions that write to kernel control surfaces
    pub fn requires_root(&self) -> bool {
        matches!(
            self,
            Action::Optimize | Action::Aggressive | Action::Gaming | Action::Desktop
        )
    }

    /// Flag that selects this action, for hints like "sudo vmtunectl --gaming"
    pub fn flag(&self) -> &'static str {
        match self {
            Action::Version => "--version",
            Action::Info { .. } => "--info",
            Action::Monitor => "--monitor",
            Action::Optimize => "--optimize",
            Action::Aggressive => "--aggressive",
            Action::Gaming => "--gaming",
            Action::Desktop => "--desktop",
        }
    }
}

impl Cli {
    pub fn action(&self) -> Option<Action> {
        if self.version {
            Some(Action::Version)
        } else if self.info {
            Some(Action::Info { json: self.json })
        } else if self.monitor {
            Some(Action::Monitor)
        } else if self.optimize {
            Some(Action::Optimize)
        } else if self.aggressive {
            Some(Action::Aggressive)
        } else if self.gaming {
            Some(Action::Gaming)
        } else if self.desktop {
            Some(Action::Desktop)
        } else {
            None
        }
    }
}

/// Exit code for a clap parse result: help is success, anything else fails
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        _ => EXIT_GENERAL_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["vmtunectl", "-g"]).unwrap();
        assert_eq!(cli.action(), Some(Action::Gaming));

        let cli = Cli::try_parse_from(["vmtunectl", "-v"]).unwrap();
        assert_eq!(cli.action(), Some(Action::Version));
    }

    #[test]
    fn test_no_action() {
        let cli = Cli::try_parse_from(["vmtunectl"]).unwrap();
        assert_eq!(cli.action(), None);

        let cli = Cli::try_parse_from(["vmtunectl", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.action(), None);
    }

    #[test]
    fn test_actions_are_exclusive() {
        assert!(Cli::try_parse_from(["vmtunectl", "--gaming", "--desktop"]).is_err());
    }

    #[test]
    fn test_unknown_argument_fails_with_one() {
        let err = Cli::try_parse_from(["vmtunectl", "--turbo"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&err), EXIT_GENERAL_ERROR);

        let help = Cli::try_parse_from(["vmtunectl", "--help"]).unwrap_err();
        assert_eq!(parse_error_exit_code(&help), EXIT_SUCCESS);
    }

    #[test]
    fn test_json_requires_info() {
        assert!(Cli::try_parse_from(["vmtunectl", "--json"]).is_err());
        let cli = Cli::try_parse_from(["vmtunectl", "-i", "--json"]).unwrap();
        assert_eq!(cli.action(), Some(Action::Info { json: true }));
    }

    #[test]
    fn test_interval_must_be_positive() {
        assert!(Cli::try_parse_from(["vmtunectl", "-m", "--interval", "0"]).is_err());
        let cli = Cli::try_parse_from(["vmtunectl", "-m", "--interval", "2"]).unwrap();
        assert_eq!(cli.interval, Some(2));
    }

    #[test]
    fn test_privileged_actions() {
        assert!(Action::Optimize.requires_root());
        assert!(Action::Aggressive.requires_root());
        assert!(Action::Gaming.requires_root());
        assert!(Action::Desktop.requires_root());
        assert!(!Action::Info { json: false }.requires_root());
        assert!(!Action::Monitor.requires_root());
        assert!(!Action::Version.requires_root());
    }
}
