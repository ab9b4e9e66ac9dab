/// CLI argument definitions for the `dq` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::cli_help;

/// Top-level CLI parser: global options plus a subcommand selector.
#[derive(Parser)]
#[command(
    name = "dq",
    version,
    about = "Track technical debt and earn points for paying it down"
)]
pub struct Cli {
    /// Configuration file (default: ./debtquest.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(long, global = true, env = "DQ_DATABASE")]
    pub db: Option<PathBuf>,

    /// Log pipeline progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Credentials of the user a command acts for.
#[derive(Args)]
pub struct Credentials {
    /// Username
    #[arg(long = "user", env = "DQ_USER")]
    pub username: String,

    /// Password
    #[arg(long, env = "DQ_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone, lint and score a repository
    #[command(long_about = cli_help::ANALYZE)]
    Analyze {
        /// Repository URL (anything git can clone)
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List analyzed projects
    Projects {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project with its analyses and issues
    Project {
        /// Project id
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score history and issue breakdown of a project
    #[command(long_about = cli_help::REPORT)]
    Report {
        /// Project id
        id: i64,

        /// Output as JSON
        #[arg(long, conflicts_with = "markdown")]
        json: bool,

        /// Output as a markdown document
        #[arg(long)]
        markdown: bool,
    },

    /// Create a user account
    Register {
        /// Username to register
        username: String,

        /// Password for the new account
        #[arg(long, env = "DQ_PASSWORD", hide_env_values = true)]
        password: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve an issue and collect points and badges
    #[command(long_about = cli_help::RESOLVE)]
    Resolve {
        /// Issue id
        issue_id: i64,

        #[command(flatten)]
        credentials: Credentials,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Users ranked by total points
    Leaderboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Badges earned by a user
    Badges {
        #[command(flatten)]
        credentials: Credentials,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dq", "report", "3", "--markdown", "--db", "x.db", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        match cli.command {
            Commands::Report { id, json, markdown } => {
                assert_eq!(id, 3);
                assert!(!json);
                assert!(markdown);
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn json_and_markdown_conflict() {
        assert!(Cli::try_parse_from(["dq", "report", "1", "--json", "--markdown"]).is_err());
    }

    #[test]
    fn resolve_takes_credentials_from_flags() {
        let cli = Cli::try_parse_from([
            "dq", "resolve", "9", "--user", "ada", "--password", "pw",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve {
                issue_id,
                credentials,
                ..
            } => {
                assert_eq!(issue_id, 9);
                assert_eq!(credentials.username, "ada");
                assert_eq!(credentials.password, "pw");
            }
            _ => panic!("expected resolve"),
        }
    }
}
