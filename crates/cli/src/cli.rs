//! CLI type definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crewfinder_core::DEFAULT_SUGGEST_LIMIT;

#[derive(Debug, Parser)]
#[command(name = "crewfinder")]
#[command(about = "Assemble a team that covers a list of required skills", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to ./crewfinder.toml when present.
    #[arg(short, long, global = true, env = "CREWFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Dump Prometheus metrics to stderr before exiting
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Select a team greedily and print the JSON report
    Select {
        /// Required skill (repeatable, case-insensitive)
        #[arg(short, long = "skill", value_name = "SKILL")]
        skills: Vec<String>,

        /// Maximum number of team members
        #[arg(short = 'n', long)]
        team_size: usize,

        /// Parallel profile fetches (overrides config)
        #[arg(long)]
        concurrency: Option<usize>,

        /// JSON array of usernames or {"username", "genome"} objects
        #[arg(long, value_name = "PATH")]
        candidates_file: Option<PathBuf>,

        /// Candidate usernames
        usernames: Vec<String>,
    },

    /// Fetch one profile and print it as JSON
    Profile {
        username: String,
    },

    /// Suggest skill names matching a query
    Suggest {
        /// Substring to match; empty lists the first entries
        query: Option<String>,

        /// Maximum suggestions
        #[arg(short, long, default_value_t = DEFAULT_SUGGEST_LIMIT)]
        limit: usize,

        /// Also learn skills from these users' profiles (repeatable)
        #[arg(short, long = "user", value_name = "USERNAME")]
        users: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        let cli = Cli::try_parse_from([
            "crewfinder",
            "select",
            "-s",
            "rust",
            "--skill",
            "go",
            "-n",
            "2",
            "alice",
            "bob",
        ])
        .unwrap();

        match cli.command {
            Commands::Select {
                skills,
                team_size,
                concurrency,
                usernames,
                ..
            } => {
                assert_eq!(skills, vec!["rust", "go"]);
                assert_eq!(team_size, 2);
                assert_eq!(concurrency, None);
                assert_eq!(usernames, vec!["alice", "bob"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_suggest_defaults() {
        let cli = Cli::try_parse_from(["crewfinder", "--metrics", "suggest"]).unwrap();
        assert!(cli.metrics);
        match cli.command {
            Commands::Suggest { query, limit, users } => {
                assert!(query.is_none());
                assert_eq!(limit, DEFAULT_SUGGEST_LIMIT);
                assert!(users.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_select_requires_team_size() {
        assert!(Cli::try_parse_from(["crewfinder", "select", "alice"]).is_err());
    }
}
