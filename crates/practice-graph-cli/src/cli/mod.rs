//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for practices using clap's
//! derive API. Each command has its own argument struct.
//!
//! # Commands
//!
//! - `validate`: Check that the dataset forms an acyclic graph
//! - `show`: Show one practice with its dependencies and dependents
//! - `tree`: Render the dependency tree under a practice
//! - `flat`: List a tree's practices once each, optionally filtered to a selection
//! - `next`: Recommend the next practice to adopt
//! - `progress`: Show adoption progress
//! - `check-edge`: Ask whether a new dependency would create a cycle
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--data`, `--config`: Where to read practices and configuration
//! - `--adopted`, `--adopted-file`: Which practices are already adopted
//!
//! # Example
//!
//! ```bash
//! practices --data practices.json validate
//! practices tree continuous-delivery --max-depth 3
//! practices flat continuous-delivery --select automated-testing
//! practices --adopted version-control,automated-testing next
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::app::{App, LoadOptions};
use crate::error::CliError;
use crate::output::OutputMode;

pub use args::{
    CheckEdgeArgs, FlatArgs, NextArgs, ProgressArgs, ShowArgs, TreeArgs, ValidateArgs,
};
pub use validators::validate_practice_id;

/// Exit code for failures other than a missing practice.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code when a requested practice does not exist.
pub const EXIT_NOT_FOUND: u8 = 3;

/// Practices - explore a catalog of practices and their dependencies
///
/// Loads a practice dataset (JSON), validates it as an acyclic dependency
/// graph, and answers questions about it: what a practice depends on, what to
/// adopt next, and how far along adoption is.
#[derive(Parser, Debug)]
#[command(name = "practices")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Practice dataset (overrides `data-file` in the configuration)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Configuration file (default: ./practices.yaml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Adopted practice ids (comma-separated)
    #[arg(long, global = true, value_delimiter = ',', value_name = "IDS")]
    pub adopted: Vec<String>,

    /// JSON array of adopted practice ids
    #[arg(long, global = true, value_name = "PATH")]
    pub adopted_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the practice dataset
    ///
    /// Builds the dependency graph and reports its size. Fails on invalid ids,
    /// unknown categories, dangling references, and cycles.
    Validate(ValidateArgs),

    /// Show detailed information about a practice
    ///
    /// Displays the practice's fields, its direct dependencies, and the
    /// practices that depend on it.
    Show(ShowArgs),

    /// Show the dependency tree under a practice
    ///
    /// Shared dependencies appear under every practice that needs them.
    Tree(TreeArgs),

    /// List a dependency tree with each practice once
    ///
    /// Each practice is listed at the deepest level it occurs. With
    /// `--select`, only the selected practice and its relatives are kept.
    Flat(FlatArgs),

    /// Recommend the next practice to adopt
    ///
    /// Picks an unadopted practice whose dependencies are all adopted,
    /// preferring lower maturity tiers.
    Next(NextArgs),

    /// Show adoption progress
    Progress(ProgressArgs),

    /// Check whether a new dependency would create a cycle
    CheckEdge(CheckEdgeArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        self.execute_in(&std::env::current_dir()?).await
    }

    /// Execute the CLI command, resolving relative paths against `working_dir`
    pub async fn execute_in(&self, working_dir: &Path) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Practices dependency explorer");
            println!("Use --help for more information");
            return Ok(());
        };

        let app = App::load(working_dir, &self.load_options(command)).await?;

        match command {
            Commands::Validate(args) => execute::execute_validate(&app, args, output_mode),
            Commands::Show(args) => execute::execute_show(&app, args, output_mode),
            Commands::Tree(args) => execute::execute_tree(&app, args, output_mode),
            Commands::Flat(args) => execute::execute_flat(&app, args, output_mode),
            Commands::Next(args) => execute::execute_next(&app, args, output_mode),
            Commands::Progress(args) => execute::execute_progress(&app, args, output_mode),
            Commands::CheckEdge(args) => execute::execute_check_edge(&app, args, output_mode),
        }
    }

    fn load_options(&self, command: &Commands) -> LoadOptions {
        let max_depth = match command {
            Commands::Tree(args) => args.max_depth,
            Commands::Flat(args) => args.max_depth,
            _ => None,
        };

        LoadOptions {
            config: self.config.clone(),
            data: self.data.clone(),
            max_depth,
            adopted: self.adopted.clone(),
            adopted_file: self.adopted_file.clone(),
        }
    }
}

/// Map a command failure to the process exit code.
///
/// A missing practice gets its own code so scripts can tell "no such
/// practice" apart from a broken dataset.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let not_found = err
        .downcast_ref::<CliError>()
        .is_some_and(CliError::is_not_found)
        || matches!(
            err.downcast_ref::<practice_graph::Error>(),
            Some(practice_graph::Error::NotFound(_))
        );

    if not_found { EXIT_NOT_FOUND } else { EXIT_FAILURE }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["practices"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert!(cli.adopted.is_empty());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "practices",
            "next",
            "--json",
            "--data",
            "catalog.json",
            "--adopted",
            "a,b",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data, Some(PathBuf::from("catalog.json")));
        assert_eq!(cli.adopted, ["a", "b"]);
        assert!(matches!(cli.command, Some(Commands::Next(NextArgs { all: false }))));
    }

    #[test]
    fn test_parse_tree_with_depth() {
        let cli = Cli::try_parse_from(["practices", "tree", "root-practice", "-d", "2"]).unwrap();
        match cli.command {
            Some(Commands::Tree(args)) => {
                assert_eq!(args.root, "root-practice");
                assert_eq!(args.max_depth, Some(2));
            }
            _ => panic!("Expected Tree command"),
        }
    }

    #[test]
    fn test_parse_flat_with_selection() {
        let cli =
            Cli::try_parse_from(["practices", "flat", "root", "--select", "middle"]).unwrap();
        match cli.command {
            Some(Commands::Flat(args)) => {
                assert_eq!(args.root, "root");
                assert_eq!(args.select.as_deref(), Some("middle"));
                assert!(args.max_depth.is_none());
            }
            _ => panic!("Expected Flat command"),
        }
    }

    #[test]
    fn test_parse_check_edge() {
        let cli = Cli::try_parse_from(["practices", "check-edge", "a", "b"]).unwrap();
        match cli.command {
            Some(Commands::CheckEdge(args)) => {
                assert_eq!((args.from.as_str(), args.to.as_str()), ("a", "b"));
            }
            _ => panic!("Expected CheckEdge command"),
        }
    }

    #[rstest]
    #[case::show(&["practices", "show", "Not_Kebab"])]
    #[case::tree(&["practices", "tree", "-bad"])]
    #[case::check_edge_missing_target(&["practices", "check-edge", "a"])]
    #[case::depth_not_a_number(&["practices", "tree", "a", "--max-depth", "deep"])]
    fn test_parse_rejects(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_depth_override_only_for_tree_commands() {
        let cli = Cli::try_parse_from(["practices", "tree", "a", "-d", "4"]).unwrap();
        let command = cli.command.clone().unwrap();
        assert_eq!(cli.load_options(&command).max_depth, Some(4));

        let cli = Cli::try_parse_from(["practices", "next"]).unwrap();
        let command = cli.command.clone().unwrap();
        assert_eq!(cli.load_options(&command).max_depth, None);
    }

    // ========== Exit Codes ==========

    #[test]
    fn test_exit_code_for_missing_practice() {
        let direct = anyhow::Error::from(practice_graph::Error::NotFound("x".to_string()));
        assert_eq!(exit_code(&direct), EXIT_NOT_FOUND);

        let wrapped = anyhow::Error::from(CliError::Graph(practice_graph::Error::NotFound(
            "x".to_string(),
        )));
        assert_eq!(exit_code(&wrapped), EXIT_NOT_FOUND);
    }

    #[test]
    fn test_exit_code_for_other_failures() {
        let cycle = anyhow::Error::from(practice_graph::Error::Cycle { path: vec![] });
        assert_eq!(exit_code(&cycle), EXIT_FAILURE);

        let config = anyhow::Error::from(CliError::Config("bad".to_string()));
        assert_eq!(exit_code(&config), EXIT_FAILURE);
    }
}
