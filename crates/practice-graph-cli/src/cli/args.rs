//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::validators::validate_practice_id;

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ValidateArgs {}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Practice id to show
    #[arg(value_parser = validate_practice_id)]
    pub id: String,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Root practice of the tree
    #[arg(value_parser = validate_practice_id)]
    pub root: String,

    /// Maximum depth to expand (overrides `engine.max-tree-depth`)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,
}

/// Arguments for the `flat` command
#[derive(Parser, Debug, Clone)]
pub struct FlatArgs {
    /// Root practice of the tree to flatten
    #[arg(value_parser = validate_practice_id)]
    pub root: String,

    /// Keep only this practice and its ancestors and descendants
    #[arg(short, long)]
    pub select: Option<String>,

    /// Maximum depth to expand (overrides `engine.max-tree-depth`)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,
}

/// Arguments for the `next` command
#[derive(Parser, Debug, Clone, Default)]
pub struct NextArgs {
    /// List every eligible practice instead of only the best one
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the `progress` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ProgressArgs {}

/// Arguments for the `check-edge` command
#[derive(Parser, Debug, Clone)]
pub struct CheckEdgeArgs {
    /// The practice that would gain the dependency
    #[arg(value_parser = validate_practice_id)]
    pub from: String,

    /// The practice it would depend on
    #[arg(value_parser = validate_practice_id)]
    pub to: String,
}
