//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands. Each one
//! queries the loaded [`App`] and hands the result to [`crate::output`].

use anyhow::Result;
use practice_graph::{
    Recommendation, TreeBuilder, adoption_progress, eligible_candidates, filter_by_selection,
    flatten, next_recommendation, would_create_cycle,
};

use super::args::{
    CheckEdgeArgs, FlatArgs, NextArgs, ProgressArgs, ShowArgs, TreeArgs, ValidateArgs,
};
use crate::app::App;
use crate::output::{self, OutputMode, ValidationSummary};

/// Execute the validate command
pub fn execute_validate(app: &App, _args: &ValidateArgs, output_mode: OutputMode) -> Result<()> {
    let graph = app.graph();
    tracing::info!(source = app.origin(), "Dataset is valid");

    output::print_validation(
        &ValidationSummary {
            practices: graph.len(),
            dependencies: graph.edge_count(),
            warnings: graph.warnings(),
        },
        output_mode,
    )?;
    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let graph = app.graph();
    let practice = graph
        .practice(&args.id)
        .ok_or_else(|| practice_graph::Error::NotFound(args.id.clone()))?;
    let dependencies = graph.direct_dependencies(&args.id)?;
    let dependents = graph.direct_dependents(&args.id)?;

    output::print_practice_details(
        practice,
        app.adopted().contains(&args.id),
        &dependencies,
        &dependents,
        output_mode,
    )?;
    Ok(())
}

/// Execute the tree command
pub fn execute_tree(app: &App, args: &TreeArgs, output_mode: OutputMode) -> Result<()> {
    let tree = TreeBuilder::new(app.graph())
        .adopted(app.adopted())
        .build(&args.root)?;

    output::print_tree(&tree, output_mode)?;
    Ok(())
}

/// Execute the flat command
pub fn execute_flat(app: &App, args: &FlatArgs, output_mode: OutputMode) -> Result<()> {
    let tree = TreeBuilder::new(app.graph())
        .adopted(app.adopted())
        .build(&args.root)?;

    let mut nodes = flatten(&tree);
    if let Some(selected) = &args.select {
        nodes = filter_by_selection(&nodes, selected);
    }

    output::print_flat(&nodes, output_mode)?;
    Ok(())
}

/// Execute the next command
///
/// Running out of recommendations is an answer, not a failure, so both
/// `Complete` and `Blocked` exit successfully.
pub fn execute_next(app: &App, args: &NextArgs, output_mode: OutputMode) -> Result<()> {
    if args.all {
        let candidates = eligible_candidates(app.graph(), app.adopted());
        output::print_candidates(&candidates, output_mode)?;
        return Ok(());
    }

    let recommendation = next_recommendation(app.graph(), app.adopted());
    if let Recommendation::Blocked { remaining } = recommendation {
        tracing::warn!(remaining, "No practice is ready to adopt");
    }

    output::print_recommendation(&recommendation, output_mode)?;
    Ok(())
}

/// Execute the progress command
pub fn execute_progress(app: &App, _args: &ProgressArgs, output_mode: OutputMode) -> Result<()> {
    let progress = adoption_progress(app.graph(), app.adopted());
    output::print_progress(&progress, output_mode)?;
    Ok(())
}

/// Execute the check-edge command
pub fn execute_check_edge(app: &App, args: &CheckEdgeArgs, output_mode: OutputMode) -> Result<()> {
    let closes_cycle = would_create_cycle(app.graph(), &args.from, &args.to)?;
    output::print_edge_check(&args.from, &args.to, closes_cycle, output_mode)?;
    Ok(())
}
