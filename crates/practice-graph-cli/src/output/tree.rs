//! Dependency tree rendering for `practices tree` output.

use std::io::{self, Write};

use colored::Colorize;
use practice_graph::{TreeNode, Truncation};

use super::color::{adoption_icon, colorize_id, dimmed, warning};
use super::{OutputConfig, OutputMode};

/// Print a dependency tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ continuous-delivery Continuous Delivery ○
/// ├── automated-testing Automated Testing ○
/// │   └── version-control Version Control ✓
/// └── version-control Version Control ✓
/// ```
pub fn print_tree(root: &TreeNode, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_tree_text(&mut handle, root, &config),
        OutputMode::Json => super::write_json(&mut handle, root),
    }
}

/// Render the tree with connector lines.
pub(crate) fn print_tree_text<W: Write>(
    w: &mut W,
    root: &TreeNode,
    config: &OutputConfig,
) -> io::Result<()> {
    let root_icon = if config.use_ascii { "*" } else { "◆" };
    let root_icon_str = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };

    writeln!(w, "{} {}", root_icon_str, node_label(root, config))?;
    print_tree_children(w, &root.dependencies, &[], config)
}

/// Recursively render tree children with proper connector lines.
///
/// `prefix_segments` tracks which ancestor levels still have siblings below,
/// used to draw the vertical continuation lines (`│`).
fn print_tree_children<W: Write>(
    w: &mut W,
    children: &[TreeNode],
    prefix_segments: &[bool],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        let mut prefix = String::new();
        for &has_more in prefix_segments {
            prefix.push_str(&dimmed(if has_more { pipe } else { space }, config));
        }
        let connector = dimmed(if is_last { corner } else { branch }, config);

        writeln!(w, "{}{}{}", prefix, connector, node_label(child, config))?;

        if !child.dependencies.is_empty() {
            let mut next_segments = prefix_segments.to_vec();
            next_segments.push(!is_last);
            print_tree_children(w, &child.dependencies, &next_segments, config)?;
        }
    }

    Ok(())
}

/// `id Name marker`, plus a note when the branch was cut short.
fn node_label(node: &TreeNode, config: &OutputConfig) -> String {
    let note = match node.truncated {
        Some(Truncation::Cycle) => format!(" {}", warning("(cycle)", config)),
        Some(Truncation::DepthLimit) => format!(" {}", warning("(depth limit)", config)),
        None => String::new(),
    };

    format!(
        "{} {} {}{}",
        colorize_id(node.id().as_str(), config),
        node.practice.name,
        adoption_icon(node.adopted, config),
        note
    )
}
