//! Output formatting for CLI commands.
//!
//! Every command renders either human-readable text or JSON for programmatic
//! use. Text renderers write to any [`Write`] so they can be tested against a
//! buffer; the public `print_*` functions lock stdout and dispatch on
//! [`OutputMode`].
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)
//! - [`tree`]: Dependency tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

use practice_graph::{AdoptionProgress, FlatNode, GraphWarning, Practice, Recommendation};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};
pub use tree::print_tree;

use color::{adoption_icon, bold, colorize_category, colorize_id, dimmed};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
///
/// Holds settings that control how output is formatted, including terminal
/// width limits, ASCII fallback mode, and color output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `PRACTICES_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `PRACTICES_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`OutputConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("PRACTICES_MAX_WIDTH") {
            Some(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "PRACTICES_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("PRACTICES_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "PRACTICES_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // https://no-color.org/
        let use_colors = lookup("NO_COLOR").is_none();

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(usize::from(DEFAULT_TERMINAL_WIDTH), |(w, _)| usize::from(w.0))
}

fn content_width(config: &OutputConfig) -> usize {
    get_terminal_width().min(config.max_width)
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

/// Print a text section with a bold title and wrapped, indented content.
fn print_text_section<W: Write>(
    w: &mut W,
    title: &str,
    content: &str,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if content.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{}:", bold(title, config))?;
    for line in wrap_text(content, width.saturating_sub(2)) {
        writeln!(w, "  {line}")?;
    }
    Ok(())
}

/// Print a bulleted list section; nothing when the list is empty.
fn print_list_section<W: Write>(
    w: &mut W,
    title: &str,
    items: &[String],
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{}:", bold(title, config))?;
    for item in items {
        for (i, line) in wrap_text(item, width.saturating_sub(4)).iter().enumerate() {
            let bullet = if i == 0 { "- " } else { "  " };
            writeln!(w, "  {bullet}{line}")?;
        }
    }
    Ok(())
}

// ============================================================================
// JSON
// ============================================================================

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(w, "{json}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    write_json(&mut io::stdout().lock(), value)
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{msg}")
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Counts reported by `practices validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary<'a> {
    /// Number of practices in the graph
    pub practices: usize,
    /// Number of dependency edges
    pub dependencies: usize,
    /// Non-fatal conditions raised while building
    pub warnings: &'a [GraphWarning],
}

/// Print the outcome of a successful validation.
pub fn print_validation(summary: &ValidationSummary<'_>, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_validation_text(&mut handle, summary, &config),
        OutputMode::Json => write_json(&mut handle, &validation_json(summary)),
    }
}

/// Print one practice with its direct dependencies and dependents.
pub fn print_practice_details(
    practice: &Practice,
    adopted: bool,
    dependencies: &[&Practice],
    dependents: &[&Practice],
    mode: OutputMode,
) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_practice_details_text(
            &mut handle,
            practice,
            adopted,
            dependencies,
            dependents,
            &config,
        ),
        OutputMode::Json => write_json(
            &mut handle,
            &details_json(practice, adopted, dependencies, dependents),
        ),
    }
}

/// Print a flattened listing.
pub fn print_flat(nodes: &[FlatNode], mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_flat_text(&mut handle, nodes, &config),
        OutputMode::Json => write_json(&mut handle, nodes),
    }
}

/// Print a recommendation.
pub fn print_recommendation(recommendation: &Recommendation, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_recommendation_text(&mut handle, recommendation, &config),
        OutputMode::Json => write_json(&mut handle, recommendation),
    }
}

/// Print every eligible candidate, best first.
pub fn print_candidates(candidates: &[&Practice], mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_candidates_text(&mut handle, candidates, &config),
        OutputMode::Json => write_json(&mut handle, candidates),
    }
}

/// Print adoption progress.
pub fn print_progress(progress: &AdoptionProgress, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_progress_text(&mut handle, progress, &config),
        OutputMode::Json => write_json(&mut handle, progress),
    }
}

/// Print the answer to "would this edge close a cycle?".
pub fn print_edge_check(from: &str, to: &str, closes_cycle: bool, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_edge_check_text(&mut handle, from, to, closes_cycle, &config),
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({
                "from": from,
                "to": to,
                "wouldCreateCycle": closes_cycle,
            }),
        ),
    }
}

// ============================================================================
// Text Formatting
// ============================================================================

fn validation_json(summary: &ValidationSummary<'_>) -> serde_json::Value {
    serde_json::json!({
        "valid": true,
        "practices": summary.practices,
        "dependencies": summary.dependencies,
        "warnings": summary
            .warnings
            .iter()
            .map(|w| serde_json::json!({ "kind": w.kind(), "message": w.to_string() }))
            .collect::<Vec<_>>(),
    })
}

fn print_validation_text<W: Write>(
    w: &mut W,
    summary: &ValidationSummary<'_>,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} practices, {} dependencies, no cycles",
        success("OK:", config),
        summary.practices,
        summary.dependencies
    )?;
    for warning in summary.warnings {
        writeln!(w, "{} {}", color::warning("warning:", config), warning)?;
    }
    Ok(())
}

fn details_json(
    practice: &Practice,
    adopted: bool,
    dependencies: &[&Practice],
    dependents: &[&Practice],
) -> serde_json::Value {
    let ids = |practices: &[&Practice]| -> Vec<String> {
        practices.iter().map(|p| p.id.to_string()).collect()
    };

    let mut json = serde_json::to_value(practice).unwrap_or_default();
    json["adopted"] = serde_json::json!(adopted);
    json["dependencies"] = serde_json::json!(ids(dependencies));
    json["dependents"] = serde_json::json!(ids(dependents));
    json
}

fn print_practice_details_text<W: Write>(
    w: &mut W,
    practice: &Practice,
    adopted: bool,
    dependencies: &[&Practice],
    dependents: &[&Practice],
    config: &OutputConfig,
) -> io::Result<()> {
    let width = content_width(config);

    writeln!(
        w,
        "{} {}: {}",
        adoption_icon(adopted, config),
        colorize_id(practice.id.as_str(), config),
        practice.name
    )?;

    let tier = practice
        .maturity_level
        .map_or_else(|| "-".to_string(), |level| level.to_string());
    writeln!(
        w,
        "{}  {}    {}  {}",
        dimmed("Category:", config),
        colorize_category(practice.category, config),
        dimmed("Maturity:", config),
        tier
    )?;

    print_text_section(w, "Description", &practice.description, width, config)?;
    print_list_section(w, "Requirements", &practice.requirements, width, config)?;
    print_list_section(w, "Benefits", &practice.benefits, width, config)?;

    for (title, related, arrow) in [
        ("Depends on", dependencies, "→"),
        ("Depended on by", dependents, "←"),
    ] {
        if related.is_empty() {
            continue;
        }
        writeln!(w)?;
        writeln!(w, "{} ({}):", bold(title, config), related.len())?;
        let arrow = if config.use_ascii {
            if arrow == "→" { "->" } else { "<-" }
        } else {
            arrow
        };
        for other in related {
            writeln!(
                w,
                "  {} {} {}",
                dimmed(arrow, config),
                colorize_id(other.id.as_str(), config),
                other.name
            )?;
        }
    }

    Ok(())
}

fn print_flat_text<W: Write>(w: &mut W, nodes: &[FlatNode], config: &OutputConfig) -> io::Result<()> {
    if nodes.is_empty() {
        writeln!(w, "No practices.")?;
        return Ok(());
    }

    for node in nodes {
        writeln!(
            w,
            "{} {} {} {}",
            dimmed(&format!("L{}", node.level), config),
            adoption_icon(node.adopted, config),
            colorize_id(node.id().as_str(), config),
            node.practice.name
        )?;
    }
    Ok(())
}

fn print_recommendation_text<W: Write>(
    w: &mut W,
    recommendation: &Recommendation,
    config: &OutputConfig,
) -> io::Result<()> {
    match recommendation {
        Recommendation::Next(practice) => {
            writeln!(
                w,
                "{} {} {}",
                bold("Next:", config),
                colorize_id(practice.id.as_str(), config),
                practice.name
            )?;
            print_text_section(w, "Why", &practice.description, content_width(config), config)
        }
        Recommendation::Complete => {
            writeln!(w, "{}", success("All practices adopted.", config))
        }
        Recommendation::Blocked { remaining } => writeln!(
            w,
            "{} {remaining} practice(s) remain, but none has all of its dependencies adopted.",
            color::error("Blocked:", config)
        ),
    }
}

fn print_candidates_text<W: Write>(
    w: &mut W,
    candidates: &[&Practice],
    config: &OutputConfig,
) -> io::Result<()> {
    if candidates.is_empty() {
        writeln!(w, "No eligible practices.")?;
        return Ok(());
    }

    writeln!(w, "{} eligible practice(s):", candidates.len())?;
    writeln!(w)?;
    for (rank, practice) in candidates.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {} {}",
            rank + 1,
            colorize_id(practice.id.as_str(), config),
            practice.name
        )?;
    }
    Ok(())
}

fn print_progress_text<W: Write>(
    w: &mut W,
    progress: &AdoptionProgress,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} of {} practices adopted ({})",
        progress.adopted,
        progress.total,
        bold(&format!("{}%", progress.percentage), config)
    )
}

fn print_edge_check_text<W: Write>(
    w: &mut W,
    from: &str,
    to: &str,
    closes_cycle: bool,
    config: &OutputConfig,
) -> io::Result<()> {
    let edge = format!(
        "{} -> {}",
        colorize_id(from, config),
        colorize_id(to, config)
    );
    if closes_cycle {
        writeln!(w, "{} {edge} would create a cycle", color::error("no:", config))
    } else {
        writeln!(w, "{} {edge} keeps the graph acyclic", success("ok:", config))
    }
}
