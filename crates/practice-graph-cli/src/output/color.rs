//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Adopted: green  (adopted practices, passing validation)
//!   - Warning:         yellow (traversal caps, truncated branches)
//!   - Error:           red    (cycles, blocked recommendations)
//!   - Info/Reference:  cyan   (practice ids, tree root)
//!   - Category:        blue, magenta, yellow, white per category
//!   - Muted:           dimmed (field labels, connectors)
//!   - Emphasis:        bold   (section headers)

use colored::Colorize;
use practice_graph::Category;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Colorize a practice id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Colorize a category name.
pub(crate) fn colorize_category(category: Category, config: &OutputConfig) -> String {
    let text = category.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match category {
        Category::Automation => text.blue().to_string(),
        Category::Behavior => text.magenta().to_string(),
        Category::BehaviorEnabledAutomation => text.yellow().to_string(),
        Category::Core => text.white().bold().to_string(),
    }
}

/// Adoption marker, with ASCII fallback support.
pub(crate) fn adoption_icon(adopted: bool, config: &OutputConfig) -> String {
    let icon = match (adopted, config.use_ascii) {
        (true, true) => "+",
        (false, true) => "o",
        (true, false) => "✓",
        (false, false) => "○",
    };

    if !config.use_colors {
        return icon.to_string();
    }
    if adopted {
        icon.green().to_string()
    } else {
        icon.white().to_string()
    }
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
