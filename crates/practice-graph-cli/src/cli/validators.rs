//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use practice_graph::PracticeId;

/// Validate a practice id.
///
/// Delegates to [`PracticeId::parse`] so the command line accepts exactly the
/// ids a dataset can contain.
pub fn validate_practice_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    PracticeId::parse(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}
