use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::EntryField;

/// A form entry whose text is not a number.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field} '{input}' is not a number")]
pub struct InvalidEntry {
    pub field: EntryField,
    pub input: String,
}

impl InvalidEntry {
    pub fn new(
        field: EntryField,
        input: impl Into<String>,
    ) -> Self {
        Self {
            field,
            input: input.into(),
        }
    }
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a form entry into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
/// Returns an [`InvalidEntry`] naming `field` when the input is non-empty but not parseable.
pub fn parse_amount(
    field: EntryField,
    s: &str,
) -> Result<Decimal, InvalidEntry> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|e| {
            tracing::debug!(%field, input = %s, "invalid amount: {}", e);
            InvalidEntry::new(field, s)
        })
}

/// Parses a count entry (number of tanks or nozzles).
///
/// Returns `None` for anything that is not a non-negative integer.
/// Empty input is a count of zero.
pub fn parse_count(s: &str) -> Option<usize> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}
