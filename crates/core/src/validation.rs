//! Input validation utilities.
//!
//! Values are checked but stored exactly as supplied: lookups by name and email are
//! exact-match, so trimming on the way in would make stored keys unreachable.

use crate::{PortalError, PortalResult};

/// Returns `true` when no value is empty. Whitespace counts as content.
pub fn all_present(values: &[&str]) -> bool {
    values.iter().all(|v| !v.is_empty())
}

/// Fails with `InvalidInput(message)` unless every value is present.
pub fn require_all(values: &[&str], message: &str) -> PortalResult<()> {
    if all_present(values) {
        Ok(())
    } else {
        Err(PortalError::InvalidInput(message.to_string()))
    }
}
