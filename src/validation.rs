//! Goal validation for the creation form.
//!
//! DESIGN
//! ======
//! Validation is pure and cheap so the form can re-run it on every keystroke.
//! Each index reports at most one field error (the first rule it breaks); the
//! list-level count condition is reported separately so a short list yields a
//! "missing entries" error in addition to the per-field ones.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::fmt;

use crate::model::GOAL_COUNT;

/// Upper bound on a goal's length, in characters.
pub const MAX_GOAL_CHARS: usize = 30;

// =============================================================================
// ERRORS
// =============================================================================

/// Why a single goal string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("enter a goal")]
    Empty,
    #[error("goal is {len} characters; at most 30 allowed")]
    TooLong { len: usize },
    #[error("'{ch}' is not allowed; use letters, digits, or Japanese characters")]
    InvalidCharacter { ch: char },
}

/// List-level failure: the number of non-empty goals is not eight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CountError {
    #[error("enter 8 goals ({found} given)")]
    Missing { found: usize },
    #[error("enter exactly 8 goals ({found} given)")]
    TooMany { found: usize },
}

/// Structured validation failure, keyed by candidate index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    fields: Vec<(usize, FieldError)>,
    count: Option<CountError>,
}

impl ValidationReport {
    /// Field error for one index, if that index failed.
    #[must_use]
    pub fn field_error(&self, index: usize) -> Option<FieldError> {
        self.fields
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, err)| *err)
    }

    /// All field errors in index order.
    #[must_use]
    pub fn field_errors(&self) -> &[(usize, FieldError)] {
        &self.fields
    }

    #[must_use]
    pub fn count_error(&self) -> Option<CountError> {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.count.is_none()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(count) = self.count {
            write!(f, "{count}")?;
            first = false;
        }
        for (index, err) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "goal {}: {err}", index + 1)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

// =============================================================================
// VALID GOALS
// =============================================================================

/// Exactly eight trimmed goal strings that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidGoals(Vec<String>);

impl ValidGoals {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

// =============================================================================
// RULES
// =============================================================================

/// ASCII letters and digits, Hiragana, Katakana, and CJK ideographs.
#[must_use]
pub fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ('\u{3040}'..='\u{309F}').contains(&ch)
        || ('\u{30A0}'..='\u{30FF}').contains(&ch)
        || ('\u{4E00}'..='\u{9FAF}').contains(&ch)
}

/// Validate one goal, returning its trimmed form.
///
/// # Errors
///
/// Returns the first rule the trimmed value breaks.
pub fn validate_goal(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }
    let len = trimmed.chars().count();
    if len > MAX_GOAL_CHARS {
        return Err(FieldError::TooLong { len });
    }
    if let Some(ch) = trimmed.chars().find(|ch| !is_allowed_char(*ch)) {
        return Err(FieldError::InvalidCharacter { ch });
    }
    Ok(trimmed.to_owned())
}

/// Validate a candidate goal list.
///
/// # Errors
///
/// Returns a [`ValidationReport`] listing every failing index plus the
/// count condition when the list does not hold exactly eight non-empty goals.
pub fn validate_goals<S: AsRef<str>>(candidates: &[S]) -> Result<ValidGoals, ValidationReport> {
    let mut report = ValidationReport::default();
    let mut goals = Vec::with_capacity(GOAL_COUNT);

    for (index, raw) in candidates.iter().enumerate() {
        match validate_goal(raw.as_ref()) {
            Ok(goal) => goals.push(goal),
            Err(err) => report.fields.push((index, err)),
        }
    }

    let found = candidates
        .iter()
        .filter(|raw| !raw.as_ref().trim().is_empty())
        .count();
    report.count = match found.cmp(&GOAL_COUNT) {
        std::cmp::Ordering::Less => Some(CountError::Missing { found }),
        std::cmp::Ordering::Greater => Some(CountError::TooMany { found }),
        std::cmp::Ordering::Equal => None,
    };

    if report.is_empty() { Ok(ValidGoals(goals)) } else { Err(report) }
}
