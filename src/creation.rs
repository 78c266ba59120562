//! Creation flow: the eight-field goal form and its submission.
//!
//! DESIGN
//! ======
//! `GoalForm` is plain data: every `set_goal` re-runs validation so inline
//! errors stay live. `CreationFlow` wraps a form with the submission state
//! machine: validate, refuse duplicate submits while one is in flight, call
//! the create endpoint, and hand back the new board's path.
//!
//! ERROR HANDLING
//! ==============
//! Invalid forms never reach the network. A rejected create surfaces the
//! server's `error` string (or a generic message) and leaves the form as it
//! was so the user can retry by hand.

#[cfg(test)]
#[path = "creation_test.rs"]
mod creation_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::api::{ApiError, GoalsApi};
use crate::model::{BingoId, GOAL_COUNT};
use crate::validation::{CountError, FieldError, ValidGoals, ValidationReport, validate_goals};

pub const GENERIC_CREATE_ERROR: &str = "failed to create bingo";

// =============================================================================
// FORM
// =============================================================================

/// Eight goal inputs plus the report from the latest validation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalForm {
    values: Vec<String>,
    report: Option<ValidationReport>,
}

impl Default for GoalForm {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalForm {
    /// Eight empty inputs; no errors are shown until the first edit.
    #[must_use]
    pub fn new() -> Self {
        Self { values: vec![String::new(); GOAL_COUNT], report: None }
    }

    /// Update one input and re-validate the whole form. Out-of-range
    /// indexes are ignored.
    pub fn set_goal(&mut self, index: usize, value: impl Into<String>) {
        let Some(slot) = self.values.get_mut(index) else {
            return;
        };
        *slot = value.into();
        let _ = self.validate();
    }

    /// Replace every input with `candidates` and re-validate. The list keeps
    /// its length, so a short or long candidate list reports a count error.
    pub fn set_goals<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = candidates.into_iter().map(Into::into).collect();
        let _ = self.validate();
    }

    /// Re-run validation and remember the report.
    ///
    /// # Errors
    ///
    /// Returns the report when any rule fails.
    pub fn validate(&mut self) -> Result<ValidGoals, ValidationReport> {
        let result = validate_goals(&self.values);
        self.report = result.as_ref().err().cloned();
        result
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn field_error(&self, index: usize) -> Option<FieldError> {
        self.report.as_ref().and_then(|report| report.field_error(index))
    }

    #[must_use]
    pub fn count_error(&self) -> Option<CountError> {
        self.report.as_ref().and_then(ValidationReport::count_error)
    }

    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// Back to eight empty inputs with no errors shown.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// FLOW
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CreationError {
    #[error("{0}")]
    Invalid(ValidationReport),
    #[error("a submission is already in progress")]
    Busy,
    #[error("{message}")]
    Rejected { message: String },
    #[error("failed to create bingo: {0}")]
    Api(ApiError),
}

/// A newly created bingo and the page to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedBoard {
    pub bingo_id: BingoId,
    pub path: String,
}

pub struct CreationFlow {
    api: Arc<dyn GoalsApi>,
    form: Mutex<GoalForm>,
    submitting: AtomicBool,
}

/// Clears the in-flight flag however `submit` exits.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CreationFlow {
    #[must_use]
    pub fn new(api: Arc<dyn GoalsApi>) -> Self {
        Self { api, form: Mutex::new(GoalForm::new()), submitting: AtomicBool::new(false) }
    }

    /// Edit one input; returns that input's error after re-validation.
    pub fn set_goal(&self, index: usize, value: impl Into<String>) -> Option<FieldError> {
        let mut form = self.lock();
        form.set_goal(index, value);
        form.field_error(index)
    }

    /// Replace the whole candidate list; returns the resulting report, if any.
    pub fn set_goals<I, S>(&self, candidates: I) -> Option<ValidationReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut form = self.lock();
        form.set_goals(candidates);
        form.report().cloned()
    }

    /// Copy of the current form, for rendering.
    #[must_use]
    pub fn form(&self) -> GoalForm {
        self.lock().clone()
    }

    /// True while a create request is in flight; the submit control should
    /// be disabled.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Validate and submit the form.
    ///
    /// # Errors
    ///
    /// - [`CreationError::Busy`] if a submission is already in flight
    /// - [`CreationError::Invalid`] if validation fails (no request is sent)
    /// - [`CreationError::Rejected`] if the server answers non-success
    /// - [`CreationError::Api`] for transport or decode failures
    pub async fn submit(&self) -> Result<CreatedBoard, CreationError> {
        if self.submitting.swap(true, Ordering::AcqRel) {
            return Err(CreationError::Busy);
        }
        let _guard = SubmitGuard(&self.submitting);

        let goals = self.lock().validate().map_err(CreationError::Invalid)?;

        match self.api.create_goals(goals.as_slice()).await {
            Ok(bingo_id) => {
                self.lock().clear();
                info!(%bingo_id, "create: bingo created");
                Ok(CreatedBoard { bingo_id, path: bingo_id.board_path() })
            }
            Err(ApiError::Status { status, message }) => {
                warn!(status, ?message, "create: rejected by server");
                Err(CreationError::Rejected { message: message.unwrap_or_else(|| GENERIC_CREATE_ERROR.to_owned()) })
            }
            Err(e) => {
                warn!(error = %e, "create: request failed");
                Err(CreationError::Api(e))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, GoalForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
