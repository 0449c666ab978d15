//! Presentation state held by a credit check controller.
//!
//! ## Invariants
//! - A result record and an error message are never present together; both
//!   are variants of one optional outcome.
//! - While loading, no outcome is present: starting a lookup clears it and
//!   every transition that sets an outcome also clears the loading flag.

use super::CreditRecord;

/// Coarse phase derived from a [`ViewState`], one per visual presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPhase {
    /// Nothing submitted yet.
    Idle,
    /// A lookup is pending.
    Loading,
    /// The last resolved lookup found a record.
    Success,
    /// The last submission failed (empty query or unknown email).
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Found(CreditRecord),
    Failed(String),
}

/// What a resolved lookup produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A record matched.
    Found(CreditRecord),
    /// No record matched; carries the user-facing message.
    NotFound(String),
}

/// Query text, outcome, and loading flag for one viewer.
///
/// # Examples
/// ```
/// use concreds::domain::{ViewPhase, ViewState};
///
/// let state = ViewState::default();
/// assert_eq!(state.phase(), ViewPhase::Idle);
/// assert!(state.result().is_none() && state.error_message().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    query_email: String,
    outcome: Option<Outcome>,
    is_loading: bool,
}

impl ViewState {
    /// Text currently in the email field.
    pub fn query_email(&self) -> &str {
        self.query_email.as_str()
    }

    /// Record found by the last resolved lookup.
    pub fn result(&self) -> Option<&CreditRecord> {
        match &self.outcome {
            Some(Outcome::Found(record)) => Some(record),
            _ => None,
        }
    }

    /// Message describing why the last submission failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failed(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether a lookup is pending.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Derive the current phase.
    pub fn phase(&self) -> ViewPhase {
        if self.is_loading {
            return ViewPhase::Loading;
        }
        match self.outcome {
            None => ViewPhase::Idle,
            Some(Outcome::Found(_)) => ViewPhase::Success,
            Some(Outcome::Failed(_)) => ViewPhase::Error,
        }
    }

    pub(crate) fn set_query(&mut self, query: impl Into<String>) {
        self.query_email = query.into();
    }

    /// Surface an error without a lookup.
    pub(crate) fn reject(&mut self, message: impl Into<String>) {
        self.outcome = Some(Outcome::Failed(message.into()));
        self.is_loading = false;
    }

    pub(crate) fn begin_lookup(&mut self) {
        self.outcome = None;
        self.is_loading = true;
    }

    pub(crate) fn resolve(&mut self, outcome: LookupOutcome) {
        self.outcome = Some(match outcome {
            LookupOutcome::Found(record) => Outcome::Found(record),
            LookupOutcome::NotFound(message) => Outcome::Failed(message),
        });
        self.is_loading = false;
    }
}
