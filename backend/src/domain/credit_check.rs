//! Credit check controller: the submission state machine.
//!
//! ```text
//! Idle ──submit──▶ Loading ──delay, lookup──▶ Success | Error
//!   │                 ▲                          │
//!   └─submit("")──▶ Error ◀──────resubmit────────┘
//! ```
//!
//! A non-empty submission clears the previous outcome, marks the view as
//! loading, and spawns a task that waits for the configured latency before
//! looking the email up. Nothing cancels that task. What happens when it
//! resolves after a newer submission depends on [`ResolutionPolicy`].

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{Instrument, Span, debug};

use super::ports::{LatencySimulator, RecordLookup};
use super::{Error, LookupOutcome, TraceId, ViewPhase, ViewState};

/// Message shown when the email field is submitted blank.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter an email address.";

/// Latency applied before each lookup unless configured otherwise.
pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(1500);

/// Build the message shown when no record matches.
///
/// # Examples
/// ```
/// use concreds::domain::not_found_message;
///
/// let hints = vec!["aa@aa.com".to_owned(), "bb@bb.com".to_owned()];
/// assert_eq!(
///     not_found_message(&hints),
///     r#"Email not found. Try "aa@aa.com" or "bb@bb.com"."#
/// );
/// ```
#[must_use]
pub fn not_found_message(suggestions: &[String]) -> String {
    match suggestions {
        [] => "Email not found.".to_owned(),
        [only] => format!("Email not found. Try \"{only}\"."),
        [first, second, ..] => format!("Email not found. Try \"{first}\" or \"{second}\"."),
    }
}

/// What happens to a lookup that resolves after a newer submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Drop resolutions belonging to superseded submissions.
    #[default]
    LatestSubmission,
    /// Every resolution overwrites the view; the last timer to fire wins.
    LastResolved,
}

/// Raised when a resolution policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resolution policy '{0}'; expected latest-submission or last-resolved")]
pub struct ParseResolutionPolicyError(String);

impl FromStr for ResolutionPolicy {
    type Err = ParseResolutionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest-submission" => Ok(Self::LatestSubmission),
            "last-resolved" => Ok(Self::LastResolved),
            _ => Err(ParseResolutionPolicyError(s.to_owned())),
        }
    }
}

/// Tunables for a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSettings {
    /// Simulated latency before each lookup.
    pub lookup_delay: Duration,
    /// Handling of superseded lookups.
    pub resolution: ResolutionPolicy,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            lookup_delay: DEFAULT_LOOKUP_DELAY,
            resolution: ResolutionPolicy::default(),
        }
    }
}

/// Driven ports the controller depends on.
#[derive(Clone)]
pub struct CheckPorts {
    /// Record query.
    pub lookup: Arc<dyn RecordLookup>,
    /// Simulated latency.
    pub latency: Arc<dyn LatencySimulator>,
}

impl CheckPorts {
    /// Bundle the ports.
    pub fn new(lookup: Arc<dyn RecordLookup>, latency: Arc<dyn LatencySimulator>) -> Self {
        Self { lookup, latency }
    }
}

/// Result of [`CreditCheckController::submit`].
#[derive(Debug)]
pub enum Submission {
    /// The query was blank; the view already shows the error.
    Rejected,
    /// A lookup was scheduled.
    Scheduled(PendingLookup),
}

/// Final effect of a scheduled lookup on the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome was written; carries the phase it produced.
    Applied(ViewPhase),
    /// A newer submission superseded this one.
    Discarded,
}

/// Handle to a lookup waiting out its latency.
#[derive(Debug)]
pub struct PendingLookup {
    generation: u64,
    handle: JoinHandle<Resolution>,
}

impl PendingLookup {
    /// Submission counter value assigned to this lookup.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the lookup to resolve.
    ///
    /// # Errors
    /// Returns [`Error::internal`] if the lookup task panicked or was aborted.
    pub async fn resolved(self) -> Result<Resolution, Error> {
        self.handle
            .await
            .map_err(|err| Error::internal(format!("credit lookup task failed: {err}")))
    }
}

struct ControllerInner {
    state: Mutex<ViewState>,
    generation: AtomicU64,
    ports: CheckPorts,
    settings: CheckSettings,
}

impl ControllerInner {
    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn resolve_after_delay(&self, generation: u64, query: &str) -> Resolution {
        self.ports.latency.delay(self.settings.lookup_delay).await;

        let outcome = match self.ports.lookup.find_by_email(query) {
            Some(record) => LookupOutcome::Found(record),
            None => LookupOutcome::NotFound(not_found_message(
                &self.ports.lookup.suggested_emails(),
            )),
        };

        let mut state = self.lock_state();
        let latest = self.generation.load(Ordering::SeqCst);
        if self.settings.resolution == ResolutionPolicy::LatestSubmission && latest != generation {
            debug!(generation, latest, "stale credit lookup discarded");
            return Resolution::Discarded;
        }
        state.resolve(outcome);
        let phase = state.phase();
        debug!(generation, ?phase, "credit lookup resolved");
        Resolution::Applied(phase)
    }
}

/// Owns one viewer's [`ViewState`] and drives its transitions.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct CreditCheckController {
    inner: Arc<ControllerInner>,
}

impl CreditCheckController {
    /// Create a controller in the idle state.
    pub fn new(ports: CheckPorts, settings: CheckSettings) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                state: Mutex::new(ViewState::default()),
                generation: AtomicU64::new(0),
                ports,
                settings,
            }),
        }
    }

    /// Copy of the current view state.
    pub fn snapshot(&self) -> ViewState {
        self.inner.lock_state().clone()
    }

    /// Settings this controller was built with.
    pub fn settings(&self) -> CheckSettings {
        self.inner.settings
    }

    /// Record text typed into the email field without submitting it.
    pub fn update_query(&self, query: &str) {
        self.inner.lock_state().set_query(query);
    }

    /// Submit the form.
    ///
    /// Must be called within a tokio runtime when `query` is non-blank.
    pub fn submit(&self, query: &str) -> Submission {
        let mut state = self.inner.lock_state();
        state.set_query(query);
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            state.reject(EMPTY_QUERY_MESSAGE);
            return Submission::Rejected;
        }

        state.begin_lookup();
        drop(state);

        let delay_ms =
            u64::try_from(self.inner.settings.lookup_delay.as_millis()).unwrap_or(u64::MAX);
        debug!(generation, delay_ms, "credit lookup scheduled");

        let inner = Arc::clone(&self.inner);
        let query = query.to_owned();
        let task = async move { inner.resolve_after_delay(generation, &query).await };
        let handle = tokio::spawn(TraceId::propagate(task.instrument(Span::current())));
        Submission::Scheduled(PendingLookup { generation, handle })
    }
}

impl std::fmt::Debug for CreditCheckController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCheckController")
            .field("settings", &self.inner.settings)
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
