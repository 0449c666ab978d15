//! Behaviour tests for the credit check flow.
//!
//! Scenarios drive a controller on a paused single-threaded runtime so the
//! simulated latency elapses instantly and deterministically.

#![allow(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::time::Duration;

use concreds::domain::ports::{StaticRecordLookup, TokioLatency};
use concreds::domain::{
    CheckPorts, CheckSettings, CreditCheckController, DEFAULT_LOOKUP_DELAY, PendingLookup,
    RecordSet, Resolution, ResolutionPolicy, Submission, ViewState,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct CreditCheckWorld {
    runtime: Runtime,
    controller: RefCell<Option<CreditCheckController>>,
    pending: RefCell<Vec<PendingLookup>>,
    resolutions: RefCell<Vec<Resolution>>,
    last_rejected: Cell<bool>,
}

impl CreditCheckWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("paused runtime");
        Self {
            runtime,
            controller: RefCell::new(None),
            pending: RefCell::new(Vec::new()),
            resolutions: RefCell::new(Vec::new()),
            last_rejected: Cell::new(false),
        }
    }

    fn controller(&self) -> CreditCheckController {
        self.controller
            .borrow()
            .clone()
            .expect("credit check configured")
    }

    fn view(&self) -> ViewState {
        self.controller().snapshot()
    }

    fn submit(&self, query: &str) {
        let _entered = self.runtime.enter();
        match self.controller().submit(query) {
            Submission::Rejected => self.last_rejected.set(true),
            Submission::Scheduled(pending) => {
                self.last_rejected.set(false);
                self.pending.borrow_mut().push(pending);
            }
        }
    }
}

#[fixture]
fn world() -> CreditCheckWorld {
    CreditCheckWorld::new()
}

#[given("a credit check using the {policy} policy")]
fn a_credit_check_using_policy(world: &CreditCheckWorld, policy: ResolutionPolicy) {
    let lookup = StaticRecordLookup::new(RecordSet::sample().expect("sample data"));
    let controller = CreditCheckController::new(
        CheckPorts::new(Arc::new(lookup), Arc::new(TokioLatency)),
        CheckSettings {
            lookup_delay: DEFAULT_LOOKUP_DELAY,
            resolution: policy,
        },
    );
    *world.controller.borrow_mut() = Some(controller);
}

#[when("the user submits \"{email}\"")]
fn the_user_submits(world: &CreditCheckWorld, email: String) {
    world.submit(&email);
}

#[when("the user submits an empty email")]
fn the_user_submits_an_empty_email(world: &CreditCheckWorld) {
    world.submit("");
}

#[when("{millis:u64} milliseconds pass")]
fn milliseconds_pass(world: &CreditCheckWorld, millis: u64) {
    world
        .runtime
        .block_on(tokio::time::sleep(Duration::from_millis(millis)));
}

#[when("the lookup delay elapses")]
fn the_lookup_delay_elapses(world: &CreditCheckWorld) {
    let pending: Vec<PendingLookup> = world.pending.borrow_mut().drain(..).collect();
    for lookup in pending {
        let resolution = world
            .runtime
            .block_on(lookup.resolved())
            .expect("lookup task completes");
        world.resolutions.borrow_mut().push(resolution);
    }
}

#[then("the view is loading")]
fn the_view_is_loading(world: &CreditCheckWorld) {
    let view = world.view();
    assert!(view.is_loading());
    assert!(view.result().is_none() && view.error_message().is_none());
}

#[then("the view is not loading")]
fn the_view_is_not_loading(world: &CreditCheckWorld) {
    assert!(!world.view().is_loading());
}

#[then("the result shows \"{name}\" with status {status}")]
fn the_result_shows(world: &CreditCheckWorld, name: String, status: String) {
    let view = world.view();
    let record = view.result().expect("a record is shown");
    assert_eq!(record.name(), name);
    assert_eq!(record.credit_status().code(), status);
    assert!(!view.is_loading());
}

#[then("no error is shown")]
fn no_error_is_shown(world: &CreditCheckWorld) {
    assert_eq!(world.view().error_message(), None);
}

#[then("no result is shown")]
fn no_result_is_shown(world: &CreditCheckWorld) {
    assert!(world.view().result().is_none());
}

#[then("the error suggests the sample emails")]
fn the_error_suggests_the_sample_emails(world: &CreditCheckWorld) {
    assert_eq!(
        world.view().error_message(),
        Some(r#"Email not found. Try "aa@aa.com" or "bb@bb.com"."#)
    );
}

#[then("the error reads \"{message}\"")]
fn the_error_reads(world: &CreditCheckWorld, message: String) {
    assert_eq!(world.view().error_message(), Some(message.as_str()));
}

#[then("no lookup was scheduled")]
fn no_lookup_was_scheduled(world: &CreditCheckWorld) {
    assert!(world.last_rejected.get());
    assert!(world.pending.borrow().is_empty());
}

#[then("{count:usize} lookup was discarded")]
fn lookups_were_discarded(world: &CreditCheckWorld, count: usize) {
    let discarded = world
        .resolutions
        .borrow()
        .iter()
        .filter(|resolution| **resolution == Resolution::Discarded)
        .count();
    assert_eq!(discarded, count);
}

#[scenario(
    path = "tests/features/credit_check.feature",
    name = "Known email resolves to an OK record"
)]
fn known_email_resolves(world: CreditCheckWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/credit_check.feature",
    name = "Padded upper-case email still matches"
)]
fn padded_email_matches(world: CreditCheckWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/credit_check.feature",
    name = "Unknown email suggests the sample addresses"
)]
fn unknown_email_suggests(world: CreditCheckWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/credit_check.feature",
    name = "Blank email is rejected immediately"
)]
fn blank_email_rejected(world: CreditCheckWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/credit_check.feature",
    name = "A newer submission wins under latest-submission"
)]
fn newer_submission_wins(world: CreditCheckWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/credit_check.feature",
    name = "Blank resubmission wins under latest-submission"
)]
fn blank_resubmission_wins(world: CreditCheckWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/credit_check.feature",
    name = "The last timer to fire wins under last-resolved"
)]
fn last_timer_wins(world: CreditCheckWorld) {
    drop(world);
}
