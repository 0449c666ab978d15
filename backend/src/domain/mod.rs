//! Domain primitives, the credit check state machine, and its ports.
//!
//! Purpose: keep the lookup, the view state, and the render decisions free of
//! transport concerns. Inbound adapters only call into this module.
//!
//! Public surface:
//! - `CreditRecord`, `CreditStatus`, `RecordSet`: the static dataset.
//! - `ViewState`, `ViewPhase`: presentation state per viewer.
//! - `CreditCheckController`: submission handling with simulated latency.
//! - `present`, `form_controls`: pure render decisions.
//! - `ViewerRegistry`: one controller per browser session.
//! - `Error`, `ErrorCode`, `TraceId`: infrastructure failures and correlation.

pub mod credit_check;
pub mod credit_record;
pub mod error;
pub mod ports;
pub mod presentation;
pub mod record_set;
pub mod trace_id;
pub mod view_state;
pub mod viewers;

pub use self::credit_check::{
    CheckPorts, CheckSettings, CreditCheckController, DEFAULT_LOOKUP_DELAY, EMPTY_QUERY_MESSAGE,
    ParseResolutionPolicyError, PendingLookup, Resolution, ResolutionPolicy, Submission,
    not_found_message,
};
pub use self::credit_record::{CreditRecord, CreditRecordValidationError, CreditStatus, RecordEmail};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::presentation::{
    CardPalette, FormControls, LOADING_TEXT, PLACEHOLDER_TEXT, Presentation, ResultCard,
    form_controls, present,
};
pub use self::record_set::{RecordSet, RecordSetError, normalize_query};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::view_state::{LookupOutcome, ViewPhase, ViewState};
pub use self::viewers::{DEFAULT_MAX_VIEWERS, ViewerId, ViewerIdError, ViewerRegistry};
