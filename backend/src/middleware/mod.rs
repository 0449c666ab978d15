//! Request middleware.
//!
//! Purpose: attach correlation identifiers and request spans before any
//! handler runs.

pub mod trace;

pub use trace::Trace;
