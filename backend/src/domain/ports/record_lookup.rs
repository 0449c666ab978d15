//! Driven port for querying the record set.

use std::sync::Arc;

use crate::domain::{CreditRecord, RecordSet};

/// How many record emails are offered as hints when a lookup misses.
pub const SUGGESTION_LIMIT: usize = 2;

/// Domain port for finding a record by email.
#[cfg_attr(test, mockall::automock)]
pub trait RecordLookup: Send + Sync {
    /// Return the first record matching `query` case-insensitively, ignoring
    /// surrounding whitespace.
    fn find_by_email(&self, query: &str) -> Option<CreditRecord>;

    /// Emails suggested to the user when a lookup misses.
    fn suggested_emails(&self) -> Vec<String>;
}

/// In-memory adapter over an immutable [`RecordSet`].
///
/// # Examples
/// ```
/// use concreds::domain::RecordSet;
/// use concreds::domain::ports::{RecordLookup, StaticRecordLookup};
///
/// let lookup = StaticRecordLookup::new(RecordSet::sample().expect("sample data"));
/// let record = lookup.find_by_email("AA@aa.com").expect("record found");
/// assert_eq!(record.name(), "Alex Anderson");
/// ```
#[derive(Debug, Clone)]
pub struct StaticRecordLookup {
    records: Arc<RecordSet>,
}

impl StaticRecordLookup {
    /// Wrap a record set.
    pub fn new(records: RecordSet) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

impl RecordLookup for StaticRecordLookup {
    fn find_by_email(&self, query: &str) -> Option<CreditRecord> {
        self.records.find_by_email(query).cloned()
    }

    fn suggested_emails(&self) -> Vec<String> {
        self.records.suggested_emails(SUGGESTION_LIMIT)
    }
}
