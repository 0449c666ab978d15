//! The static, ordered record set and its case-insensitive lookup.

use std::collections::HashSet;

use thiserror::Error;

use super::{CreditRecord, CreditRecordValidationError, CreditStatus};

/// Compiled-in sample data: `(email, name, status)` in display order.
const SAMPLE_RECORDS: &[(&str, &str, CreditStatus)] = &[
    ("aa@aa.com", "Alex Anderson", CreditStatus::Ok),
    ("bb@bb.com", "Bailey Brown", CreditStatus::NotOk),
];

/// Errors raised while assembling a [`RecordSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordSetError {
    /// A record failed validation.
    #[error("record {index} is invalid: {source}")]
    InvalidRecord {
        /// Position of the record in the input.
        index: usize,
        /// Why the record was rejected.
        #[source]
        source: CreditRecordValidationError,
    },
    /// Two records share an email once case is folded.
    #[error("duplicate record email: {email}")]
    DuplicateEmail {
        /// The repeated email, case-folded.
        email: String,
    },
}

/// Normalise free-form input into the form compared against record emails.
///
/// # Examples
/// ```
/// use concreds::domain::normalize_query;
///
/// assert_eq!(normalize_query("  BB@bb.COM "), "bb@bb.com");
/// ```
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Immutable, ordered list of records keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<CreditRecord>,
}

impl RecordSet {
    /// Build a record set, rejecting case-insensitive email collisions.
    pub fn new(records: Vec<CreditRecord>) -> Result<Self, RecordSetError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.email().folded()) {
                return Err(RecordSetError::DuplicateEmail {
                    email: record.email().to_string(),
                });
            }
        }
        Ok(Self { records })
    }

    /// The compiled-in sample set.
    ///
    /// # Examples
    /// ```
    /// use concreds::domain::RecordSet;
    ///
    /// let records = RecordSet::sample().expect("sample data is valid");
    /// assert_eq!(records.len(), 2);
    /// ```
    pub fn sample() -> Result<Self, RecordSetError> {
        let records = SAMPLE_RECORDS
            .iter()
            .enumerate()
            .map(|(index, (email, name, status))| {
                CreditRecord::try_from_parts(email, name, *status)
                    .map_err(|source| RecordSetError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Return the first record whose email matches `query` ignoring case and
    /// surrounding whitespace.
    pub fn find_by_email(&self, query: &str) -> Option<&CreditRecord> {
        let needle = normalize_query(query);
        self.records
            .iter()
            .find(|record| record.email().folded() == needle)
    }

    /// Up to `limit` record emails in dataset order, for hinting users.
    pub fn suggested_emails(&self, limit: usize) -> Vec<String> {
        self.records
            .iter()
            .take(limit)
            .map(|record| record.email().to_string())
            .collect()
    }

    /// Iterate records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &CreditRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
