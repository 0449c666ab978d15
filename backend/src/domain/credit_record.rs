//! Credit record data model.

use std::fmt;

use thiserror::Error;

/// Validation errors returned when constructing a [`CreditRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditRecordValidationError {
    /// Email is empty after trimming.
    #[error("record email must not be empty")]
    EmptyEmail,
    /// Email carries leading or trailing whitespace.
    #[error("record email must not contain surrounding whitespace")]
    EmailWhitespace,
    /// Holder name is empty after trimming.
    #[error("record name must not be empty")]
    EmptyName,
    /// Holder name carries leading or trailing whitespace.
    #[error("record name must not contain surrounding whitespace")]
    NameWhitespace,
}

/// Conceptual credit standing attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreditStatus {
    /// Credit is in good standing.
    Ok,
    /// Credit is not in good standing.
    NotOk,
}

impl CreditStatus {
    /// Human-readable badge text.
    ///
    /// # Examples
    /// ```
    /// use concreds::domain::CreditStatus;
    ///
    /// assert_eq!(CreditStatus::NotOk.label(), "Not OK");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NotOk => "Not OK",
        }
    }

    /// Stable machine-readable code used in JSON payloads.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::NotOk => "NOT_OK",
        }
    }

    /// Whether the status is in good standing.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Email key of a record, stored exactly as declared.
///
/// Storage is case-sensitive; comparisons go through [`RecordEmail::folded`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordEmail(String);

impl RecordEmail {
    /// Validate and construct an email key.
    pub fn new(email: impl Into<String>) -> Result<Self, CreditRecordValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(CreditRecordValidationError::EmptyEmail);
        }
        if email.trim() != email {
            return Err(CreditRecordValidationError::EmailWhitespace);
        }
        Ok(Self(email))
    }

    /// Borrow the email as declared.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lowercased form used for case-insensitive matching.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for RecordEmail {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable user entry looked up by email.
///
/// # Examples
/// ```
/// use concreds::domain::{CreditRecord, CreditStatus};
///
/// let record = CreditRecord::try_from_parts("aa@aa.com", "Alex Anderson", CreditStatus::Ok)
///     .expect("valid record");
/// assert_eq!(record.name(), "Alex Anderson");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditRecord {
    email: RecordEmail,
    name: String,
    credit_status: CreditStatus,
}

impl CreditRecord {
    /// Assemble a record from an already validated email.
    pub fn new(
        email: RecordEmail,
        name: impl Into<String>,
        credit_status: CreditStatus,
    ) -> Result<Self, CreditRecordValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CreditRecordValidationError::EmptyName);
        }
        if name.trim() != name {
            return Err(CreditRecordValidationError::NameWhitespace);
        }
        Ok(Self {
            email,
            name,
            credit_status,
        })
    }

    /// Validate raw parts and build a record.
    pub fn try_from_parts(
        email: &str,
        name: &str,
        credit_status: CreditStatus,
    ) -> Result<Self, CreditRecordValidationError> {
        Self::new(RecordEmail::new(email)?, name, credit_status)
    }

    /// Email key as declared.
    pub fn email(&self) -> &RecordEmail {
        &self.email
    }

    /// Record holder's display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Conceptual credit standing.
    pub fn credit_status(&self) -> CreditStatus {
        self.credit_status
    }
}
