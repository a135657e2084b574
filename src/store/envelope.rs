//! Response envelope returned by every data source call
//!
//! Mirrors the hosted backend's response shape: an overall `success` flag
//! with an optional `message`, a `data` payload for reads, and per-record
//! `results` for batch writes. A batch call can succeed overall while some
//! of its records fail.

/// A field-level validation error attached to a failed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of one record in a batch write
#[derive(Debug, Clone, PartialEq)]
pub struct RecordResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub errors: Vec<FieldError>,
    pub message: Option<String>,
}

impl<T> RecordResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: Vec::new(),
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            data: None,
            errors,
            message: Some(message.into()),
        }
    }

    /// The most specific message available for a failed record
    pub fn failure_message(&self) -> Option<&str> {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .or(self.message.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub results: Option<Vec<RecordResult<T>>>,
}

impl<T> Envelope<T> {
    pub fn ok(data: Option<T>) -> Self {
        Self {
            success: true,
            message: None,
            data,
            results: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            results: None,
        }
    }

    pub fn batch(results: Vec<RecordResult<T>>) -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            results: Some(results),
        }
    }
}
