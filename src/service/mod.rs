//! Service facades
//!
//! One facade per entity, each a thin pass-through to a [`DataSource`]. The
//! facades turn response envelopes into plain values or a [`ServiceError`]
//! and log every failure before handing it back.

mod category;
mod contact;
mod task;
mod user;

pub use category::CategoryService;
pub use contact::{ContactService, is_valid_phone};
pub use task::TaskService;
pub use user::UserService;

use crate::store::{DataSource, Envelope, Record};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Lookup by id found nothing
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Input rejected before reaching the data source
    #[error("{0}")]
    Validation(String),

    /// The data source reported a failure
    #[error("{0}")]
    Remote(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fail on an unsuccessful envelope, carrying its message
fn ensure_success<T>(envelope: Envelope<T>, fallback: &str) -> ServiceResult<Envelope<T>> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ServiceError::Remote(
            envelope.message.unwrap_or_else(|| fallback.to_string()),
        ))
    }
}

/// Records of a fetch; a successful fetch without data is an empty list
pub(crate) fn into_list<T>(envelope: Envelope<Vec<T>>, fallback: &str) -> ServiceResult<Vec<T>> {
    Ok(ensure_success(envelope, fallback)?.data.unwrap_or_default())
}

pub(crate) fn into_record<T>(
    envelope: Envelope<T>,
    entity: &'static str,
    id: u64,
) -> ServiceResult<T> {
    ensure_success(envelope, &format!("Failed to fetch {}", entity))?
        .data
        .ok_or(ServiceError::NotFound { entity, id })
}

/// The first successful record of a single-record batch write
///
/// Any failed record fails the call with the first failure's message.
pub(crate) fn into_written<T>(envelope: Envelope<T>, fallback: &str) -> ServiceResult<T> {
    let envelope = ensure_success(envelope, fallback)?;
    let Some(results) = envelope.results else {
        return envelope
            .data
            .ok_or_else(|| ServiceError::Remote(fallback.to_string()));
    };

    if let Some(first) = results.iter().find(|r| !r.success) {
        return Err(ServiceError::Remote(
            first.failure_message().unwrap_or(fallback).to_string(),
        ));
    }

    results
        .into_iter()
        .find_map(|r| r.data)
        .ok_or_else(|| ServiceError::Remote(fallback.to_string()))
}

/// Shared body of every facade's `delete`
pub(crate) async fn delete_one<S, R>(source: &S, id: u64) -> ServiceResult<()>
where
    S: DataSource,
    R: Record,
{
    let fallback = format!("Failed to delete {}", R::ENTITY);
    into_written(source.delete_records::<R>(&[id]).await, &fallback)
        .map(|_| ())
        .inspect_err(|e| tracing::error!(error = %e, id, "Error deleting {}", R::ENTITY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FieldError, RecordResult};

    #[test]
    fn test_failed_envelope_is_remote_error() {
        let envelope: Envelope<Vec<u64>> = Envelope::failure("Backend unavailable");
        assert_eq!(
            into_list(envelope, "Failed to fetch tasks"),
            Err(ServiceError::Remote("Backend unavailable".to_string()))
        );

        let envelope: Envelope<Vec<u64>> = Envelope {
            success: false,
            message: None,
            data: None,
            results: None,
        };
        assert_eq!(
            into_list(envelope, "Failed to fetch tasks"),
            Err(ServiceError::Remote("Failed to fetch tasks".to_string()))
        );
    }

    #[test]
    fn test_fetch_without_data_is_empty() {
        let envelope: Envelope<Vec<u64>> = Envelope::ok(None);
        assert_eq!(into_list(envelope, "x"), Ok(Vec::new()));
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let envelope: Envelope<u64> = Envelope::ok(None);
        assert_eq!(
            into_record(envelope, "task", 3),
            Err(ServiceError::NotFound {
                entity: "task",
                id: 3
            })
        );
        assert_eq!(
            ServiceError::NotFound {
                entity: "task",
                id: 3
            }
            .to_string(),
            "task with ID 3 not found"
        );
    }

    #[test]
    fn test_written_uses_first_failure_message() {
        let envelope = Envelope::batch(vec![
            RecordResult::ok(1u64),
            RecordResult::failed(
                "Failed to create contact",
                vec![FieldError::new("phone", "Phone number is required")],
            ),
            RecordResult::failed("Second failure", Vec::new()),
        ]);
        assert_eq!(
            into_written(envelope, "Failed to create contact"),
            Err(ServiceError::Remote("Phone number is required".to_string()))
        );
    }

    #[test]
    fn test_written_returns_first_success() {
        let envelope = Envelope::batch(vec![RecordResult::ok(7u64)]);
        assert_eq!(into_written(envelope, "x"), Ok(7));
    }

    #[test]
    fn test_written_without_results_falls_back_to_data() {
        assert_eq!(into_written(Envelope::ok(Some(5u64)), "x"), Ok(5));
        assert_eq!(
            into_written(Envelope::<u64>::ok(None), "Failed to create task"),
            Err(ServiceError::Remote("Failed to create task".to_string()))
        );
    }
}
