use super::{ServiceError, ServiceResult, delete_one, into_list, into_record, into_written};
use crate::model::{User, UserDraft, UserPatch};
use crate::store::{Condition, DataSource, Query, SortDirection};
use std::sync::Arc;
use tracing::error;

/// User facade
pub struct UserService<S> {
    source: Arc<S>,
}

impl<S> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: DataSource> UserService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<User>> {
        let query = Query::new().order_by("name", SortDirection::Ascending);
        into_list(self.source.fetch_records(&query).await, "Failed to fetch users")
            .inspect_err(|e| error!(error = %e, "Error fetching users"))
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<User> {
        into_record(self.source.get_record_by_id(id).await, "user", id)
            .inspect_err(|e| error!(error = %e, id, "Error fetching user"))
    }

    /// The user whose name is `email`
    pub async fn get_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let query = Query::new().filter(Condition::equal_to("name", email.trim()));
        let users: Vec<User> = into_list(self.source.fetch_records(&query).await, "Failed to fetch users")
            .inspect_err(|e| error!(error = %e, "Error fetching user by email"))?;
        Ok(users.into_iter().next())
    }

    pub async fn create(&self, draft: UserDraft) -> ServiceResult<User> {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::Validation("Name is required".to_string()));
        }
        into_written(
            self.source.create_records(vec![draft]).await,
            "Failed to create user",
        )
        .inspect_err(|e| error!(error = %e, "Error creating user"))
    }

    pub async fn update(&self, id: u64, patch: UserPatch) -> ServiceResult<User> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ServiceError::Validation("Name is required".to_string()));
        }
        into_written(
            self.source.update_records(vec![(id, patch)]).await,
            "Failed to update user",
        )
        .inspect_err(|e| error!(error = %e, id, "Error updating user"))
    }

    pub async fn delete(&self, id: u64) -> ServiceResult<()> {
        delete_one::<S, User>(&self.source, id).await
    }
}
