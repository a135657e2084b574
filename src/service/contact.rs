use super::{ServiceError, ServiceResult, delete_one, into_list, into_record, into_written};
use crate::model::{Contact, ContactDraft};
use crate::store::{Condition, DataSource, Query, SortDirection, WhereGroup};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::error;

/// Optional leading `+`, then up to 16 digits not starting with 0
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"));
static PHONE_SEPARATORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-()]").expect("valid separator regex"));

/// Contacts are listed a page at a time
const PAGE_SIZE: usize = 100;

/// Permissive E.164-like check; spaces, dashes and parentheses are ignored
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = PHONE_SEPARATORS_RE.replace_all(phone, "");
    PHONE_RE.is_match(&digits)
}

fn validate(draft: &ContactDraft) -> ServiceResult<()> {
    if draft.name.trim().is_empty() {
        return Err(ServiceError::Validation("Name is required".to_string()));
    }
    if draft.phone.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Phone number is required".to_string(),
        ));
    }
    if !is_valid_phone(&draft.phone) {
        return Err(ServiceError::Validation(
            "Please enter a valid phone number".to_string(),
        ));
    }
    Ok(())
}

/// Contact facade
pub struct ContactService<S> {
    source: Arc<S>,
}

impl<S> Clone for ContactService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: DataSource> ContactService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// First page of contacts by name
    pub async fn get_all(&self) -> ServiceResult<Vec<Contact>> {
        let query = Query::new()
            .order_by("name", SortDirection::Ascending)
            .page(PAGE_SIZE, 0);
        into_list(self.source.fetch_records(&query).await, "Failed to fetch contacts")
            .inspect_err(|e| error!(error = %e, "Error fetching contacts"))
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<Contact> {
        into_record(self.source.get_record_by_id(id).await, "contact", id)
            .inspect_err(|e| error!(error = %e, id, "Error fetching contact"))
    }

    pub async fn create(&self, draft: ContactDraft) -> ServiceResult<Contact> {
        validate(&draft)?;
        into_written(
            self.source.create_records(vec![draft]).await,
            "Failed to create contact",
        )
        .inspect_err(|e| error!(error = %e, "Error creating contact"))
    }

    /// Replaces both name and phone
    pub async fn update(&self, id: u64, draft: ContactDraft) -> ServiceResult<Contact> {
        validate(&draft)?;
        into_written(
            self.source.update_records(vec![(id, draft)]).await,
            "Failed to update contact",
        )
        .inspect_err(|e| error!(error = %e, id, "Error updating contact"))
    }

    pub async fn delete(&self, id: u64) -> ServiceResult<()> {
        delete_one::<S, Contact>(&self.source, id).await
    }

    /// Contacts whose name or phone contains `query`, by name
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let query = Query::new()
            .group(WhereGroup::any_of(vec![
                Condition::contains("name", query),
                Condition::contains("phone", query),
            ]))
            .order_by("name", SortDirection::Ascending)
            .page(PAGE_SIZE, 0);
        into_list(self.source.fetch_records(&query).await, "Failed to search contacts")
            .inspect_err(|e| error!(error = %e, "Error searching contacts"))
    }
}
