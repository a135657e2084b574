//! Contact tool handlers

use crate::TaskDeckHandler;
use crate::formatting::format_contacts;
use crate::model::ContactDraft;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TaskDeckHandler {
    pub async fn handle_list_contacts(&self) -> McpResult<String> {
        let contacts = self
            .contacts
            .get_all()
            .await
            .map_err(validation::service_error)?;
        Ok(format_contacts(&contacts))
    }

    /// Contacts whose name or phone contains `query`
    pub async fn handle_search_contacts(&self, query: String) -> McpResult<String> {
        let contacts = self
            .contacts
            .search(query.trim())
            .await
            .map_err(validation::service_error)?;
        Ok(format_contacts(&contacts))
    }

    pub async fn handle_add_contact(&self, name: String, phone: String) -> McpResult<String> {
        let contact = self
            .contacts
            .create(ContactDraft { name, phone })
            .await
            .map_err(validation::service_error)?;
        Ok(format!(
            "Contact created with ID: {} ({}, phone: {})",
            contact.id, contact.name, contact.phone
        ))
    }

    /// Name and phone are both replaced
    pub async fn handle_update_contact(
        &self,
        id: u64,
        name: String,
        phone: String,
    ) -> McpResult<String> {
        let contact = self
            .contacts
            .update(id, ContactDraft { name, phone })
            .await
            .map_err(validation::service_error)?;
        Ok(format!(
            "Contact {} updated ({}, phone: {})",
            contact.id, contact.name, contact.phone
        ))
    }

    pub async fn handle_delete_contact(&self, id: u64) -> McpResult<String> {
        self.contacts
            .delete(id)
            .await
            .map_err(validation::service_error)?;
        Ok(format!("Contact {} deleted", id))
    }
}
