//! User tool handlers

use crate::TaskDeckHandler;
use crate::formatting::format_users;
use crate::model::UserDraft;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TaskDeckHandler {
    /// Every user, or only the one registered under `email`
    pub async fn handle_list_users(&self, email: Option<String>) -> McpResult<String> {
        let users = match email.filter(|e| !e.trim().is_empty()) {
            Some(email) => self
                .users
                .get_by_email(&email)
                .await
                .map(|user| user.into_iter().collect())
                .map_err(validation::service_error)?,
            None => self
                .users
                .get_all()
                .await
                .map_err(validation::service_error)?,
        };
        Ok(format_users(&users))
    }

    pub async fn handle_add_user(&self, name: String, phone: Option<String>) -> McpResult<String> {
        let user = self
            .users
            .create(UserDraft {
                name,
                phone: phone.filter(|p| !p.trim().is_empty()),
            })
            .await
            .map_err(validation::service_error)?;
        Ok(format!("User created with ID: {} ({})", user.id, user.name))
    }

    pub async fn handle_delete_user(&self, id: u64) -> McpResult<String> {
        self.users
            .delete(id)
            .await
            .map_err(validation::service_error)?;
        Ok(format!("User {} deleted", id))
    }
}

#[cfg(test)]
mod tests {
    use crate::TaskDeckHandler;

    #[tokio::test]
    async fn test_list_users_by_email() {
        let handler = TaskDeckHandler::with_fixtures().unwrap();
        handler
            .handle_add_user("ops@example.com".to_string(), None)
            .await
            .unwrap();

        let all = handler.handle_list_users(None).await.unwrap();
        assert!(all.starts_with("Found 2 user(s):"));

        let one = handler
            .handle_list_users(Some("OPS@example.com".to_string()))
            .await
            .unwrap();
        assert!(one.starts_with("Found 1 user(s):"));
        assert!(one.contains("ops@example.com"));

        let none = handler
            .handle_list_users(Some("nobody@example.com".to_string()))
            .await
            .unwrap();
        assert_eq!(none, "No users found");
    }
}
