//! User repository.

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_entity::user::{CreateUser, UpdateUser, User};

use crate::item::require_s;

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    client: Client,
    table: String,
    email_index: String,
}

impl UserRepository {
    /// Creates a repository over the given table and email GSI.
    pub fn new(client: Client, table: impl Into<String>, email_index: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            email_index: email_index.into(),
        }
    }

    /// Inserts a new user record.
    pub async fn create(&self, id: &str, user: &CreateUser) -> AppResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item("id", AttributeValue::S(id.to_string()))
            .item("name", AttributeValue::S(user.name.clone()))
            .item("email", AttributeValue::S(user.email.clone()))
            .item("password", AttributeValue::S(user.password_hash.clone()))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        tracing::debug!(id, "User created");
        Ok(())
    }

    /// Fetches a user by id; `None` when no record exists.
    pub async fn get(&self, id: &str) -> AppResult<Option<User>> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        match out.item() {
            Some(item) => Ok(Some(decode_user(item)?)),
            None => Ok(None),
        }
    }

    /// Looks a user up by email via the email GSI.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let out = self
            .client
            .query()
            .table_name(&self.table)
            .index_name(&self.email_index)
            .key_condition_expression("email = :email")
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to query user by email: {e}")))?;

        match out.items().first() {
            Some(item) => Ok(Some(decode_user(item)?)),
            None => Ok(None),
        }
    }

    /// Updates name and/or email on an existing user.
    pub async fn update(&self, id: &str, update: &UpdateUser) -> AppResult<()> {
        let mut expressions = Vec::new();
        let mut request = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(id)");

        if let Some(name) = &update.name {
            expressions.push("#n = :name");
            request = request
                .expression_attribute_names("#n", "name")
                .expression_attribute_values(":name", AttributeValue::S(name.clone()));
        }
        if let Some(email) = &update.email {
            expressions.push("email = :email");
            request = request
                .expression_attribute_values(":email", AttributeValue::S(email.clone()));
        }

        if expressions.is_empty() {
            return Err(AppError::validation("Must update at least one field"));
        }

        request
            .update_expression(format!("SET {}", expressions.join(", ")))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to update user: {e}")))?;

        tracing::debug!(id, "User updated");
        Ok(())
    }

    /// Replaces the stored password hash.
    pub async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<()> {
        self.client
            .update_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(id)")
            .update_expression("SET password = :p")
            .expression_attribute_values(":p", AttributeValue::S(password_hash.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to update password: {e}")))?;

        Ok(())
    }

    /// Deletes a user by id.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to delete user: {e}")))?;

        tracing::debug!(id, "User deleted");
        Ok(())
    }

    /// Lists every user, following pagination until the scan is exhausted.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let mut users = Vec::new();
        let mut last_evaluated_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let out = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(last_evaluated_key.take())
                .send()
                .await
                .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

            for item in out.items() {
                users.push(decode_user(item)?);
            }

            match out.last_evaluated_key() {
                Some(key) => last_evaluated_key = Some(key.clone()),
                None => break,
            }
        }

        Ok(users)
    }
}

/// Decodes a DynamoDB item into a [`User`].
fn decode_user(item: &HashMap<String, AttributeValue>) -> AppResult<User> {
    Ok(User {
        id: require_s(item, "id")?,
        name: require_s(item, "name")?,
        email: require_s(item, "email")?,
        password_hash: require_s(item, "password")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_requires_password() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S("u_1".to_string()));
        item.insert("name".to_string(), AttributeValue::S("Ada".to_string()));
        item.insert(
            "email".to_string(),
            AttributeValue::S("ada@example.com".to_string()),
        );
        let err = decode_user(&item).unwrap_err();
        assert_eq!(err.kind, dropvault_core::ErrorKind::Serialization);
    }
}
