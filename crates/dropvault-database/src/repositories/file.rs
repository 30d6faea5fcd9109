//! File metadata repository.

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_entity::file::FileRecord;

use crate::item::{optional_s, require_s};

/// Repository for file metadata records keyed by their secret-derived
/// identifier.
#[derive(Debug, Clone)]
pub struct FileRepository {
    client: Client,
    table: String,
}

impl FileRepository {
    /// Creates a repository over the given table.
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Writes a metadata record. An existing record with the same
    /// identifier is overwritten, matching the deterministic derivation:
    /// the same (secret, filename) pair always maps to the same item.
    pub async fn put(&self, record: &FileRecord) -> AppResult<()> {
        let mut request = self
            .client
            .put_item()
            .table_name(&self.table)
            .item("id", AttributeValue::S(record.id.clone()))
            .item("fileName", AttributeValue::S(record.file_name.clone()));

        if let Some(owner) = &record.owner_id {
            request = request.item("userId", AttributeValue::S(owner.clone()));
        }

        request
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to insert file record: {e}")))?;

        tracing::debug!(id = %record.id, "File record created");
        Ok(())
    }

    /// Fetches a record by identifier; `None` when no record exists.
    pub async fn get(&self, id: &str) -> AppResult<Option<FileRecord>> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to get file record: {e}")))?;

        match out.item() {
            Some(item) => Ok(Some(decode_record(item)?)),
            None => Ok(None),
        }
    }

    /// Deletes a record by identifier.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::database(format!("Failed to delete file record: {e}")))?;

        tracing::debug!(id, "File record deleted");
        Ok(())
    }

    /// Lists every record, following pagination until the scan is
    /// exhausted.
    pub async fn list(&self) -> AppResult<Vec<FileRecord>> {
        let mut records = Vec::new();
        let mut last_evaluated_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let out = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(last_evaluated_key.take())
                .send()
                .await
                .map_err(|e| AppError::database(format!("Failed to list file records: {e}")))?;

            for item in out.items() {
                records.push(decode_record(item)?);
            }

            match out.last_evaluated_key() {
                Some(key) => last_evaluated_key = Some(key.clone()),
                None => break,
            }
        }

        Ok(records)
    }
}

/// Decodes a DynamoDB item into a [`FileRecord`].
fn decode_record(item: &HashMap<String, AttributeValue>) -> AppResult<FileRecord> {
    Ok(FileRecord {
        id: require_s(item, "id")?,
        file_name: require_s(item, "fileName")?,
        owner_id: optional_s(item, "userId"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_requires_file_name() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S("abc".to_string()));
        let err = decode_record(&item).unwrap_err();
        assert_eq!(err.kind, dropvault_core::ErrorKind::Serialization);
    }

    #[test]
    fn decode_full_record() {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S("abc".to_string()));
        item.insert(
            "fileName".to_string(),
            AttributeValue::S("report.pdf".to_string()),
        );
        item.insert("userId".to_string(), AttributeValue::S("u_1".to_string()));

        let record = decode_record(&item).unwrap();
        assert_eq!(record.id, "abc");
        assert_eq!(record.file_name, "report.pdf");
        assert_eq!(record.owner_id.as_deref(), Some("u_1"));
    }
}
