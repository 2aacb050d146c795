//! Response types for store operations.

use serde::{Deserialize, Serialize};

use crate::attribute_value::Document;

/// Output for the `PutItem` operation. Carries no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {}

/// Output for the `GetItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    /// The stored document, or `None` when no document occupies the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Document>,
}

/// Output for a `DeleteItem` that asked for the old document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemOutput {
    /// The document as it was before removal, or `None` if the key was empty.
    #[serde(rename = "Attributes", skip_serializing_if = "Option::is_none")]
    pub item: Option<Document>,
}

/// Output for the `UpdateItem` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemOutput {
    /// The projection selected by `ReturnValues`; `None` when no projection
    /// was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Document>,
}

/// Output for the `ListTables` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesOutput {
    /// Table names in ascending order.
    #[serde(default)]
    pub table_names: Vec<String>,
}

/// Table metadata returned by `DescribeTable`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    /// The table name.
    pub table_name: String,
    /// The attribute addressing each document.
    pub primary_key_attribute: String,
    /// Number of stored documents.
    pub item_count: u64,
    /// Approximate size of all stored documents in bytes.
    pub table_size_bytes: u64,
    /// Creation time in epoch seconds.
    pub creation_date_time: f64,
}

/// Output for the `DescribeTable` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableOutput {
    /// The table description.
    pub table: TableDescription,
}
