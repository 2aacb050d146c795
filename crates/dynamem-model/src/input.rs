//! Request types for store operations.
//!
//! Field names serialize in `PascalCase` so the same structs decode the
//! DynamoDB JSON wire format used by the HTTP layer. Empty maps and unset
//! options are omitted when serializing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::Document;
use crate::types::ReturnValue;

/// Input for the `load` (bulk seed) operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadTableInput {
    /// The table to create (if absent) and seed.
    pub table_name: String,

    /// The attribute whose value addresses each document.
    pub primary_key_attribute: String,

    /// Documents to store, in order. Later duplicates overwrite earlier ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Document>,
}

/// Input for the `PutItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemInput {
    /// The name of the table to write to.
    pub table_name: String,

    /// The full document, including its primary-key attribute.
    pub item: Document,
}

/// Input for the `GetItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    /// The name of the table to read from.
    pub table_name: String,

    /// A partial document carrying the primary-key attribute.
    pub key: Document,
}

/// Input for the `DeleteItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemInput {
    /// The name of the table to delete from.
    pub table_name: String,

    /// A partial document carrying the primary-key attribute.
    pub key: Document,

    /// Return the document as it was before removal.
    ///
    /// On the wire this is `"ReturnValues": "ALL_OLD"`.
    #[serde(rename = "ReturnValues", default, with = "return_old_flag")]
    pub return_old: bool,
}

/// Input for the `UpdateItem` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemInput {
    /// The name of the table containing the document.
    pub table_name: String,

    /// A partial document carrying the primary-key attribute.
    pub key: Document,

    /// The update expression, e.g. `SET token = :t`.
    #[serde(default)]
    pub update_expression: String,

    /// `#name` placeholders to attribute names.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,

    /// `:value` placeholders to attribute values.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: Document,

    /// Which projection to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValue>,
}

/// Input for the `ListTables` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesInput {}

/// Input for the `DescribeTable` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableInput {
    /// The name of the table to describe.
    pub table_name: String,
}

/// Maps `return_old` to and from the `ReturnValues` wire field.
mod return_old_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::ReturnValue;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(return_old: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        let rv = if *return_old {
            ReturnValue::AllOld
        } else {
            ReturnValue::None
        };
        serializer.serialize_str(rv.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let rv = Option::<ReturnValue>::deserialize(deserializer)?;
        Ok(rv == Some(ReturnValue::AllOld))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute_value::AttributeValue;

    #[test]
    fn test_should_decode_update_item_wire_request() {
        let json = r##"{
            "TableName": "T",
            "Key": {"email": {"S": "a@b.com"}},
            "UpdateExpression": "SET #tok = :t",
            "ExpressionAttributeNames": {"#tok": "token"},
            "ExpressionAttributeValues": {":t": {"S": "y"}},
            "ReturnValues": "UPDATED_NEW"
        }"##;
        let input: UpdateItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.table_name, "T");
        assert_eq!(
            input.key.get("email"),
            Some(&AttributeValue::S("a@b.com".to_owned()))
        );
        assert_eq!(input.expression_attribute_names["#tok"], "token");
        assert_eq!(input.return_values, Some(ReturnValue::UpdatedNew));
    }

    #[test]
    fn test_should_map_delete_return_values_to_flag() {
        let with_old: DeleteItemInput = serde_json::from_str(
            r#"{"TableName":"T","Key":{"id":{"N":"1"}},"ReturnValues":"ALL_OLD"}"#,
        )
        .unwrap();
        assert!(with_old.return_old);

        let without: DeleteItemInput =
            serde_json::from_str(r#"{"TableName":"T","Key":{"id":{"N":"1"}}}"#).unwrap();
        assert!(!without.return_old);

        let json = serde_json::to_value(&with_old).unwrap();
        assert_eq!(json["ReturnValues"], "ALL_OLD");
    }

    #[test]
    fn test_should_decode_load_input_without_items() {
        let input: LoadTableInput =
            serde_json::from_str(r#"{"TableName":"Users","PrimaryKeyAttribute":"email"}"#).unwrap();
        assert_eq!(input.primary_key_attribute, "email");
        assert!(input.items.is_empty());
    }
}
