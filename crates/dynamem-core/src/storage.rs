//! In-memory document storage for a single table.
//!
//! Each table addresses its documents by the value of one primary-key
//! attribute:
//!
//! ```text
//! HashMap<PrimaryKey, StoredItem>
//! ```
//!
//! Storage is not internally synchronized. The owning catalog is guarded by a
//! single lock per operation, so every mutation here runs to completion
//! without interleaving.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use dynamem_model::{AttributeValue, Document};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The primary-key attribute was not found in the key or item.
    #[error("missing required key attribute: {attr}")]
    MissingKeyAttribute {
        /// The name of the missing attribute.
        attr: String,
    },
    /// The primary-key attribute holds a value that cannot address a slot.
    #[error("key attribute '{attr}' has unsupported type {actual}: expected S, N or BOOL")]
    InvalidKeyType {
        /// The name of the attribute.
        attr: String,
        /// The actual type descriptor.
        actual: String,
    },
}

// ---------------------------------------------------------------------------
// Key types
// ---------------------------------------------------------------------------

/// The value addressing one document slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimaryKey(AttributeValue);

impl PrimaryKey {
    /// The underlying attribute value.
    #[must_use]
    pub fn value(&self) -> &AttributeValue {
        &self.0
    }
}

/// Extract the primary key from a key or a full item.
///
/// # Errors
///
/// Returns `StorageError::MissingKeyAttribute` if the attribute is absent and
/// `StorageError::InvalidKeyType` if its value is not a scalar.
pub fn extract_primary_key(key_attribute: &str, item: &Document) -> Result<PrimaryKey, StorageError> {
    let value = item
        .get(key_attribute)
        .ok_or_else(|| StorageError::MissingKeyAttribute {
            attr: key_attribute.to_owned(),
        })?;

    if !value.is_scalar() {
        return Err(StorageError::InvalidKeyType {
            attr: key_attribute.to_owned(),
            actual: value.type_descriptor().to_owned(),
        });
    }

    Ok(PrimaryKey(value.clone()))
}

// ---------------------------------------------------------------------------
// StoredItem
// ---------------------------------------------------------------------------

/// A document stored in the table, including its key attribute.
#[derive(Debug, Clone)]
struct StoredItem {
    attributes: Document,
    size: u64,
}

// ---------------------------------------------------------------------------
// TableStorage
// ---------------------------------------------------------------------------

/// In-memory storage for a single table.
#[derive(Debug)]
pub struct TableStorage {
    /// Primary-key value -> document.
    data: HashMap<PrimaryKey, StoredItem>,
    /// The attribute addressing each document.
    key_attribute: String,
    /// Total size of all documents in bytes (approximate).
    total_size: u64,
}

impl TableStorage {
    /// Creates a new empty `TableStorage` keyed by `key_attribute`.
    #[must_use]
    pub fn new(key_attribute: impl Into<String>) -> Self {
        Self {
            data: HashMap::new(),
            key_attribute: key_attribute.into(),
            total_size: 0,
        }
    }

    /// Returns the primary-key attribute name.
    #[must_use]
    pub fn key_attribute(&self) -> &str {
        &self.key_attribute
    }

    /// Returns the current item count.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns the total size of all documents in bytes.
    #[must_use]
    pub fn total_size_bytes(&self) -> u64 {
        self.total_size
    }

    /// Extract the primary key of `item` under this table's key attribute.
    pub fn primary_key(&self, item: &Document) -> Result<PrimaryKey, StorageError> {
        extract_primary_key(&self.key_attribute, item)
    }

    /// Inserts or replaces a document.
    ///
    /// Returns the previously stored document if one occupied the same key.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the item lacks a usable primary key.
    pub fn put_item(&mut self, item: Document) -> Result<Option<Document>, StorageError> {
        let primary_key = self.primary_key(&item)?;
        Ok(self.replace_item(primary_key, item))
    }

    /// Stores `item` in the slot addressed by `key`, whatever the item's own
    /// key attribute holds.
    ///
    /// Returns the previously stored document if the slot was occupied.
    pub fn replace_item(&mut self, key: PrimaryKey, item: Document) -> Option<Document> {
        let size = calculate_item_size(&item);
        let stored = StoredItem {
            attributes: item,
            size,
        };

        self.total_size += size;
        if let Some(old) = self.data.insert(key, stored) {
            self.total_size -= old.size;
            debug!(old_size = old.size, new_size = size, "replaced existing item");
            Some(old.attributes)
        } else {
            debug!(new_size = size, "inserted new item");
            None
        }
    }

    /// Retrieves a document by its primary key.
    #[must_use]
    pub fn get_item(&self, key: &PrimaryKey) -> Option<Document> {
        self.data.get(key).map(|item| item.attributes.clone())
    }

    /// Deletes a document by its primary key, returning it if it existed.
    pub fn delete_item(&mut self, key: &PrimaryKey) -> Option<Document> {
        let removed = self.data.remove(key)?;
        self.total_size -= removed.size;
        debug!(size = removed.size, "deleted item");
        Some(removed.attributes)
    }
}

// ---------------------------------------------------------------------------
// Size accounting
// ---------------------------------------------------------------------------

/// Approximate the stored size of a document.
///
/// Each attribute costs the byte length of its name plus the size of its
/// value. Strings cost their byte length, numbers roughly one byte per two
/// digits plus one, booleans and nulls one byte, and containers three bytes of
/// overhead plus their contents (one extra byte per element).
#[must_use]
pub fn calculate_item_size(item: &Document) -> u64 {
    item.iter()
        .map(|(name, value)| name.len() as u64 + calculate_value_size(value))
        .sum()
}

fn calculate_value_size(value: &AttributeValue) -> u64 {
    match value {
        AttributeValue::S(s) => s.len() as u64,
        AttributeValue::N(n) => {
            let digits = n.chars().filter(char::is_ascii_digit).count() as u64;
            digits.div_ceil(2) + 1
        }
        AttributeValue::Bool(_) | AttributeValue::Null(_) => 1,
        AttributeValue::L(list) => 3 + list.iter().map(|v| 1 + calculate_value_size(v)).sum::<u64>(),
        AttributeValue::M(map) => {
            3 + map
                .iter()
                .map(|(k, v)| 1 + k.len() as u64 + calculate_value_size(v))
                .sum::<u64>()
        }
    }
}
