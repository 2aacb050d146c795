//! Table catalog.

use std::collections::HashMap;

use tracing::info;

use dynamem_model::error::StoreError;
use dynamem_model::output::TableDescription;

use crate::storage::TableStorage;

/// All tables keyed by name.
///
/// The catalog owns every table and every table owns its documents. It is
/// not synchronized itself; [`DocumentStore`](crate::provider::DocumentStore)
/// guards it with one lock per operation.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a table by name.
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Get a table or return `ResourceNotFoundException`.
    pub fn require_table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables.get(name).ok_or_else(|| table_not_found(name))
    }

    /// Get a mutable table or return `ResourceNotFoundException`.
    pub fn require_table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        self.tables.get_mut(name).ok_or_else(|| table_not_found(name))
    }

    /// Return the named table, creating it if absent.
    ///
    /// Fails with `ConfigurationError` when the table already exists under a
    /// different primary-key attribute.
    pub fn ensure_table(
        &mut self,
        name: &str,
        primary_key_attribute: &str,
    ) -> Result<&mut Table, StoreError> {
        let table = self.tables.entry(name.to_owned()).or_insert_with(|| {
            info!(table = %name, key = %primary_key_attribute, "created table");
            Table::new(name, primary_key_attribute)
        });

        if table.primary_key_attribute() != primary_key_attribute {
            return Err(StoreError::configuration(format!(
                "Table {name} already exists with primary key attribute '{}', \
                 cannot redeclare it with '{primary_key_attribute}'",
                table.primary_key_attribute()
            )));
        }

        Ok(table)
    }

    /// List all table names (sorted).
    #[must_use]
    pub fn list_table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove all tables.
    pub fn reset(&mut self) {
        self.tables.clear();
    }
}

fn table_not_found(name: &str) -> StoreError {
    StoreError::resource_not_found(format!(
        "Requested resource not found: Table: {name} not found"
    ))
}

/// A single table with metadata and storage.
#[derive(Debug)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Document storage.
    pub storage: TableStorage,
}

impl Table {
    /// Create an empty table addressed by `primary_key_attribute`.
    #[must_use]
    pub fn new(name: &str, primary_key_attribute: &str) -> Self {
        Self {
            name: name.to_owned(),
            created_at: chrono::Utc::now(),
            storage: TableStorage::new(primary_key_attribute),
        }
    }

    /// The immutable primary-key attribute name.
    #[must_use]
    pub fn primary_key_attribute(&self) -> &str {
        self.storage.key_attribute()
    }

    /// Build a `TableDescription` from this table's metadata.
    #[must_use]
    pub fn to_description(&self) -> TableDescription {
        #[allow(clippy::cast_precision_loss)] // epoch seconds fit comfortably in f64
        let creation_time = self.created_at.timestamp() as f64;
        TableDescription {
            table_name: self.name.clone(),
            primary_key_attribute: self.primary_key_attribute().to_owned(),
            item_count: self.storage.item_count(),
            table_size_bytes: self.storage.total_size_bytes(),
            creation_date_time: creation_time,
        }
    }
}
