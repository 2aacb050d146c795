//! Store operation enum.

use std::fmt;

/// Operations reachable over the HTTP layer.
///
/// `load` is deliberately absent: seeding is an in-process configuration
/// step, not a wire operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Insert or replace a document.
    PutItem,
    /// Read a document by primary key.
    GetItem,
    /// Apply an update expression to a document.
    UpdateItem,
    /// Remove a document by primary key.
    DeleteItem,
    /// List all table names.
    ListTables,
    /// Describe one table.
    DescribeTable,
}

impl StoreOperation {
    /// Returns the wire operation name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PutItem => "PutItem",
            Self::GetItem => "GetItem",
            Self::UpdateItem => "UpdateItem",
            Self::DeleteItem => "DeleteItem",
            Self::ListTables => "ListTables",
            Self::DescribeTable => "DescribeTable",
        }
    }

    /// Parse a wire operation name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PutItem" => Some(Self::PutItem),
            "GetItem" => Some(Self::GetItem),
            "UpdateItem" => Some(Self::UpdateItem),
            "DeleteItem" => Some(Self::DeleteItem),
            "ListTables" => Some(Self::ListTables),
            "DescribeTable" => Some(Self::DescribeTable),
            _ => None,
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
