//! Document store provider implementing every store operation.

use parking_lot::RwLock;
use tracing::{debug, info};

use dynamem_model::error::StoreError;
use dynamem_model::input::{
    DeleteItemInput, DescribeTableInput, GetItemInput, ListTablesInput, LoadTableInput,
    PutItemInput, UpdateItemInput,
};
use dynamem_model::output::{
    DeleteItemOutput, DescribeTableOutput, GetItemOutput, ListTablesOutput, PutItemOutput,
    UpdateItemOutput,
};
use dynamem_model::{Document, ReturnValue};

use crate::error::storage_error_to_store;
use crate::expression::{
    EvalContext, UpdateAction, apply_actions, parse_update, project_attributes, touched_attributes,
};
use crate::state::Catalog;

/// In-memory document store.
///
/// Every operation takes the catalog lock once and runs to completion under
/// it, so no caller can observe a half-applied mutation. Share the store
/// across threads or tasks through an `Arc`.
#[derive(Debug, Default)]
pub struct DocumentStore {
    catalog: RwLock<Catalog>,
}

impl DocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every table (for testing).
    pub fn reset(&self) {
        self.catalog.write().reset();
        info!("reset document store");
    }
}

// ---------------------------------------------------------------------------
// Table management
// ---------------------------------------------------------------------------

impl DocumentStore {
    /// Handle `load`: create the table if needed and seed it.
    ///
    /// Idempotent with respect to table creation. Items are written in order,
    /// so a later duplicate key overwrites an earlier one. An item without
    /// the primary key stops the load; items before it stay stored.
    pub fn handle_load(&self, input: LoadTableInput) -> Result<(), StoreError> {
        if input.table_name.is_empty() {
            return Err(StoreError::configuration(
                "TableName must be a non-empty string",
            ));
        }
        if input.primary_key_attribute.is_empty() {
            return Err(StoreError::configuration(format!(
                "PrimaryKeyAttribute for table {} must be a non-empty string",
                input.table_name
            )));
        }

        let mut catalog = self.catalog.write();
        let table = catalog.ensure_table(&input.table_name, &input.primary_key_attribute)?;

        let count = input.items.len();
        for item in input.items {
            table
                .storage
                .put_item(item)
                .map_err(storage_error_to_store)?;
        }

        info!(table = %input.table_name, items = count, "loaded table");
        Ok(())
    }

    /// Handle `ListTables`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_list_tables(&self, _input: ListTablesInput) -> ListTablesOutput {
        ListTablesOutput {
            table_names: self.catalog.read().list_table_names(),
        }
    }

    /// Handle `DescribeTable`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_describe_table(
        &self,
        input: DescribeTableInput,
    ) -> Result<DescribeTableOutput, StoreError> {
        let catalog = self.catalog.read();
        let table = catalog.require_table(&input.table_name)?;
        Ok(DescribeTableOutput {
            table: table.to_description(),
        })
    }
}

// ---------------------------------------------------------------------------
// Item CRUD
// ---------------------------------------------------------------------------

impl DocumentStore {
    /// Handle `PutItem`.
    pub fn handle_put_item(&self, input: PutItemInput) -> Result<PutItemOutput, StoreError> {
        let mut catalog = self.catalog.write();
        let table = catalog.require_table_mut(&input.table_name)?;

        table
            .storage
            .put_item(input.item)
            .map_err(storage_error_to_store)?;

        debug!(table = %input.table_name, "put item");
        Ok(PutItemOutput {})
    }

    /// Handle `GetItem`.
    ///
    /// A key that addresses no document is not an error: the output's `item`
    /// is `None`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_get_item(&self, input: GetItemInput) -> Result<GetItemOutput, StoreError> {
        let catalog = self.catalog.read();
        let table = catalog.require_table(&input.table_name)?;

        let pk = table
            .storage
            .primary_key(&input.key)
            .map_err(storage_error_to_store)?;

        Ok(GetItemOutput {
            item: table.storage.get_item(&pk),
        })
    }

    /// Handle `DeleteItem`.
    ///
    /// Returns `None` unless `return_old` was requested. Deleting an absent
    /// key is a no-op.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_delete_item(
        &self,
        input: DeleteItemInput,
    ) -> Result<Option<DeleteItemOutput>, StoreError> {
        let mut catalog = self.catalog.write();
        let table = catalog.require_table_mut(&input.table_name)?;

        let pk = table
            .storage
            .primary_key(&input.key)
            .map_err(storage_error_to_store)?;
        let old = table.storage.delete_item(&pk);

        debug!(table = %input.table_name, existed = old.is_some(), "delete item");
        Ok(input.return_old.then_some(DeleteItemOutput { item: old }))
    }

    /// Handle `UpdateItem`.
    ///
    /// An absent document is treated as empty: the update creates it,
    /// seeded with the key attribute. The result always goes back into the
    /// slot addressed by `key`, even when the expression assigns the key
    /// attribute itself.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_update_item(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, StoreError> {
        let mut catalog = self.catalog.write();
        let table = catalog.require_table_mut(&input.table_name)?;

        let pk = table
            .storage
            .primary_key(&input.key)
            .map_err(storage_error_to_store)?;

        let parsed = parse_update(&input.update_expression);
        let ctx = EvalContext {
            names: &input.expression_attribute_names,
            values: &input.expression_attribute_values,
        };
        let actions = ctx.resolve_actions(&parsed);

        let old_item = table.storage.get_item(&pk);
        let mut new_item = old_item.clone().unwrap_or_else(|| {
            Document::from([(table.primary_key_attribute().to_owned(), pk.value().clone())])
        });
        apply_actions(&mut new_item, &actions);

        let attributes = compute_update_return_values(
            input.return_values,
            old_item.as_ref(),
            &new_item,
            &actions,
        );

        table.storage.replace_item(pk, new_item);

        debug!(
            table = %input.table_name,
            actions = actions.len(),
            "updated item"
        );
        Ok(UpdateItemOutput { attributes })
    }
}

// ---------------------------------------------------------------------------
// ReturnValues helpers
// ---------------------------------------------------------------------------

/// Compute the projection returned by `UpdateItem`.
///
/// - `NONE` / unset: no projection
/// - `ALL_OLD`: the whole old document (empty if there was none)
/// - `ALL_NEW`: the whole new document
/// - `UPDATED_OLD`: touched attributes that existed before, with old values
/// - `UPDATED_NEW`: touched attributes with their new values
fn compute_update_return_values(
    return_values: Option<ReturnValue>,
    old_item: Option<&Document>,
    new_item: &Document,
    actions: &[UpdateAction],
) -> Option<Document> {
    match return_values {
        Some(ReturnValue::AllOld) => Some(old_item.cloned().unwrap_or_default()),
        Some(ReturnValue::AllNew) => Some(new_item.clone()),
        Some(ReturnValue::UpdatedOld) => {
            let touched = touched_attributes(actions);
            Some(old_item.map_or_else(Document::new, |old| project_attributes(old, &touched)))
        }
        Some(ReturnValue::UpdatedNew) => {
            let touched = touched_attributes(actions);
            Some(project_attributes(new_item, &touched))
        }
        Some(ReturnValue::None) | None => None,
    }
}
