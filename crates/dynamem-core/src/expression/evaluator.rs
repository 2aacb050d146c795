//! Alias resolution and action application.

use std::collections::HashMap;

use tracing::debug;

use dynamem_model::{AttributeValue, Document};

use super::ast::{ActionName, PathOperand, SetClause, UpdateAction, UpdateExpr, ValueOperand};
use super::parser::ExpressionError;

/// Alias tables used to resolve an update expression.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// `#name` placeholders to attribute names.
    pub names: &'a HashMap<String, String>,
    /// `:value` placeholders to attribute values.
    pub values: &'a Document,
}

impl EvalContext<'_> {
    /// Resolve every clause of `update` into an action, in order.
    ///
    /// A clause whose placeholder has no entry in the alias tables yields no
    /// action; the remaining clauses still apply.
    #[must_use]
    pub fn resolve_actions(&self, update: &UpdateExpr) -> Vec<UpdateAction> {
        update
            .set_clauses
            .iter()
            .filter_map(|clause| match self.resolve_clause(clause) {
                Ok(action) => Some(action),
                Err(e) => {
                    debug!(error = %e, "skipping unresolved assignment");
                    None
                }
            })
            .collect()
    }

    fn resolve_clause(&self, clause: &SetClause) -> Result<UpdateAction, ExpressionError> {
        Ok(UpdateAction {
            action: ActionName::Set,
            path: self.resolve_path(&clause.path)?,
            value: self.resolve_value(&clause.value)?,
        })
    }

    fn resolve_path(&self, path: &PathOperand) -> Result<String, ExpressionError> {
        match path {
            PathOperand::Name(name) => Ok(name.clone()),
            PathOperand::Placeholder(alias) => {
                self.names
                    .get(alias)
                    .cloned()
                    .ok_or_else(|| ExpressionError::UnresolvedName {
                        name: alias.clone(),
                    })
            }
        }
    }

    fn resolve_value(&self, value: &ValueOperand) -> Result<AttributeValue, ExpressionError> {
        match value {
            ValueOperand::Literal(literal) => Ok(AttributeValue::S(literal.clone())),
            ValueOperand::Placeholder(alias) => {
                self.values
                    .get(alias)
                    .cloned()
                    .ok_or_else(|| ExpressionError::UnresolvedValue {
                        name: alias.clone(),
                    })
            }
        }
    }
}

/// Apply resolved actions to a document in order.
pub fn apply_actions(item: &mut Document, actions: &[UpdateAction]) {
    for action in actions {
        match action.action {
            ActionName::Set => {
                item.insert(action.path.clone(), action.value.clone());
            }
        }
    }
}

/// Attribute names touched by `actions`, first occurrence order, deduplicated.
#[must_use]
pub fn touched_attributes(actions: &[UpdateAction]) -> Vec<&str> {
    let mut seen = Vec::new();
    for action in actions {
        if !seen.contains(&action.path.as_str()) {
            seen.push(action.path.as_str());
        }
    }
    seen
}

/// Copy the named attributes that exist in `item`.
#[must_use]
pub fn project_attributes(item: &Document, attributes: &[&str]) -> Document {
    attributes
        .iter()
        .filter_map(|name| item.get(*name).map(|v| ((*name).to_owned(), v.clone())))
        .collect()
}
