//! Tokenizer and parser for update expressions.
//!
//! The accepted language is deliberately small. Tokens are split on single
//! spaces, clause keywords switch the current action, and every non-keyword
//! token re-uses the current action. Under `SET` each step consumes a
//! `path`, an operator and a `value` token:
//!
//! ```text
//! SET token = :t, #n = literal
//! ^^^ ^^^^^ ^ ^^^ ^^ ^ ^^^^^^^
//!  kw path  op val path op val   (second triple re-uses SET)
//! ```
//!
//! Parsing never fails. Unsupported clauses are skipped, and a triple cut
//! short by the end of input is dropped.

use tracing::debug;

use super::ast::{ActionKeyword, PathOperand, SetClause, UpdateExpr, ValueOperand};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Reasons a SET clause cannot be turned into an action.
#[derive(Debug, thiserror::Error)]
pub enum ExpressionError {
    /// An expression attribute name placeholder could not be resolved.
    #[error("Unresolved expression attribute name: {name}")]
    UnresolvedName {
        /// The unresolved name reference.
        name: String,
    },
    /// An expression attribute value placeholder could not be resolved.
    #[error("Unresolved expression attribute value: {name}")]
    UnresolvedValue {
        /// The unresolved value reference.
        name: String,
    },
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse an update expression into its SET clauses.
#[must_use]
pub fn parse_update(input: &str) -> UpdateExpr {
    let mut tokens = input.split(' ').peekable();
    let mut current: Option<ActionKeyword> = None;
    let mut expr = UpdateExpr::default();

    while let Some(&token) = tokens.peek() {
        if let Some(keyword) = ActionKeyword::from_token(token) {
            tokens.next();
            if !keyword.is_supported() {
                debug!(%keyword, "skipping unsupported clause");
                expr.skipped_clauses += 1;
            }
            current = Some(keyword);
            continue;
        }

        match current {
            Some(ActionKeyword::Set) => {
                let (Some(path), Some(operator), Some(value)) =
                    (tokens.next(), tokens.next(), tokens.next())
                else {
                    break;
                };
                expr.set_clauses.push(SetClause {
                    path: PathOperand::from_token(path),
                    operator: operator.to_owned(),
                    value: ValueOperand::from_token(value),
                });
            }
            // Unsupported clause bodies and tokens before any keyword.
            _ => {
                tokens.next();
            }
        }
    }

    debug!(
        set_clauses = expr.set_clauses.len(),
        skipped_clauses = expr.skipped_clauses,
        "parsed update expression"
    );
    expr
}
