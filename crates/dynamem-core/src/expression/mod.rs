//! Update-expression interpretation.
//!
//! The pipeline is:
//!
//! 1. **Parsing**: split the expression into tokens and group them into SET
//!    clauses ([`parse_update`]).
//! 2. **Resolution**: replace `#name` / `:value` placeholders using the alias
//!    tables ([`EvalContext::resolve_actions`]).
//! 3. **Application**: assign each action's value to its attribute
//!    ([`apply_actions`]).

pub mod ast;
pub mod evaluator;
pub mod parser;

pub use ast::{ActionKeyword, ActionName, UpdateAction, UpdateExpr};
pub use evaluator::{EvalContext, apply_actions, project_attributes, touched_attributes};
pub use parser::{ExpressionError, parse_update};
