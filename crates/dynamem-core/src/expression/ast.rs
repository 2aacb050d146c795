//! AST types for update expressions.
//!
//! The parser produces an [`UpdateExpr`] holding unresolved clauses; the
//! evaluator resolves aliases and turns each clause into an [`UpdateAction`].

use std::fmt;

use dynamem_model::AttributeValue;

/// Prefix marking an attribute-name placeholder (`#name`).
pub const NAME_ALIAS_SIGIL: char = '#';

/// Prefix marking an attribute-value placeholder (`:value`).
pub const VALUE_ALIAS_SIGIL: char = ':';

/// Clause keywords recognized by the tokenizer.
///
/// Only [`ActionKeyword::Set`] produces actions; the others are recognized so
/// that their clauses can be skipped as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKeyword {
    /// `SET path = value`.
    Set,
    /// `REMOVE path` (unsupported).
    Remove,
    /// `ADD path value` (unsupported).
    Add,
    /// `DELETE path value` (unsupported).
    Delete,
}

impl ActionKeyword {
    /// Match a token against the keyword set.
    ///
    /// Keywords are upper-case only, so attributes named `set` or `add` stay
    /// usable as plain paths.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "SET" => Some(Self::Set),
            "REMOVE" => Some(Self::Remove),
            "ADD" => Some(Self::Add),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Whether clauses under this keyword produce actions.
    #[must_use]
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Set)
    }
}

impl fmt::Display for ActionKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "SET"),
            Self::Remove => write!(f, "REMOVE"),
            Self::Add => write!(f, "ADD"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// The target attribute of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOperand {
    /// A literal attribute name.
    Name(String),
    /// A `#name` placeholder, stored with its sigil.
    Placeholder(String),
}

impl PathOperand {
    /// Classify a raw path token.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token.starts_with(NAME_ALIAS_SIGIL) {
            Self::Placeholder(token.to_owned())
        } else {
            Self::Name(token.to_owned())
        }
    }
}

/// The assigned value of a clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOperand {
    /// A literal, stored as a string value.
    Literal(String),
    /// A `:value` placeholder, stored with its sigil.
    Placeholder(String),
}

impl ValueOperand {
    /// Classify a raw value token, stripping one trailing comma first.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        let token = token.strip_suffix(',').unwrap_or(token);
        if token.starts_with(VALUE_ALIAS_SIGIL) {
            Self::Placeholder(token.to_owned())
        } else {
            Self::Literal(token.to_owned())
        }
    }
}

/// One `path = value` triple under a `SET` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClause {
    /// Target attribute.
    pub path: PathOperand,
    /// The operator token as written. Not validated.
    pub operator: String,
    /// Assigned value.
    pub value: ValueOperand,
}

/// A parsed update expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateExpr {
    /// SET clauses in left-to-right order.
    pub set_clauses: Vec<SetClause>,
    /// Number of clauses dropped because their keyword is unsupported.
    pub skipped_clauses: usize,
}

impl UpdateExpr {
    /// Returns `true` if the expression produces no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set_clauses.is_empty()
    }
}

/// The kind of an update action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionName {
    /// Replace the attribute's value.
    Set,
}

/// A fully resolved, atomic update action.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAction {
    /// What to do.
    pub action: ActionName,
    /// The resolved attribute name.
    pub path: String,
    /// The resolved value.
    pub value: AttributeValue,
}
