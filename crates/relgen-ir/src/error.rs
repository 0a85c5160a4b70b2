//! Core error types.

use crate::validate::Violation;
use thiserror::Error;

/// Result alias used throughout the IR layer.
pub type Result<T> = std::result::Result<T, Error>;

/// IR layer errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A template category was constructed from a value outside the closed set.
    #[error("unknown template kind: {0}")]
    UnknownTemplateKind(String),

    /// A relational storage kind was constructed from a value outside the closed set.
    #[error("unknown relation kind: {0}")]
    UnknownRelKind(u8),

    /// An escape target was constructed from a value outside the closed set.
    #[error("unknown escape target: {0}")]
    UnknownEscapeTarget(u8),

    /// A foreign key mode name was not recognised.
    #[error("unknown foreign key mode: {0}")]
    UnknownForeignKeyMode(String),

    /// A placeholder style name was not recognised.
    #[error("unknown placeholder style: {0}")]
    UnknownPlaceholderStyle(String),

    /// A foreign key references a table missing from the catalog.
    #[error("table '{table}' referenced from '{from}' does not exist")]
    UnknownTable {
        /// Referenced table name.
        table: String,
        /// Object holding the reference.
        from: String,
    },

    /// A foreign key or index references a column missing from its table.
    #[error("column '{column}' referenced from '{from}' does not exist on table '{table}'")]
    UnknownColumn {
        /// Table the column was looked up on.
        table: String,
        /// Missing column name.
        column: String,
        /// Object holding the reference.
        from: String,
    },

    /// Two entities of one category resolved to the same generated name.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName {
        /// Category the collision occurred in.
        kind: &'static str,
        /// Colliding generated name.
        name: String,
    },

    /// A query parameter declaration is malformed or conflicts with an earlier one.
    #[error("query '{query}': invalid parameter '{param}': {reason}")]
    InvalidQueryParam {
        /// Query name.
        query: String,
        /// Parameter text as written.
        param: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A parameter delimiter was opened but never closed.
    #[error("query '{query}': unterminated parameter on line {line}")]
    UnterminatedParam {
        /// Query name.
        query: String,
        /// One-based source line.
        line: usize,
    },

    /// Query options name an empty parameter delimiter.
    #[error("query '{query}': parameter delimiter must not be empty")]
    EmptyParamDelimiter {
        /// Query name.
        query: String,
    },

    /// The built template set breaks one or more linking invariants.
    #[error("template set failed validation with {} violation(s): {}", .0.len(), join_violations(.0))]
    Integrity(Vec<Violation>),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_message_lists_violations() {
        let err = Error::Integrity(vec![
            Violation::DuplicateField {
                ty: "User".into(),
                field: "Id".into(),
            },
            Violation::UnknownQueryType {
                query: "ListUsers".into(),
                ty: "UserRow".into(),
            },
        ]);

        let msg = err.to_string();
        assert!(msg.starts_with("template set failed validation with 2 violation(s)"));
        assert!(msg.contains("'Id'"));
        assert!(msg.contains("UserRow"));
    }

    #[test]
    fn test_unknown_column_message() {
        let err = Error::UnknownColumn {
            table: "orders".into(),
            column: "customer".into(),
            from: "orders_customer_fk".into(),
        };
        assert_eq!(
            err.to_string(),
            "column 'customer' referenced from 'orders_customer_fk' does not exist on table 'orders'"
        );
    }
}
