//! Field entity: one column, parameter or query result member.

use crate::catalog::ColumnId;
use crate::resolve::ResolvedType;
use serde::Serialize;

/// A column or parameter with its resolved target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Generated identifier.
    pub name: String,
    /// SQL name of the column or parameter.
    pub column_name: String,
    /// Target type name.
    #[serde(rename = "type")]
    pub ty: String,
    /// Zero or null value of the type.
    pub nil_type: String,
    /// Declared length or precision.
    pub len: Option<u32>,
    /// Whether the value may be NULL.
    pub nullable: bool,
    /// Raw column, when the field comes from a table.
    pub column: Option<ColumnId>,
    /// Free-form comment.
    pub comment: String,
}

impl Field {
    /// Create a field from a resolved type.
    pub fn new(
        name: impl Into<String>,
        column_name: impl Into<String>,
        resolved: ResolvedType,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            column_name: column_name.into(),
            ty: resolved.name,
            nil_type: resolved.nil_type,
            len: resolved.len,
            nullable,
            column: None,
            comment: String::new(),
        }
    }

    /// Link the raw column.
    pub fn with_column(mut self, column: ColumnId) -> Self {
        self.column = Some(column);
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Check whether the field has a meaningful length.
    pub fn has_len(&self) -> bool {
        self.len.is_some()
    }
}
