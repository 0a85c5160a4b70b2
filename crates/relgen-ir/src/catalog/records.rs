//! Raw metadata records as produced by a dialect introspector.

use crate::kind::RelKind;
use serde::{Deserialize, Serialize};

/// A database enum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEnum {
    /// Enum type name.
    pub name: String,
    /// Labels in declaration order.
    pub values: Vec<RawEnumValue>,
    /// Catalog comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// One label of a database enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEnumValue {
    /// Label text.
    pub name: String,
    /// Ordinal assigned by the database.
    pub const_value: i32,
}

impl RawEnum {
    /// Create an enum with no labels.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            comment: None,
        }
    }

    /// Append a label; its ordinal is its one-based position.
    pub fn with_value(mut self, name: impl Into<String>) -> Self {
        let const_value = i32::try_from(self.values.len() + 1).unwrap_or(i32::MAX);
        self.values.push(RawEnumValue {
            name: name.into(),
            const_value,
        });
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A stored procedure or function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProc {
    /// Procedure name.
    pub name: String,
    /// Parameters in declaration order.
    pub params: Vec<RawProcParam>,
    /// Return data type, `None` for procedures returning nothing.
    #[serde(default)]
    pub return_type: Option<String>,
    /// Catalog comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// A stored procedure parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProcParam {
    /// Parameter name; may be empty for positional parameters.
    pub name: String,
    /// Database data type.
    pub data_type: String,
}

impl RawProc {
    /// Create a procedure with no parameters and no return value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: None,
            comment: None,
        }
    }

    /// Append a parameter.
    pub fn with_param(mut self, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        self.params.push(RawProcParam {
            name: name.into(),
            data_type: data_type.into(),
        });
        self
    }

    /// Set the return type.
    pub fn returns(mut self, data_type: impl Into<String>) -> Self {
        self.return_type = Some(data_type.into());
        self
    }
}

/// A table or view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Table name.
    pub name: String,
    /// Table or view.
    #[serde(default)]
    pub kind: RelKind,
    /// Columns in declaration order.
    pub columns: Vec<RawColumn>,
    /// Single-column foreign keys.
    #[serde(default)]
    pub foreign_keys: Vec<RawForeignKey>,
    /// Indexes.
    #[serde(default)]
    pub indexes: Vec<RawIndex>,
    /// Catalog comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Column name.
    pub name: String,
    /// Database data type, including any length suffix.
    pub data_type: String,
    /// Whether the column rejects NULL.
    pub not_null: bool,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub is_primary_key: bool,
    /// Default value expression.
    #[serde(default)]
    pub default_value: Option<String>,
    /// Catalog comment.
    #[serde(default)]
    pub comment: Option<String>,
}

impl RawColumn {
    /// Create a NOT NULL column.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            not_null: true,
            is_primary_key: false,
            default_value: None,
            comment: None,
        }
    }

    /// Create a nullable column.
    pub fn nullable(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            not_null: false,
            ..Self::new(name, data_type)
        }
    }

    /// Mark as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.not_null = true;
        self
    }

    /// Set the default value expression.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A single-column foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForeignKey {
    /// Constraint name.
    pub name: String,
    /// Local column.
    pub column: String,
    /// Referenced table.
    pub ref_table: String,
    /// Referenced column.
    pub ref_column: String,
}

/// An index over one or more columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIndex {
    /// Index name.
    pub name: String,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub is_unique: bool,
    /// Whether the index backs the primary key.
    #[serde(default)]
    pub is_primary: bool,
    /// Columns in index order.
    pub columns: Vec<String>,
}

impl RawIndex {
    /// Create a non-unique index.
    pub fn new(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            is_unique: false,
            is_primary: false,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a unique index.
    pub fn unique(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            is_unique: true,
            ..Self::new(name, columns)
        }
    }

    /// Mark as the primary key index.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self.is_unique = true;
        self
    }
}

impl RawTable {
    /// Create a table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RelKind::Table,
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            comment: None,
        }
    }

    /// Create a view.
    pub fn view(name: impl Into<String>) -> Self {
        Self {
            kind: RelKind::View,
            ..Self::new(name)
        }
    }

    /// Add a column.
    pub fn with_column(mut self, column: RawColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = RawColumn>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Add a foreign key.
    pub fn with_foreign_key(
        mut self,
        name: impl Into<String>,
        column: impl Into<String>,
        ref_table: impl Into<String>,
        ref_column: impl Into<String>,
    ) -> Self {
        self.foreign_keys.push(RawForeignKey {
            name: name.into(),
            column: column.into(),
            ref_table: ref_table.into(),
            ref_column: ref_column.into(),
        });
        self
    }

    /// Add an index.
    pub fn with_index(mut self, index: RawIndex) -> Self {
        self.indexes.push(index);
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Get a column and its position by name.
    pub fn column(&self, name: &str) -> Option<(usize, &RawColumn)> {
        self.columns.iter().enumerate().find(|(_, c)| c.name == name)
    }

    /// Primary key columns in declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &RawColumn> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_builder() {
        let table = RawTable::new("users")
            .with_column(RawColumn::new("id", "uuid").primary_key())
            .with_column(RawColumn::nullable("email", "text"))
            .with_index(RawIndex::unique("users_email_key", ["email"]));

        assert_eq!(table.kind, RelKind::Table);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.column("email").map(|(i, _)| i), Some(1));
        assert!(table.column("missing").is_none());
        assert_eq!(table.primary_key_columns().count(), 1);
        assert!(table.indexes[0].is_unique);
    }

    #[test]
    fn test_enum_values_keep_declaration_order() {
        let status = RawEnum::new("order_status")
            .with_value("pending")
            .with_value("shipped")
            .with_value("delivered");

        let labels: Vec<_> = status.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(labels, ["pending", "shipped", "delivered"]);
        assert_eq!(status.values[2].const_value, 3);
    }

    #[test]
    fn test_view_has_view_kind() {
        let view = RawTable::view("active_users");
        assert_eq!(view.kind, RelKind::View);
    }
}
