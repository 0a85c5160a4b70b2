//! Generator configuration.

use crate::model::Schema;
use crate::naming::{EscapeRules, ForeignKeyMode};
use crate::query::{PlaceholderStyle, QueryOptions};
use serde::{Deserialize, Serialize};

/// A declared member of a custom query's result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFieldDef {
    /// Column name as returned by the query.
    pub name: String,
    /// Database data type, resolved like a table column.
    pub data_type: String,
    /// Whether the column may be NULL.
    #[serde(default)]
    pub nullable: bool,
}

impl QueryFieldDef {
    /// Create a NOT NULL result column.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: false,
        }
    }

    /// Create a nullable result column.
    pub fn nullable(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, data_type)
        }
    }
}

/// A user-authored query to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDef {
    /// Query name; becomes the generated function name.
    pub name: String,
    /// Query text with inline parameter declarations.
    pub sql: String,
    /// Name of the result type; defaults to `{Name}Row` when fields are declared.
    #[serde(default)]
    pub type_name: Option<String>,
    /// Result row members. Empty means the query returns no typed rows.
    #[serde(default)]
    pub fields: Vec<QueryFieldDef>,
    /// Overrides `QueryOptions::only_one`.
    #[serde(default)]
    pub only_one: Option<bool>,
    /// Overrides `QueryOptions::interpolate`.
    #[serde(default)]
    pub interpolate: Option<bool>,
    /// Comment carried to the generated function.
    #[serde(default)]
    pub comment: String,
}

impl QueryDef {
    /// Create a query definition.
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            type_name: None,
            fields: Vec::new(),
            only_one: None,
            interpolate: None,
            comment: String::new(),
        }
    }

    /// Set the result type name.
    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Add a result row member.
    pub fn with_field(mut self, field: QueryFieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Expect at most one row.
    pub fn only_one(mut self) -> Self {
        self.only_one = Some(true);
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Options for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Schemas to generate, in `name:package` form when deserialized.
    pub schemas: Vec<Schema>,
    /// Foreign key accessor naming.
    pub foreign_key_mode: ForeignKeyMode,
    /// Name index accessors after the index instead of its fields.
    pub use_index_names: bool,
    /// Passed through to every enum.
    pub reverse_const_names: bool,
    /// Column names left out of every type.
    pub ignore_fields: Vec<String>,
    /// Identifier quoting.
    pub escape: EscapeRules,
    /// Bind placeholder syntax.
    pub placeholder: PlaceholderStyle,
    /// Query text handling.
    pub query: QueryOptions,
    /// Custom queries.
    pub queries: Vec<QueryDef>,
}

impl GeneratorConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema.
    pub fn with_schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schemas.push(schema.into());
        self
    }

    /// Set the foreign key naming mode.
    pub fn with_foreign_key_mode(mut self, mode: ForeignKeyMode) -> Self {
        self.foreign_key_mode = mode;
        self
    }

    /// Name index accessors after the index.
    pub fn with_index_names(mut self) -> Self {
        self.use_index_names = true;
        self
    }

    /// Reverse enum constant names.
    pub fn with_reverse_const_names(mut self) -> Self {
        self.reverse_const_names = true;
        self
    }

    /// Skip a column in every type.
    pub fn with_ignored_field(mut self, column: impl Into<String>) -> Self {
        self.ignore_fields.push(column.into());
        self
    }

    /// Set the escaping rules.
    pub fn with_escape(mut self, escape: EscapeRules) -> Self {
        self.escape = escape;
        self
    }

    /// Set the placeholder style.
    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the query options.
    pub fn with_query_options(mut self, options: QueryOptions) -> Self {
        self.query = options;
        self
    }

    /// Add a custom query.
    pub fn with_query(mut self, query: QueryDef) -> Self {
        self.queries.push(query);
        self
    }

    /// The configured schema for a catalog schema name, or a bare one.
    pub fn schema(&self, name: &str) -> Schema {
        self.schemas
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .unwrap_or_else(|| Schema::new(name))
    }

    /// Check whether a column is ignored.
    pub fn is_ignored(&self, column: &str) -> bool {
        self.ignore_fields.iter().any(|f| f == column)
    }
}
