//! Schema entity and its compact `name:package` encoding.

use crate::naming::camel_to_snake;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// A catalog schema and the namespace its output lands in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SchemaRepr")]
pub struct Schema {
    /// Catalog schema identifier.
    pub name: String,
    /// Namespace override for generated code.
    pub package: String,
    /// Free-form comment.
    pub comment: String,
}

impl Schema {
    /// Create a schema with no package override.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the package override.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Namespace for generated code.
    ///
    /// The trimmed package override when set, otherwise the schema name in
    /// snake_case.
    pub fn package_name(&self) -> String {
        let package = self.package.trim();
        if !package.is_empty() {
            return package.to_string();
        }
        camel_to_snake(&self.name)
    }
}

impl FromStr for Schema {
    type Err = Infallible;

    /// Parse `name:package`, splitting on the last colon.
    ///
    /// A colon at position 0 does not count, so `":pkg"` is a bare name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rfind(':') {
            Some(index) if index > 0 => Ok(Schema::new(&s[..index]).with_package(&s[index + 1..])),
            _ => Ok(Schema::new(s)),
        }
    }
}

impl From<String> for Schema {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(schema) => schema,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Schema {
    fn from(value: &str) -> Self {
        Schema::from(value.to_string())
    }
}

/// Accepted input forms: the compact `name:package` string or the full record.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaRepr {
    Compact(String),
    Full {
        name: String,
        #[serde(default)]
        package: String,
        #[serde(default)]
        comment: String,
    },
}

impl From<SchemaRepr> for Schema {
    fn from(repr: SchemaRepr) -> Self {
        match repr {
            SchemaRepr::Compact(text) => Schema::from(text),
            SchemaRepr::Full {
                name,
                package,
                comment,
            } => Schema {
                name,
                package,
                comment,
            },
        }
    }
}
