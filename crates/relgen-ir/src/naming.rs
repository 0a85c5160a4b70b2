//! Deterministic naming and identifier escaping.
//!
//! Every generated name in the template set comes from one of these helpers so
//! the same catalog always renders to the same identifiers.

use crate::error::Error;
use crate::kind::EscapeTarget;
use heck::{ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

/// Convert a CamelCase name to snake_case.
///
/// Names containing anything other than alphanumerics and `_` are returned
/// unchanged; repairing arbitrary catalog names is not attempted.
pub fn camel_to_snake(name: &str) -> String {
    if is_identifier_like(name) {
        name.to_snake_case()
    } else {
        name.to_string()
    }
}

/// Convert a catalog name to an UpperCamelCase identifier.
pub fn to_identifier(name: &str) -> String {
    name.to_upper_camel_case()
}

fn is_identifier_like(name: &str) -> bool {
    name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// How foreign key accessors are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForeignKeyMode {
    /// Parent naming unless it would collide, then field naming.
    #[default]
    Smart,
    /// The referenced type name.
    Parent,
    /// `{RefType}By{Field}`.
    Field,
    /// `{RefType}By{KeyName}`.
    Key,
}

impl FromStr for ForeignKeyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart" => Ok(ForeignKeyMode::Smart),
            "parent" => Ok(ForeignKeyMode::Parent),
            "field" => Ok(ForeignKeyMode::Field),
            "key" => Ok(ForeignKeyMode::Key),
            other => Err(Error::UnknownForeignKeyMode(other.to_string())),
        }
    }
}

/// The names a foreign key accessor is derived from.
#[derive(Debug, Clone, Copy)]
pub struct ForeignKeyNameParts<'a> {
    /// Owning type name.
    pub ty: &'a str,
    /// Local field name.
    pub field: &'a str,
    /// Referenced type name.
    pub ref_ty: &'a str,
    /// Constraint name from the catalog.
    pub key_name: &'a str,
}

/// Derive a foreign key accessor name.
///
/// `siblings` holds every foreign key of the schema (the key itself may be
/// included); smart mode only consults those on the same owning type.
pub fn foreign_key_name(
    mode: ForeignKeyMode,
    key: &ForeignKeyNameParts<'_>,
    siblings: &[ForeignKeyNameParts<'_>],
) -> String {
    match mode {
        ForeignKeyMode::Parent => key.ref_ty.to_string(),
        ForeignKeyMode::Field => format!("{}By{}", key.ref_ty, key.field),
        ForeignKeyMode::Key => format!("{}By{}", key.ref_ty, to_identifier(key.key_name)),
        ForeignKeyMode::Smart => {
            let conflicts = siblings.iter().any(|other| {
                other.ty == key.ty && other.ref_ty == key.ref_ty && other.key_name != key.key_name
            });
            if conflicts {
                foreign_key_name(ForeignKeyMode::Field, key, siblings)
            } else {
                foreign_key_name(ForeignKeyMode::Parent, key, siblings)
            }
        }
    }
}

/// Derive an index accessor name.
///
/// Unique indexes fetch a single row (`UserByEmail`); others fetch a list
/// (`UserListByStatus`).
pub fn index_func_name(
    ty: &str,
    is_unique: bool,
    index_name: &str,
    field_names: &[&str],
    use_index_names: bool,
) -> String {
    let prefix = if is_unique {
        format!("{ty}By")
    } else {
        format!("{ty}ListBy")
    };

    if use_index_names && !index_name.trim().is_empty() {
        return prefix + &to_identifier(index_name);
    }

    prefix + &field_names.concat()
}

/// Which identifier positions get quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeRules {
    /// Quote every identifier regardless of position.
    pub all: bool,
    /// Quote schema names.
    pub schema: bool,
    /// Quote table names.
    pub table: bool,
    /// Quote column names.
    pub column: bool,
    /// Quote character of the target dialect.
    pub quote: char,
}

impl Default for EscapeRules {
    fn default() -> Self {
        Self {
            all: false,
            schema: false,
            table: false,
            column: false,
            quote: '"',
        }
    }
}

impl EscapeRules {
    /// Quote everything.
    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }

    /// Set the quote character.
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Check whether identifiers at `target` are quoted.
    pub fn applies_to(&self, target: EscapeTarget) -> bool {
        self.all
            || match target {
                EscapeTarget::Schema => self.schema,
                EscapeTarget::Table => self.table,
                EscapeTarget::Column => self.column,
            }
    }

    /// Escape an identifier for the given position.
    pub fn escape<'a>(&self, target: EscapeTarget, ident: &'a str) -> Cow<'a, str> {
        if !self.applies_to(target) {
            return Cow::Borrowed(ident);
        }

        let q = self.quote;
        let doubled: String = [q, q].iter().collect();
        let inner = ident.replace(q, &doubled);
        Cow::Owned(format!("{q}{inner}{q}"))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn non_identifier_names_pass_through(name in "[a-z]{1,8} [a-zA-Z ]{0,8}") {
            prop_assert_eq!(camel_to_snake(&name), name);
        }

        #[test]
        fn snake_case_output_is_lowercase(name in "[A-Z][a-z]{1,6}([A-Z][a-z]{1,6}){0,3}") {
            let snake = camel_to_snake(&name);
            prop_assert!(!snake.chars().any(char::is_uppercase));
            prop_assert_eq!(snake.replace('_', ""), name.to_lowercase());
        }
    }
}
