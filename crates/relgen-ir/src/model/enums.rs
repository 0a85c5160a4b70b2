//! Enum entities.

use crate::catalog::{EnumId, EnumValueId};
use serde::Serialize;

/// One value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    /// Generated constant name.
    pub name: String,
    /// Label as stored in the database.
    pub label: String,
    /// Ordinal assigned by the database.
    pub const_value: i32,
    /// Raw value.
    pub value: EnumValueId,
    /// Free-form comment.
    pub comment: String,
}

/// A database enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    /// Generated type name.
    pub name: String,
    /// SQL name of the enum type.
    pub enum_name: String,
    /// Owning schema name.
    pub schema: String,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
    /// Raw enum.
    pub enum_id: EnumId,
    /// Free-form comment.
    pub comment: String,
    /// Compose constant names as `{Value}{Enum}` instead of `{Enum}{Value}`.
    pub reverse_const_names: bool,
}

impl Enum {
    /// Get a value by its database label.
    pub fn value_by_label(&self, label: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.label == label)
    }
}
