//! Foreign key and index entities, linked to their owning types.

use super::{Field, Type};
use crate::catalog::{ForeignKeyId, IndexId};
use serde::Serialize;
use std::sync::Arc;

/// A foreign key from one type's field to another type's field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Generated accessor name.
    pub name: String,
    /// Constraint name in the catalog.
    pub key_name: String,
    /// Owning schema name.
    pub schema: String,
    /// Type holding the key.
    #[serde(rename = "type")]
    pub ty: Arc<Type>,
    /// Local field; a member of `ty.fields`.
    pub field: Arc<Field>,
    /// Referenced type.
    pub ref_type: Arc<Type>,
    /// Referenced field; a member of `ref_type.fields`.
    pub ref_field: Arc<Field>,
    /// Raw foreign key.
    pub foreign_key: Option<ForeignKeyId>,
    /// Free-form comment.
    pub comment: String,
}

impl ForeignKey {
    /// Check whether the key points back at its own type.
    pub fn is_self_referencing(&self) -> bool {
        Arc::ptr_eq(&self.ty, &self.ref_type)
    }
}

/// An index over one or more fields of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Index {
    /// Generated accessor name.
    pub func_name: String,
    /// Index name in the catalog.
    pub index_name: String,
    /// Owning schema name.
    pub schema: String,
    /// Indexed type.
    #[serde(rename = "type")]
    pub ty: Arc<Type>,
    /// Fields in index column order; members of `ty.fields`.
    pub fields: Vec<Arc<Field>>,
    /// Whether the index enforces uniqueness.
    pub is_unique: bool,
    /// Whether the index backs the primary key.
    pub is_primary: bool,
    /// Raw index.
    pub index: Option<IndexId>,
    /// Free-form comment.
    pub comment: String,
}

impl Index {
    /// Check whether the index covers several columns.
    pub fn is_composite(&self) -> bool {
        self.fields.len() > 1
    }
}
