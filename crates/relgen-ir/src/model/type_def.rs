//! Type entity: a table, view or custom query result shape.

use super::Field;
use crate::catalog::TableId;
use crate::kind::RelKind;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::Arc;

/// A table, view or query result shape.
///
/// The primary key is held once, as an ordered list; `primary_key()` is the
/// single-column view of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    /// Generated type name.
    pub name: String,
    /// SQL name of the table or view; empty for query result shapes.
    pub table_name: String,
    /// Owning schema name.
    pub schema: String,
    /// Table or view.
    pub rel_kind: RelKind,
    /// Primary key fields in declaration order; shared with `fields`.
    pub primary_key_fields: Vec<Arc<Field>>,
    /// All fields in declaration order.
    pub fields: Vec<Arc<Field>>,
    /// Raw table, absent for query result shapes.
    pub table: Option<TableId>,
    /// Free-form comment.
    pub comment: String,
}

impl Type {
    /// Create a type with no fields.
    pub fn new(name: impl Into<String>, schema: impl Into<String>, rel_kind: RelKind) -> Self {
        Self {
            name: name.into(),
            table_name: String::new(),
            schema: schema.into(),
            rel_kind,
            primary_key_fields: Vec::new(),
            fields: Vec::new(),
            table: None,
            comment: String::new(),
        }
    }

    /// The key field when the primary key has exactly one column.
    pub fn primary_key(&self) -> Option<&Arc<Field>> {
        match self.primary_key_fields.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }

    /// Check whether the primary key spans several columns.
    pub fn has_composite_key(&self) -> bool {
        self.primary_key_fields.len() > 1
    }

    /// Fields that are not part of the primary key.
    pub fn non_key_fields(&self) -> impl Iterator<Item = &Arc<Field>> {
        self.fields
            .iter()
            .filter(|f| !self.primary_key_fields.iter().any(|k| Arc::ptr_eq(k, f)))
    }

    /// Get a field by generated name.
    pub fn field(&self, name: &str) -> Option<&Arc<Field>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get a field by SQL column name.
    pub fn field_by_column(&self, column_name: &str) -> Option<&Arc<Field>> {
        self.fields.iter().find(|f| f.column_name == column_name)
    }

    /// Check whether `field` is one of this type's fields (by identity).
    pub fn contains(&self, field: &Arc<Field>) -> bool {
        self.fields.iter().any(|f| Arc::ptr_eq(f, field))
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Type", 9)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("table_name", &self.table_name)?;
        state.serialize_field("schema", &self.schema)?;
        state.serialize_field("rel_kind", &self.rel_kind)?;
        state.serialize_field("primary_key", &self.primary_key())?;
        state.serialize_field("primary_key_fields", &self.primary_key_fields)?;
        state.serialize_field("fields", &self.fields)?;
        state.serialize_field("table", &self.table)?;
        state.serialize_field("comment", &self.comment)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{StandardTypeResolver, TypeResolver};

    fn field(name: &str, data_type: &str) -> Arc<Field> {
        let resolved = StandardTypeResolver.resolve(data_type, false);
        Arc::new(Field::new(name, name.to_lowercase(), resolved, false))
    }

    #[test]
    fn test_single_column_key_view() {
        let id = field("Id", "integer");
        let mut ty = Type::new("User", "public", RelKind::Table);
        ty.fields = vec![id.clone(), field("Email", "text")];
        ty.primary_key_fields = vec![id.clone()];

        let pk = ty.primary_key().unwrap();
        assert!(Arc::ptr_eq(pk, &id));
        assert_eq!(ty.primary_key_fields.len(), 1);
        assert!(!ty.has_composite_key());
        assert_eq!(ty.non_key_fields().count(), 1);
    }

    #[test]
    fn test_composite_key_has_no_single_view() {
        let order_id = field("OrderId", "integer");
        let line = field("LineNo", "integer");
        let mut ty = Type::new("OrderLine", "public", RelKind::Table);
        ty.fields = vec![order_id.clone(), line.clone()];
        ty.primary_key_fields = vec![order_id, line];

        assert!(ty.primary_key().is_none());
        assert!(ty.has_composite_key());
    }

    #[test]
    fn test_contains_is_by_identity() {
        let id = field("Id", "integer");
        let mut ty = Type::new("User", "public", RelKind::Table);
        ty.fields = vec![id.clone()];

        assert!(ty.contains(&id));
        assert!(!ty.contains(&field("Id", "integer")));
        assert!(ty.field("Id").is_some());
        assert!(ty.field_by_column("id").is_some());
    }

    #[test]
    fn test_serialize_includes_primary_key() {
        let id = field("Id", "integer");
        let mut ty = Type::new("User", "public", RelKind::View);
        ty.fields = vec![id.clone()];
        ty.primary_key_fields = vec![id];

        let value = serde_json::to_value(&ty).unwrap();
        assert_eq!(value["primary_key"]["name"], "Id");
        assert_eq!(value["rel_kind"], "VIEW");
        assert_eq!(value["fields"].as_array().unwrap().len(), 1);
    }
}
