//! Inbound catalog metadata.
//!
//! The introspector hands over one `SchemaCatalog` per schema. It doubles as
//! the side lookup table that resolves the ids stored in template entities.

mod ids;
mod records;

pub use ids::{ColumnId, EnumId, EnumValueId, ForeignKeyId, IndexId, ProcId, TableId};
pub use records::{
    RawColumn, RawEnum, RawEnumValue, RawForeignKey, RawIndex, RawProc, RawProcParam, RawTable,
};

use serde::{Deserialize, Serialize};

/// Raw metadata for one schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    /// Catalog schema name.
    pub name: String,
    /// Enum types in catalog order.
    #[serde(default)]
    pub enums: Vec<RawEnum>,
    /// Procedures in catalog order.
    #[serde(default)]
    pub procs: Vec<RawProc>,
    /// Tables and views in catalog order.
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

impl SchemaCatalog {
    /// Create an empty catalog for a schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an enum.
    pub fn with_enum(mut self, e: RawEnum) -> Self {
        self.enums.push(e);
        self
    }

    /// Add a procedure.
    pub fn with_proc(mut self, proc: RawProc) -> Self {
        self.procs.push(proc);
        self
    }

    /// Add a table or view.
    pub fn with_table(mut self, table: RawTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Iterate enums with their ids.
    pub fn enums(&self) -> impl Iterator<Item = (EnumId, &RawEnum)> {
        self.enums.iter().enumerate().map(|(i, e)| (EnumId(i), e))
    }

    /// Iterate procedures with their ids.
    pub fn procs(&self) -> impl Iterator<Item = (ProcId, &RawProc)> {
        self.procs.iter().enumerate().map(|(i, p)| (ProcId(i), p))
    }

    /// Iterate tables with their ids.
    pub fn tables(&self) -> impl Iterator<Item = (TableId, &RawTable)> {
        self.tables.iter().enumerate().map(|(i, t)| (TableId(i), t))
    }

    /// Find an enum by name.
    pub fn enum_by_name(&self, name: &str) -> Option<(EnumId, &RawEnum)> {
        self.enums().find(|(_, e)| e.name == name)
    }

    /// Find a table by name.
    pub fn table_by_name(&self, name: &str) -> Option<(TableId, &RawTable)> {
        self.tables().find(|(_, t)| t.name == name)
    }

    /// Resolve an enum id.
    pub fn enum_def(&self, id: EnumId) -> Option<&RawEnum> {
        self.enums.get(id.0)
    }

    /// Resolve an enum value id.
    pub fn enum_value(&self, id: EnumValueId) -> Option<&RawEnumValue> {
        self.enum_def(id.enum_id)?.values.get(id.index)
    }

    /// Resolve a procedure id.
    pub fn proc_def(&self, id: ProcId) -> Option<&RawProc> {
        self.procs.get(id.0)
    }

    /// Resolve a table id.
    pub fn table(&self, id: TableId) -> Option<&RawTable> {
        self.tables.get(id.0)
    }

    /// Resolve a column id.
    pub fn column(&self, id: ColumnId) -> Option<&RawColumn> {
        self.table(id.table)?.columns.get(id.index)
    }

    /// Resolve a foreign key id.
    pub fn foreign_key(&self, id: ForeignKeyId) -> Option<&RawForeignKey> {
        self.table(id.table)?.foreign_keys.get(id.index)
    }

    /// Resolve an index id.
    pub fn index(&self, id: IndexId) -> Option<&RawIndex> {
        self.table(id.table)?.indexes.get(id.index)
    }

    /// Id of a column by table id and name.
    pub fn column_id(&self, table: TableId, name: &str) -> Option<ColumnId> {
        let (index, _) = self.table(table)?.column(name)?;
        Some(ColumnId { table, index })
    }

    /// Ids of every foreign key on a table.
    pub fn foreign_key_ids(&self, table: TableId) -> impl Iterator<Item = ForeignKeyId> {
        let count = self.table(table).map_or(0, |t| t.foreign_keys.len());
        (0..count).map(move |index| ForeignKeyId { table, index })
    }

    /// Ids of every index on a table.
    pub fn index_ids(&self, table: TableId) -> impl Iterator<Item = IndexId> {
        let count = self.table(table).map_or(0, |t| t.indexes.len());
        (0..count).map(move |index| IndexId { table, index })
    }

    /// Ids of every value of an enum, in declaration order.
    pub fn enum_value_ids(&self, enum_id: EnumId) -> impl Iterator<Item = EnumValueId> {
        let count = self.enum_def(enum_id).map_or(0, |e| e.values.len());
        (0..count).map(move |index| EnumValueId { enum_id, index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> SchemaCatalog {
        SchemaCatalog::new("public")
            .with_enum(RawEnum::new("order_status").with_value("pending").with_value("paid"))
            .with_table(
                RawTable::new("users")
                    .with_column(RawColumn::new("id", "integer").primary_key())
                    .with_column(RawColumn::new("email", "text"))
                    .with_index(RawIndex::unique("users_email_key", ["email"])),
            )
            .with_table(
                RawTable::new("orders")
                    .with_column(RawColumn::new("id", "integer").primary_key())
                    .with_column(RawColumn::new("user_id", "integer"))
                    .with_foreign_key("orders_user_id_fkey", "user_id", "users", "id"),
            )
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = sample_catalog();

        let (id, table) = catalog.table_by_name("orders").unwrap();
        assert_eq!(id.index(), 1);
        assert_eq!(table.name, "orders");
        assert!(catalog.table_by_name("missing").is_none());
        assert!(catalog.enum_by_name("order_status").is_some());
    }

    #[test]
    fn test_ids_resolve_to_records() {
        let catalog = sample_catalog();
        let (orders, _) = catalog.table_by_name("orders").unwrap();

        let col = catalog.column_id(orders, "user_id").unwrap();
        assert_eq!(col.table(), orders);
        assert_eq!(catalog.column(col).unwrap().name, "user_id");

        let fks: Vec<_> = catalog.foreign_key_ids(orders).collect();
        assert_eq!(fks.len(), 1);
        assert_eq!(catalog.foreign_key(fks[0]).unwrap().ref_table, "users");

        let (users, _) = catalog.table_by_name("users").unwrap();
        let idx: Vec<_> = catalog.index_ids(users).collect();
        assert_eq!(catalog.index(idx[0]).unwrap().columns, ["email"]);
    }

    #[test]
    fn test_enum_value_ids_in_declaration_order() {
        let catalog = sample_catalog();
        let (status, _) = catalog.enum_by_name("order_status").unwrap();

        let labels: Vec<_> = catalog
            .enum_value_ids(status)
            .map(|id| catalog.enum_value(id).unwrap().name.clone())
            .collect();
        assert_eq!(labels, ["pending", "paid"]);
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "name": "public",
            "tables": [{
                "name": "audit_log",
                "kind": "VIEW",
                "columns": [{"name": "entry", "data_type": "text", "not_null": false}]
            }]
        }"#;

        let catalog: SchemaCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.tables[0].kind, crate::kind::RelKind::View);
        assert!(catalog.procs.is_empty());
        assert!(!catalog.tables[0].columns[0].not_null);
    }
}
