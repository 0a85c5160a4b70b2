//! Building a linked template set from raw catalog metadata.
//!
//! The builder resolves every cross reference to a concrete `Arc` before the
//! set is returned and runs the linking checks on the result, so a dangling
//! reference is reported here rather than at render time.

use crate::catalog::{
    ColumnId, ForeignKeyId, IndexId, RawColumn, RawForeignKey, RawIndex, SchemaCatalog, TableId,
};
use crate::config::{GeneratorConfig, QueryDef};
use crate::error::{Error, Result};
use crate::kind::{RelKind, TemplateKind};
use crate::model::{
    render_signature, Enum, EnumValue, Field, ForeignKey, Index, Proc, Query, Type,
};
use crate::naming::{
    camel_to_snake, foreign_key_name, index_func_name, to_identifier, ForeignKeyNameParts,
};
use crate::query::QuerySource;
use crate::resolve::{array_element, ResolvedType, TypeResolver};
use crate::templates::TemplateSet;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Builds template sets from catalogs.
pub struct IrBuilder<'a, R: TypeResolver + ?Sized> {
    config: &'a GeneratorConfig,
    resolver: &'a R,
}

/// A foreign key whose ends have been found but not yet named.
struct LinkedKey<'c> {
    id: ForeignKeyId,
    raw: &'c RawForeignKey,
    ty: Arc<Type>,
    field: Arc<Field>,
    ref_type: Arc<Type>,
    ref_field: Arc<Field>,
}

impl<'a, R: TypeResolver + ?Sized> IrBuilder<'a, R> {
    /// Create a builder.
    pub fn new(config: &'a GeneratorConfig, resolver: &'a R) -> Self {
        Self { config, resolver }
    }

    /// Build the template set for one schema.
    #[instrument(skip_all, fields(schema = %catalog.name))]
    pub fn build(&self, catalog: Arc<SchemaCatalog>) -> Result<TemplateSet> {
        let mut set = TemplateSet::new(self.config.schema(&catalog.name), Arc::clone(&catalog));
        set.escape = self.config.escape.clone();

        set.enums = self.build_enums(&catalog)?;
        set.procs = self.build_procs(&catalog)?;
        set.types = self.build_types(&catalog, &set.enums)?;
        set.foreign_keys = self.build_foreign_keys(&catalog, &set.types)?;
        set.indexes = self.build_indexes(&catalog, &set.types)?;
        let (query_types, queries) = self.build_queries(&catalog, &set.enums, &set.types)?;
        set.query_types = query_types;
        set.queries = queries;

        set.validate()?;

        info!(
            enums = set.count(TemplateKind::Enum),
            procs = set.count(TemplateKind::Proc),
            types = set.count(TemplateKind::Type),
            foreign_keys = set.count(TemplateKind::ForeignKey),
            indexes = set.count(TemplateKind::Index),
            query_types = set.count(TemplateKind::QueryType),
            queries = set.count(TemplateKind::Query),
            "built template set"
        );

        Ok(set)
    }

    fn build_enums(&self, catalog: &SchemaCatalog) -> Result<Vec<Enum>> {
        let mut names = HashSet::new();
        let mut enums = Vec::with_capacity(catalog.enums.len());

        for (enum_id, raw) in catalog.enums() {
            let name = to_identifier(&raw.name);
            if !names.insert(name.clone()) {
                return Err(Error::DuplicateName { kind: "enum", name });
            }

            let values = catalog
                .enum_value_ids(enum_id)
                .zip(&raw.values)
                .map(|(value, v)| EnumValue {
                    name: to_identifier(&v.name),
                    label: v.name.clone(),
                    const_value: v.const_value,
                    value,
                    comment: String::new(),
                })
                .collect::<Vec<_>>();

            debug!(name = %name, values = values.len(), "built enum");
            enums.push(Enum {
                name,
                enum_name: raw.name.clone(),
                schema: catalog.name.clone(),
                values,
                enum_id,
                comment: raw.comment.clone().unwrap_or_default(),
                reverse_const_names: self.config.reverse_const_names,
            });
        }

        Ok(enums)
    }

    fn build_procs(&self, catalog: &SchemaCatalog) -> Result<Vec<Proc>> {
        let mut names = HashSet::new();
        let mut procs = Vec::with_capacity(catalog.procs.len());

        for (proc_id, raw) in catalog.procs() {
            let name = to_identifier(&raw.name);
            if !names.insert(name.clone()) {
                return Err(Error::DuplicateName { kind: "proc", name });
            }

            let params = raw
                .params
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let ident = match camel_to_snake(&p.name) {
                        n if n.is_empty() => format!("v{i}"),
                        n => n,
                    };
                    let resolved = self.resolve(catalog, &p.data_type, false);
                    Field::new(ident, p.name.clone(), resolved, false)
                })
                .collect::<Vec<_>>();

            let ret = raw
                .return_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("void"))
                .map(|t| Field::new("ret", "", self.resolve(catalog, t, false), false));

            debug!(name = %name, params = params.len(), void = ret.is_none(), "built proc");
            procs.push(Proc {
                name,
                proc_name: raw.name.clone(),
                schema: catalog.name.clone(),
                proc_params: render_signature(&params),
                params,
                ret,
                proc: proc_id,
                comment: raw.comment.clone().unwrap_or_default(),
            });
        }

        Ok(procs)
    }

    /// One type per table, aligned with `catalog.tables`.
    ///
    /// Enums and types share one namespace in generated code.
    fn build_types(&self, catalog: &SchemaCatalog, enums: &[Enum]) -> Result<Vec<Arc<Type>>> {
        let mut names: HashSet<String> = enums.iter().map(|e| e.name.clone()).collect();
        let mut types = Vec::with_capacity(catalog.tables.len());

        for (table_id, raw) in catalog.tables() {
            let mut ty = Type::new(to_identifier(&raw.name), catalog.name.clone(), raw.kind);
            if !names.insert(ty.name.clone()) {
                return Err(Error::DuplicateName {
                    kind: "type",
                    name: ty.name,
                });
            }
            ty.table_name = raw.name.clone();
            ty.table = Some(table_id);
            ty.comment = raw.comment.clone().unwrap_or_default();

            for (index, column) in raw.columns.iter().enumerate() {
                if self.config.is_ignored(&column.name) {
                    continue;
                }
                let id = ColumnId {
                    table: table_id,
                    index,
                };
                let field = Arc::new(self.column_field(catalog, id, column));
                if column.is_primary_key {
                    ty.primary_key_fields.push(Arc::clone(&field));
                }
                ty.fields.push(field);
            }

            debug!(
                name = %ty.name,
                kind = %ty.rel_kind,
                fields = ty.fields.len(),
                key_fields = ty.primary_key_fields.len(),
                "built type"
            );
            types.push(Arc::new(ty));
        }

        Ok(types)
    }

    fn build_foreign_keys(
        &self,
        catalog: &SchemaCatalog,
        types: &[Arc<Type>],
    ) -> Result<Vec<ForeignKey>> {
        let mut linked = Vec::new();
        for (table_id, _) in catalog.tables() {
            for id in catalog.foreign_key_ids(table_id) {
                if let Some(key) = self.link_foreign_key(catalog, types, id)? {
                    linked.push(key);
                }
            }
        }

        let parts: Vec<_> = linked
            .iter()
            .map(|k| ForeignKeyNameParts {
                ty: &k.ty.name,
                field: &k.field.name,
                ref_ty: &k.ref_type.name,
                key_name: &k.raw.name,
            })
            .collect();

        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(linked.len());
        for (key, part) in linked.iter().zip(&parts) {
            let name = foreign_key_name(self.config.foreign_key_mode, part, &parts);
            if !seen.insert((key.ty.name.clone(), name.clone())) {
                return Err(Error::DuplicateName {
                    kind: "foreign key",
                    name: format!("{}.{}", key.ty.name, name),
                });
            }

            debug!(name = %name, key = %key.raw.name, "built foreign key");
            keys.push(ForeignKey {
                name,
                key_name: key.raw.name.clone(),
                schema: catalog.name.clone(),
                ty: Arc::clone(&key.ty),
                field: Arc::clone(&key.field),
                ref_type: Arc::clone(&key.ref_type),
                ref_field: Arc::clone(&key.ref_field),
                foreign_key: Some(key.id),
                comment: String::new(),
            });
        }

        Ok(keys)
    }

    /// Resolve both ends of a foreign key; `None` when an end was ignored.
    fn link_foreign_key<'c>(
        &self,
        catalog: &'c SchemaCatalog,
        types: &[Arc<Type>],
        id: ForeignKeyId,
    ) -> Result<Option<LinkedKey<'c>>> {
        let table_id = id.table();
        let (Some(table), Some(raw)) = (catalog.table(table_id), catalog.foreign_key(id)) else {
            return Ok(None);
        };
        let (ref_id, ref_table) =
            catalog
                .table_by_name(&raw.ref_table)
                .ok_or_else(|| Error::UnknownTable {
                    table: raw.ref_table.clone(),
                    from: raw.name.clone(),
                })?;

        let Some(field) =
            self.linked_field(types, table_id, &table.name, &raw.column, &raw.name)?
        else {
            warn!(key = %raw.name, column = %raw.column, "skipping foreign key on ignored column");
            return Ok(None);
        };
        let Some(ref_field) =
            self.linked_field(types, ref_id, &ref_table.name, &raw.ref_column, &raw.name)?
        else {
            warn!(
                key = %raw.name,
                column = %raw.ref_column,
                "skipping foreign key to ignored column"
            );
            return Ok(None);
        };

        Ok(Some(LinkedKey {
            id,
            raw,
            ty: type_for(types, table_id)?,
            field,
            ref_type: type_for(types, ref_id)?,
            ref_field,
        }))
    }

    fn build_indexes(&self, catalog: &SchemaCatalog, types: &[Arc<Type>]) -> Result<Vec<Index>> {
        let mut indexes: Vec<Index> = Vec::new();

        for (table_id, table) in catalog.tables() {
            for id in catalog.index_ids(table_id) {
                let Some(raw) = catalog.index(id) else {
                    continue;
                };
                let Some(index) = self.link_index(catalog, types, id, &table.name, raw)? else {
                    warn!(index = %raw.name, "skipping index on ignored column");
                    continue;
                };

                match indexes.iter().find(|ix| ix.func_name == index.func_name) {
                    Some(existing) if same_fields(&existing.fields, &index.fields) => {
                        debug!(
                            index = %raw.name,
                            duplicate_of = %existing.index_name,
                            "skipping redundant index"
                        );
                    }
                    Some(_) => {
                        return Err(Error::DuplicateName {
                            kind: "index",
                            name: index.func_name,
                        });
                    }
                    None => {
                        debug!(name = %index.func_name, fields = index.fields.len(), "built index");
                        indexes.push(index);
                    }
                }
            }
        }

        Ok(indexes)
    }

    fn link_index(
        &self,
        catalog: &SchemaCatalog,
        types: &[Arc<Type>],
        id: IndexId,
        table_name: &str,
        raw: &RawIndex,
    ) -> Result<Option<Index>> {
        let ty = type_for(types, id.table())?;

        let mut fields = Vec::with_capacity(raw.columns.len());
        for column in &raw.columns {
            match self.linked_field(types, id.table(), table_name, column, &raw.name)? {
                Some(field) => fields.push(field),
                None => return Ok(None),
            }
        }

        let field_names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        let func_name = index_func_name(
            &ty.name,
            raw.is_unique,
            &raw.name,
            &field_names,
            self.config.use_index_names,
        );

        Ok(Some(Index {
            func_name,
            index_name: raw.name.clone(),
            schema: catalog.name.clone(),
            ty,
            fields,
            is_unique: raw.is_unique,
            is_primary: raw.is_primary,
            index: Some(id),
            comment: String::new(),
        }))
    }

    fn build_queries(
        &self,
        catalog: &SchemaCatalog,
        enums: &[Enum],
        types: &[Arc<Type>],
    ) -> Result<(Vec<Arc<Type>>, Vec<Query>)> {
        let mut query_types: Vec<Arc<Type>> = Vec::new();
        let mut queries: Vec<Query> = Vec::new();

        for def in &self.config.queries {
            let name = to_identifier(&def.name);
            if queries.iter().any(|q| q.name == name) {
                return Err(Error::DuplicateName { kind: "query", name });
            }

            let mut options = self.config.query.clone();
            options.interpolate = def.interpolate.unwrap_or(options.interpolate);
            let source =
                QuerySource::parse(&def.name, &def.sql, &options, self.config.placeholder)?;

            let ty = self.query_result_type(catalog, def, &name, enums, types, &mut query_types)?;

            debug!(
                name = %name,
                lines = source.lines.len(),
                params = source.params.len(),
                "built query"
            );
            queries.push(Query {
                schema: catalog.name.clone(),
                name,
                lines: source.lines,
                line_comments: source.line_comments,
                params: source.params,
                only_one: def.only_one.unwrap_or(options.only_one),
                interpolate: options.interpolate,
                ty,
                comment: def.comment.clone(),
            });
        }

        Ok((query_types, queries))
    }

    /// The result type of a query: a new shape for declared fields, or an
    /// existing table type referenced by name.
    fn query_result_type(
        &self,
        catalog: &SchemaCatalog,
        def: &QueryDef,
        query_name: &str,
        enums: &[Enum],
        types: &[Arc<Type>],
        query_types: &mut Vec<Arc<Type>>,
    ) -> Result<Option<Arc<Type>>> {
        let type_name = def.type_name.as_deref().map(to_identifier);

        if def.fields.is_empty() {
            let Some(type_name) = type_name else {
                return Ok(None);
            };
            let existing = types
                .iter()
                .chain(query_types.iter())
                .find(|t| t.name == type_name)
                .ok_or_else(|| Error::UnknownTable {
                    table: type_name.clone(),
                    from: query_name.to_string(),
                })?;
            return Ok(Some(Arc::clone(existing)));
        }

        let type_name = type_name.unwrap_or_else(|| format!("{query_name}Row"));
        let taken = enums.iter().any(|e| e.name == type_name)
            || types.iter().chain(query_types.iter()).any(|t| t.name == type_name);
        if taken {
            return Err(Error::DuplicateName {
                kind: "type",
                name: type_name,
            });
        }

        let mut ty = Type::new(type_name, catalog.name.clone(), RelKind::Table);
        ty.comment = def.comment.clone();
        ty.fields = def
            .fields
            .iter()
            .map(|f| {
                let resolved = self.resolve(catalog, &f.data_type, f.nullable);
                Arc::new(Field::new(to_identifier(&f.name), f.name.clone(), resolved, f.nullable))
            })
            .collect();

        let ty = Arc::new(ty);
        query_types.push(Arc::clone(&ty));
        Ok(Some(ty))
    }

    fn column_field(&self, catalog: &SchemaCatalog, id: ColumnId, column: &RawColumn) -> Field {
        let nullable = !column.not_null;
        Field::new(
            to_identifier(&column.name),
            column.name.clone(),
            self.resolve(catalog, &column.data_type, nullable),
            nullable,
        )
        .with_column(id)
        .with_comment(column.comment.clone().unwrap_or_default())
    }

    /// Resolve a data type, preferring catalog enums over the resolver's mapping.
    fn resolve(&self, catalog: &SchemaCatalog, data_type: &str, nullable: bool) -> ResolvedType {
        if let Some((_, e)) = catalog.enum_by_name(data_type) {
            return self.resolver.resolve_enum(&to_identifier(&e.name), nullable);
        }
        match array_element(data_type).and_then(|element| catalog.enum_by_name(element)) {
            Some((_, e)) => {
                let element = self.resolver.resolve_enum(&to_identifier(&e.name), false);
                self.resolver.resolve_array(element, nullable)
            }
            None => self.resolver.resolve(data_type, nullable),
        }
    }

    /// Find the field for `column` on a table's type.
    ///
    /// Errors when the column does not exist; `None` when it is ignored.
    fn linked_field(
        &self,
        types: &[Arc<Type>],
        table: TableId,
        table_name: &str,
        column: &str,
        from: &str,
    ) -> Result<Option<Arc<Field>>> {
        let ty = type_for(types, table)?;
        if let Some(field) = ty.field_by_column(column) {
            return Ok(Some(Arc::clone(field)));
        }
        if self.config.is_ignored(column) {
            return Ok(None);
        }
        Err(Error::UnknownColumn {
            table: table_name.to_string(),
            column: column.to_string(),
            from: from.to_string(),
        })
    }
}

fn type_for(types: &[Arc<Type>], table: TableId) -> Result<Arc<Type>> {
    types
        .get(table.index())
        .cloned()
        .ok_or_else(|| Error::UnknownTable {
            table: format!("#{}", table.index()),
            from: "catalog".to_string(),
        })
}

fn same_fields(a: &[Arc<Field>], b: &[Arc<Field>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RawColumn, RawEnum, RawIndex, RawProc, RawTable};
    use crate::naming::ForeignKeyMode;
    use crate::resolve::StandardTypeResolver;

    fn shop_catalog() -> Arc<SchemaCatalog> {
        Arc::new(
            SchemaCatalog::new("shop")
                .with_enum(
                    RawEnum::new("order_status")
                        .with_value("pending")
                        .with_value("shipped"),
                )
                .with_proc(
                    RawProc::new("cancel_order")
                        .with_param("order_id", "bigint")
                        .with_param("", "text"),
                )
                .with_table(
                    RawTable::new("customers")
                        .with_column(RawColumn::new("id", "bigint").primary_key())
                        .with_column(RawColumn::new("email", "varchar(320)"))
                        .with_column(RawColumn::nullable("created_at", "timestamp"))
                        .with_index(RawIndex::unique("customers_pkey", ["id"]).primary())
                        .with_index(RawIndex::unique("customers_email_key", ["email"])),
                )
                .with_table(
                    RawTable::new("orders")
                        .with_column(RawColumn::new("id", "bigint").primary_key())
                        .with_column(RawColumn::new("customer_id", "bigint"))
                        .with_column(RawColumn::nullable("referrer_id", "bigint"))
                        .with_column(RawColumn::new("status", "order_status"))
                        .with_foreign_key("orders_customer_id_fkey", "customer_id", "customers", "id")
                        .with_foreign_key("orders_referrer_id_fkey", "referrer_id", "customers", "id")
                        .with_index(RawIndex::new("orders_status_customer_idx", ["status", "customer_id"])),
                ),
        )
    }

    fn build(config: &GeneratorConfig, catalog: Arc<SchemaCatalog>) -> Result<TemplateSet> {
        IrBuilder::new(config, &StandardTypeResolver).build(catalog)
    }

    #[test]
    fn test_builds_every_category() {
        let set = build(&GeneratorConfig::new(), shop_catalog()).unwrap();

        assert_eq!(set.enums.len(), 1);
        assert_eq!(set.procs.len(), 1);
        assert_eq!(set.types.len(), 2);
        assert_eq!(set.foreign_keys.len(), 2);
        assert_eq!(set.indexes.len(), 3);
        assert!(set.queries.is_empty());
    }

    #[test]
    fn test_enum_columns_resolve_to_enum_type() {
        let set = build(&GeneratorConfig::new(), shop_catalog()).unwrap();

        let status = set.ty("Orders").unwrap().field("Status").unwrap();
        assert_eq!(status.ty, "OrderStatus");
        assert_eq!(set.enums[0].name, "OrderStatus");
        assert_eq!(set.enums[0].values[1].name, "Shipped");
    }

    #[test]
    fn test_proc_params_and_signature() {
        let set = build(&GeneratorConfig::new(), shop_catalog()).unwrap();
        let proc = &set.procs[0];

        assert_eq!(proc.name, "CancelOrder");
        assert_eq!(proc.proc_params, "order_id: i64, v1: String");
        assert!(proc.is_void());
    }

    #[test]
    fn test_smart_foreign_key_names_avoid_collisions() {
        let set = build(&GeneratorConfig::new(), shop_catalog()).unwrap();
        let names: Vec<_> = set.foreign_keys.iter().map(|fk| fk.name.as_str()).collect();
        assert_eq!(names, ["CustomersByCustomerId", "CustomersByReferrerId"]);
    }

    #[test]
    fn test_parent_mode_collision_is_an_error() {
        let config = GeneratorConfig::new().with_foreign_key_mode(ForeignKeyMode::Parent);
        let err = build(&config, shop_catalog()).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { kind: "foreign key", .. }));
    }

    #[test]
    fn test_ignored_columns_skip_dependent_links() {
        let config = GeneratorConfig::new().with_ignored_field("referrer_id");
        let set = build(&config, shop_catalog()).unwrap();

        assert_eq!(set.foreign_keys.len(), 1);
        assert_eq!(set.foreign_keys[0].name, "Customers");
        assert!(set.ty("Orders").unwrap().field("ReferrerId").is_none());
    }

    #[test]
    fn test_unknown_reference_table() {
        let catalog = SchemaCatalog::new("shop").with_table(
            RawTable::new("orders")
                .with_column(RawColumn::new("customer_id", "bigint"))
                .with_foreign_key("orders_customer_fk", "customer_id", "customers", "id"),
        );

        let err = build(&GeneratorConfig::new(), Arc::new(catalog)).unwrap_err();
        assert!(matches!(err, Error::UnknownTable { ref table, .. } if table == "customers"));
    }

    #[test]
    fn test_unknown_index_column() {
        let catalog = SchemaCatalog::new("shop").with_table(
            RawTable::new("orders")
                .with_column(RawColumn::new("id", "bigint"))
                .with_index(RawIndex::new("orders_missing_idx", ["placed_at"])),
        );

        let err = build(&GeneratorConfig::new(), Arc::new(catalog)).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { ref column, .. } if column == "placed_at"));
    }

    #[test]
    fn test_duplicate_type_names() {
        let catalog = SchemaCatalog::new("shop")
            .with_table(RawTable::new("order_items"))
            .with_table(RawTable::new("OrderItems"));

        let err = build(&GeneratorConfig::new(), Arc::new(catalog)).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { kind: "type", .. }));
    }

    #[test]
    fn test_enums_and_types_share_a_namespace() {
        let catalog = SchemaCatalog::new("shop")
            .with_enum(RawEnum::new("order_status").with_value("pending"))
            .with_table(RawTable::new("order_status").with_column(RawColumn::new("id", "bigint")));

        let err = build(&GeneratorConfig::new(), Arc::new(catalog)).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { kind: "type", ref name } if name == "OrderStatus"));

        let config = GeneratorConfig::new().with_query(
            QueryDef::new("order_status", "SELECT 1 AS n")
                .with_type_name("order_status")
                .with_field(crate::config::QueryFieldDef::new("n", "integer")),
        );
        let err = build(&config, shop_catalog()).unwrap_err();
        assert!(matches!(err, Error::DuplicateName { kind: "type", ref name } if name == "OrderStatus"));
    }

    #[test]
    fn test_enum_array_columns() {
        let catalog = SchemaCatalog::new("shop")
            .with_enum(RawEnum::new("order_status").with_value("pending"))
            .with_table(
                RawTable::new("audits")
                    .with_column(RawColumn::new("history", "order_status[]"))
                    .with_column(RawColumn::nullable("labels", "text[]")),
            );
        let set = build(&GeneratorConfig::new(), Arc::new(catalog)).unwrap();
        let audits = set.ty("Audits").unwrap();

        assert_eq!(audits.field("History").unwrap().ty, "Vec<OrderStatus>");
        assert_eq!(audits.field("Labels").unwrap().ty, "Option<Vec<String>>");
    }

    #[test]
    fn test_query_with_declared_fields() {
        let config = GeneratorConfig::new().with_query(
            QueryDef::new(
                "customer_emails",
                "SELECT id, email FROM customers WHERE created_at > %%since String%%",
            )
            .with_field(crate::config::QueryFieldDef::new("id", "bigint"))
            .with_field(crate::config::QueryFieldDef::new("email", "text")),
        );
        let set = build(&config, shop_catalog()).unwrap();

        let query = set.query("CustomerEmails").unwrap();
        let ty = query.ty.as_ref().unwrap();
        assert_eq!(ty.name, "CustomerEmailsRow");
        assert!(Arc::ptr_eq(ty, &set.query_types[0]));
        assert_eq!(query.lines[0], "SELECT id, email FROM customers WHERE created_at > $1");
        assert_eq!(query.params[0].name, "since");
    }

    #[test]
    fn test_query_reusing_table_type() {
        let config = GeneratorConfig::new().with_query(
            QueryDef::new("customer_by_email", "SELECT * FROM customers WHERE email = %%email String%%")
                .with_type_name("customers")
                .only_one(),
        );
        let set = build(&config, shop_catalog()).unwrap();

        let query = set.query("CustomerByEmail").unwrap();
        assert!(query.only_one);
        assert!(Arc::ptr_eq(query.ty.as_ref().unwrap(), set.ty("Customers").unwrap()));
        assert!(set.query_types.is_empty());
    }

    #[test]
    fn test_query_with_unknown_type() {
        let config = GeneratorConfig::new()
            .with_query(QueryDef::new("lost", "SELECT 1").with_type_name("nowhere"));
        let err = build(&config, shop_catalog()).unwrap_err();
        assert!(matches!(err, Error::UnknownTable { .. }));
    }
}
