//! The renderer-facing output of one build: entities grouped by category.

use crate::catalog::SchemaCatalog;
use crate::error::{Error, Result};
use crate::kind::{EscapeTarget, TemplateKind};
use crate::model::{Enum, ForeignKey, Index, Proc, Query, Schema, Type};
use crate::naming::EscapeRules;
use crate::validate::validate;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;

/// Every template entity of one schema, fully linked.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSet {
    /// Schema the set was built for.
    pub schema: Schema,
    /// Raw metadata; resolves the ids held by entities.
    #[serde(skip)]
    pub catalog: Arc<SchemaCatalog>,
    /// Identifier quoting for the renderer.
    pub escape: EscapeRules,
    /// Enums in catalog order.
    pub enums: Vec<Enum>,
    /// Procedures in catalog order.
    pub procs: Vec<Proc>,
    /// Table and view types in catalog order.
    pub types: Vec<Arc<Type>>,
    /// Foreign keys, grouped by owning type in catalog order.
    pub foreign_keys: Vec<ForeignKey>,
    /// Indexes, grouped by owning type in catalog order.
    pub indexes: Vec<Index>,
    /// Result shapes of custom queries.
    pub query_types: Vec<Arc<Type>>,
    /// Custom queries in configuration order.
    pub queries: Vec<Query>,
}

/// A single entity tagged with its category.
#[derive(Debug, Clone, Copy)]
pub enum TemplateItem<'a> {
    /// An enum.
    Enum(&'a Enum),
    /// A procedure.
    Proc(&'a Proc),
    /// A table or view type.
    Type(&'a Arc<Type>),
    /// A foreign key.
    ForeignKey(&'a ForeignKey),
    /// An index.
    Index(&'a Index),
    /// A query result shape.
    QueryType(&'a Arc<Type>),
    /// A custom query.
    Query(&'a Query),
    /// The shared administrative output for the schema.
    Admin(&'a Schema),
}

impl TemplateItem<'_> {
    /// Category of the item.
    pub fn kind(&self) -> TemplateKind {
        match self {
            TemplateItem::Enum(_) => TemplateKind::Enum,
            TemplateItem::Proc(_) => TemplateKind::Proc,
            TemplateItem::Type(_) => TemplateKind::Type,
            TemplateItem::ForeignKey(_) => TemplateKind::ForeignKey,
            TemplateItem::Index(_) => TemplateKind::Index,
            TemplateItem::QueryType(_) => TemplateKind::QueryType,
            TemplateItem::Query(_) => TemplateKind::Query,
            TemplateItem::Admin(_) => TemplateKind::Admin,
        }
    }

    /// Generated name of the item.
    pub fn name(&self) -> &str {
        match self {
            TemplateItem::Enum(e) => &e.name,
            TemplateItem::Proc(p) => &p.name,
            TemplateItem::Type(t) | TemplateItem::QueryType(t) => &t.name,
            TemplateItem::ForeignKey(fk) => &fk.name,
            TemplateItem::Index(ix) => &ix.func_name,
            TemplateItem::Query(q) => &q.name,
            TemplateItem::Admin(s) => &s.name,
        }
    }
}

impl TemplateSet {
    /// Create an empty set for a schema.
    pub fn new(schema: Schema, catalog: Arc<SchemaCatalog>) -> Self {
        Self {
            schema,
            catalog,
            escape: EscapeRules::default(),
            enums: Vec::new(),
            procs: Vec::new(),
            types: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            query_types: Vec::new(),
            queries: Vec::new(),
        }
    }

    /// Every item in emission order, ending with the administrative item.
    pub fn items(&self) -> impl Iterator<Item = TemplateItem<'_>> {
        self.enums
            .iter()
            .map(TemplateItem::Enum)
            .chain(self.procs.iter().map(TemplateItem::Proc))
            .chain(self.types.iter().map(TemplateItem::Type))
            .chain(self.foreign_keys.iter().map(TemplateItem::ForeignKey))
            .chain(self.indexes.iter().map(TemplateItem::Index))
            .chain(self.query_types.iter().map(TemplateItem::QueryType))
            .chain(self.queries.iter().map(TemplateItem::Query))
            .chain(std::iter::once(TemplateItem::Admin(&self.schema)))
    }

    /// Items of a single category, in emission order.
    pub fn items_of(&self, kind: TemplateKind) -> impl Iterator<Item = TemplateItem<'_>> {
        self.items().filter(move |item| item.kind() == kind)
    }

    /// Number of items in a category.
    pub fn count(&self, kind: TemplateKind) -> usize {
        match kind {
            TemplateKind::Enum => self.enums.len(),
            TemplateKind::Proc => self.procs.len(),
            TemplateKind::Type => self.types.len(),
            TemplateKind::ForeignKey => self.foreign_keys.len(),
            TemplateKind::Index => self.indexes.len(),
            TemplateKind::QueryType => self.query_types.len(),
            TemplateKind::Query => self.queries.len(),
            TemplateKind::Admin => 1,
        }
    }

    /// Get a table or view type by generated name.
    pub fn ty(&self, name: &str) -> Option<&Arc<Type>> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Get a query result type by generated name.
    pub fn query_type(&self, name: &str) -> Option<&Arc<Type>> {
        self.query_types.iter().find(|t| t.name == name)
    }

    /// Get a query by generated name.
    pub fn query(&self, name: &str) -> Option<&Query> {
        self.queries.iter().find(|q| q.name == name)
    }

    /// Foreign keys owned by `ty`.
    pub fn foreign_keys_of<'a>(&'a self, ty: &'a Arc<Type>) -> impl Iterator<Item = &'a ForeignKey> {
        self.foreign_keys.iter().filter(move |fk| Arc::ptr_eq(&fk.ty, ty))
    }

    /// Indexes on `ty`.
    pub fn indexes_of<'a>(&'a self, ty: &'a Arc<Type>) -> impl Iterator<Item = &'a Index> {
        self.indexes.iter().filter(move |ix| Arc::ptr_eq(&ix.ty, ty))
    }

    /// Escape an identifier according to the set's rules.
    pub fn escape<'a>(&self, target: EscapeTarget, ident: &'a str) -> Cow<'a, str> {
        self.escape.escape(target, ident)
    }

    /// `schema.table` with both parts escaped.
    pub fn qualified_table_name(&self, ty: &Type) -> String {
        format!(
            "{}.{}",
            self.escape(EscapeTarget::Schema, &self.schema.name),
            self.escape(EscapeTarget::Table, &ty.table_name)
        )
    }

    /// Check the linking invariants.
    pub fn validate(&self) -> Result<()> {
        let violations = validate(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Integrity(violations))
        }
    }
}
