//! Relgen IR - Template intermediate representation for database code generation.
//!
//! This crate turns raw catalog metadata into a linked, renderer-facing model:
//! enums, procedures, table and view types, foreign keys, indexes and custom
//! queries, each tagged with the template category it renders through.

pub mod build;
pub mod catalog;
pub mod config;
pub mod error;
pub mod kind;
pub mod model;
pub mod naming;
pub mod query;
pub mod resolve;
pub mod templates;
pub mod validate;

pub use build::IrBuilder;
pub use catalog::{
    RawColumn, RawEnum, RawEnumValue, RawForeignKey, RawIndex, RawProc, RawProcParam, RawTable,
    SchemaCatalog,
};
pub use config::{GeneratorConfig, QueryDef, QueryFieldDef};
pub use error::{Error, Result};
pub use kind::{EscapeTarget, RelKind, TemplateKind};
pub use model::{Enum, EnumValue, Field, ForeignKey, Index, Proc, Query, QueryParam, Schema, Type};
pub use naming::{camel_to_snake, EscapeRules, ForeignKeyMode};
pub use query::{PlaceholderStyle, QueryOptions};
pub use resolve::{ResolvedType, StandardTypeResolver, TypeResolver};
pub use templates::{TemplateItem, TemplateSet};
pub use validate::Violation;
