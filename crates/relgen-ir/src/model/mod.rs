//! Template entity model.
//!
//! Renderer-ready records built once per generation run. `Field` and `Type`
//! are shared through `Arc` so that foreign keys, indexes and queries link to
//! the exact instances owned by their types.

mod enums;
mod field;
mod proc;
mod query;
mod relation;
mod schema;
mod type_def;

pub use enums::{Enum, EnumValue};
pub use field::Field;
pub use proc::{render_signature, Proc};
pub use query::{Query, QueryParam};
pub use relation::{ForeignKey, Index};
pub use schema::Schema;
pub use type_def::Type;
