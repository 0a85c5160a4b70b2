//! Custom query entities.

use super::Type;
use serde::Serialize;
use std::sync::Arc;

/// A declared parameter of a custom query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParam {
    /// Parameter name.
    pub name: String,
    /// Target type name.
    #[serde(rename = "type")]
    pub ty: String,
    /// Substitute the value into the query text instead of binding it.
    pub interpolate: bool,
}

/// A user-authored query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Owning schema name.
    pub schema: String,
    /// Generated function name.
    pub name: String,
    /// Query text, one entry per source line.
    pub lines: Vec<String>,
    /// Leading comment of each line; same length as `lines`, empty for none.
    pub line_comments: Vec<String>,
    /// Declared parameters in order of first use.
    pub params: Vec<QueryParam>,
    /// At most one row is expected.
    pub only_one: bool,
    /// File-level default for parameter interpolation.
    pub interpolate: bool,
    /// Result row shape; `None` when the query returns no typed rows.
    #[serde(rename = "type")]
    pub ty: Option<Arc<Type>>,
    /// Free-form comment.
    pub comment: String,
}

impl Query {
    /// Query text joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Parameters bound at execution time, in placeholder order.
    pub fn bound_params(&self) -> impl Iterator<Item = &QueryParam> {
        self.params.iter().filter(|p| !p.interpolate)
    }
}
