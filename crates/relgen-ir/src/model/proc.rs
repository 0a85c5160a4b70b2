//! Stored procedure entity.

use super::Field;
use crate::catalog::ProcId;
use serde::Serialize;

/// A stored procedure or function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proc {
    /// Generated function name.
    pub name: String,
    /// SQL name of the procedure.
    pub proc_name: String,
    /// Owning schema name.
    pub schema: String,
    /// Pre-rendered parameter signature, e.g. `user_id: i64, note: String`.
    pub proc_params: String,
    /// Parameters in declaration order.
    pub params: Vec<Field>,
    /// Return value; `None` when the procedure returns nothing.
    #[serde(rename = "return")]
    pub ret: Option<Field>,
    /// Raw procedure.
    pub proc: ProcId,
    /// Free-form comment.
    pub comment: String,
}

impl Proc {
    /// Check whether the procedure returns nothing.
    pub fn is_void(&self) -> bool {
        self.ret.is_none()
    }
}

/// Render a `name: Type, ...` signature from parameter fields.
pub fn render_signature(params: &[Field]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect::<Vec<_>>()
        .join(", ")
}
