//! Closed enumerations: template categories, relation kinds and escape targets.
//!
//! Each enumeration rejects out-of-range values when it is constructed, so the
//! display forms are total and never fail.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Template category.
///
/// Declaration order is emission order: the renderer writes and groups output
/// in exactly this sequence, so `Ord` is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Database enum types.
    Enum,
    /// Stored procedures and functions.
    Proc,
    /// Tables and views.
    Type,
    /// Foreign key accessors.
    ForeignKey,
    /// Index accessors.
    Index,
    /// Result shapes of custom queries.
    QueryType,
    /// Custom queries.
    Query,
    /// Shared administrative output. Always last.
    #[serde(rename = "relgen_db")]
    Admin,
}

impl TemplateKind {
    /// Every category, in emission order.
    pub const ALL: [TemplateKind; 8] = [
        TemplateKind::Enum,
        TemplateKind::Proc,
        TemplateKind::Type,
        TemplateKind::ForeignKey,
        TemplateKind::Index,
        TemplateKind::QueryType,
        TemplateKind::Query,
        TemplateKind::Admin,
    ];

    /// Stable lowercase name, used for file stems and section naming.
    pub const fn name(self) -> &'static str {
        match self {
            TemplateKind::Enum => "enum",
            TemplateKind::Proc => "proc",
            TemplateKind::Type => "type",
            TemplateKind::ForeignKey => "foreignkey",
            TemplateKind::Index => "index",
            TemplateKind::QueryType => "querytype",
            TemplateKind::Query => "query",
            TemplateKind::Admin => "relgen_db",
        }
    }

    /// Position in emission order.
    pub const fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for TemplateKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TemplateKind::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| Error::UnknownTemplateKind(value.to_string()))
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownTemplateKind(s.to_string()))
    }
}

/// Relational storage kind of a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelKind {
    /// A base table.
    #[default]
    Table,
    /// A view.
    View,
}

impl RelKind {
    /// Canonical SQL keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            RelKind::Table => "TABLE",
            RelKind::View => "VIEW",
        }
    }
}

impl fmt::Display for RelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl TryFrom<u8> for RelKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RelKind::Table),
            1 => Ok(RelKind::View),
            other => Err(Error::UnknownRelKind(other)),
        }
    }
}

/// Identifier position, used to pick the escaping rule for an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeTarget {
    /// Schema name.
    Schema,
    /// Table or view name.
    Table,
    /// Column name.
    Column,
}

impl TryFrom<u8> for EscapeTarget {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EscapeTarget::Schema),
            1 => Ok(EscapeTarget::Table),
            2 => Ok(EscapeTarget::Column),
            other => Err(Error::UnknownEscapeTarget(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_kind_names_are_fixed_and_unique() {
        let names: Vec<_> = TemplateKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            [
                "enum",
                "proc",
                "type",
                "foreignkey",
                "index",
                "querytype",
                "query",
                "relgen_db"
            ]
        );

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn test_template_kind_order_matches_declaration() {
        let mut sorted = TemplateKind::ALL;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, TemplateKind::ALL);
        assert_eq!(TemplateKind::ALL.last(), Some(&TemplateKind::Admin));

        for (i, kind) in TemplateKind::ALL.iter().enumerate() {
            assert_eq!(kind.position(), i);
        }
    }

    #[test]
    fn test_template_kind_rejects_out_of_range() {
        for raw in 0..8u8 {
            assert!(TemplateKind::try_from(raw).is_ok());
        }
        assert!(matches!(
            TemplateKind::try_from(8),
            Err(Error::UnknownTemplateKind(v)) if v == "8"
        ));
        assert!(matches!(
            "xo_db".parse::<TemplateKind>(),
            Err(Error::UnknownTemplateKind(_))
        ));
    }

    #[test]
    fn test_template_kind_parse_roundtrips_names() {
        for kind in TemplateKind::ALL {
            assert_eq!(kind.name().parse::<TemplateKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_rel_kind_display() {
        assert_eq!(RelKind::Table.to_string(), "TABLE");
        assert_eq!(RelKind::View.to_string(), "VIEW");
        assert_eq!(RelKind::try_from(1).unwrap(), RelKind::View);
        assert!(matches!(RelKind::try_from(2), Err(Error::UnknownRelKind(2))));
    }

    #[test]
    fn test_escape_target_is_closed() {
        let targets: HashSet<_> = (0..3u8)
            .map(|raw| EscapeTarget::try_from(raw).unwrap())
            .collect();
        assert_eq!(targets.len(), 3);
        assert!(matches!(
            EscapeTarget::try_from(3),
            Err(Error::UnknownEscapeTarget(3))
        ));
    }
}
