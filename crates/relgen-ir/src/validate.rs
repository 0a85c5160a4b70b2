//! Linking invariants of a template set.
//!
//! The builder runs these checks before handing a set to the renderer; they
//! are public so that any other producer of a `TemplateSet` can be held to
//! the same contract.

use crate::model::{Field, Type};
use crate::templates::TemplateSet;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// A broken linking invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A primary key field is not one of the type's fields.
    #[error("type '{ty}': primary key field '{field}' is not one of its fields")]
    StrayPrimaryKey {
        /// Type name.
        ty: String,
        /// Field name.
        field: String,
    },

    /// Two fields of one type share a generated name.
    #[error("type '{ty}' declares field '{field}' more than once")]
    DuplicateField {
        /// Type name.
        ty: String,
        /// Field name.
        field: String,
    },

    /// A foreign key or index links to a type that is not in the set.
    #[error("{owner} links to type '{ty}' outside the template set")]
    DetachedType {
        /// Linking entity, e.g. `foreign key 'orders_user_fk'`.
        owner: String,
        /// Type name.
        ty: String,
    },

    /// A linked field is not a member of the type it is linked through.
    #[error("{owner}: field '{field}' is not a field of type '{ty}'")]
    DanglingField {
        /// Linking entity.
        owner: String,
        /// Field name.
        field: String,
        /// Type name.
        ty: String,
    },

    /// Index fields are not in catalog column order.
    #[error("index '{index}': fields {actual:?} do not match catalog order {expected:?}")]
    IndexOrder {
        /// Index name.
        index: String,
        /// Column names in catalog order.
        expected: Vec<String>,
        /// Column names as linked.
        actual: Vec<String>,
    },

    /// Enum values are not in catalog declaration order.
    #[error("enum '{name}': values do not match catalog declaration order")]
    EnumOrder {
        /// Enum name.
        name: String,
    },

    /// A query's result type is not in the set.
    #[error("query '{query}' returns type '{ty}' outside the template set")]
    UnknownQueryType {
        /// Query name.
        query: String,
        /// Type name.
        ty: String,
    },

    /// A query's comments are not parallel to its lines.
    #[error("query '{query}': {comments} line comments for {lines} lines")]
    CommentMismatch {
        /// Query name.
        query: String,
        /// Number of lines.
        lines: usize,
        /// Number of line comments.
        comments: usize,
    },
}

/// Check every linking invariant of `set`, returning all violations found.
pub fn validate(set: &TemplateSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    for ty in set.types.iter().chain(&set.query_types) {
        check_type(ty, &mut violations);
    }
    check_foreign_keys(set, &mut violations);
    check_indexes(set, &mut violations);
    check_enums(set, &mut violations);
    check_queries(set, &mut violations);

    violations
}

fn check_type(ty: &Type, out: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    for field in &ty.fields {
        if !seen.insert(field.name.as_str()) {
            out.push(Violation::DuplicateField {
                ty: ty.name.clone(),
                field: field.name.clone(),
            });
        }
    }

    for key in &ty.primary_key_fields {
        if !ty.contains(key) {
            out.push(Violation::StrayPrimaryKey {
                ty: ty.name.clone(),
                field: key.name.clone(),
            });
        }
    }
}

fn member_of(types: &[Arc<Type>], ty: &Arc<Type>) -> bool {
    types.iter().any(|t| Arc::ptr_eq(t, ty))
}

fn check_link(
    set: &TemplateSet,
    owner: &str,
    ty: &Arc<Type>,
    fields: &[&Arc<Field>],
    out: &mut Vec<Violation>,
) {
    if !member_of(&set.types, ty) {
        out.push(Violation::DetachedType {
            owner: owner.to_string(),
            ty: ty.name.clone(),
        });
    }
    for field in fields {
        if !ty.contains(field) {
            out.push(Violation::DanglingField {
                owner: owner.to_string(),
                field: field.name.clone(),
                ty: ty.name.clone(),
            });
        }
    }
}

fn check_foreign_keys(set: &TemplateSet, out: &mut Vec<Violation>) {
    for fk in &set.foreign_keys {
        let owner = format!("foreign key '{}'", fk.key_name);
        check_link(set, &owner, &fk.ty, &[&fk.field], out);
        check_link(set, &owner, &fk.ref_type, &[&fk.ref_field], out);
    }
}

fn check_indexes(set: &TemplateSet, out: &mut Vec<Violation>) {
    for index in &set.indexes {
        let owner = format!("index '{}'", index.index_name);
        let fields: Vec<_> = index.fields.iter().collect();
        check_link(set, &owner, &index.ty, &fields, out);

        let Some(raw) = index.index.and_then(|id| set.catalog.index(id)) else {
            continue;
        };
        let actual: Vec<String> = index.fields.iter().map(|f| f.column_name.clone()).collect();
        if actual != raw.columns {
            out.push(Violation::IndexOrder {
                index: index.index_name.clone(),
                expected: raw.columns.clone(),
                actual,
            });
        }
    }
}

fn check_enums(set: &TemplateSet, out: &mut Vec<Violation>) {
    for e in &set.enums {
        let Some(raw) = set.catalog.enum_def(e.enum_id) else {
            continue;
        };
        let in_order = e.values.len() == raw.values.len()
            && e.values.iter().zip(&raw.values).enumerate().all(|(i, (v, r))| {
                v.label == r.name && v.value.enum_id() == e.enum_id && v.value.index() == i
            });
        if !in_order {
            out.push(Violation::EnumOrder {
                name: e.name.clone(),
            });
        }
    }
}

fn check_queries(set: &TemplateSet, out: &mut Vec<Violation>) {
    for query in &set.queries {
        if let Some(ty) = &query.ty {
            if !member_of(&set.query_types, ty) && !member_of(&set.types, ty) {
                out.push(Violation::UnknownQueryType {
                    query: query.name.clone(),
                    ty: ty.name.clone(),
                });
            }
        }
        if query.lines.len() != query.line_comments.len() {
            out.push(Violation::CommentMismatch {
                query: query.name.clone(),
                lines: query.lines.len(),
                comments: query.line_comments.len(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::IrBuilder;
    use crate::catalog::{RawColumn, RawEnum, RawIndex, RawTable, SchemaCatalog};
    use crate::config::{GeneratorConfig, QueryDef, QueryFieldDef};
    use crate::resolve::StandardTypeResolver;

    fn linked_set() -> TemplateSet {
        let catalog = SchemaCatalog::new("blog")
            .with_enum(RawEnum::new("post_state").with_value("draft").with_value("live"))
            .with_table(
                RawTable::new("authors")
                    .with_column(RawColumn::new("id", "integer").primary_key())
                    .with_column(RawColumn::new("handle", "text")),
            )
            .with_table(
                RawTable::new("posts")
                    .with_column(RawColumn::new("id", "integer").primary_key())
                    .with_column(RawColumn::new("author_id", "integer"))
                    .with_column(RawColumn::new("state", "post_state"))
                    .with_foreign_key("posts_author_fk", "author_id", "authors", "id")
                    .with_index(RawIndex::new("posts_author_state_idx", ["author_id", "state"])),
            );
        let config = GeneratorConfig::new().with_query(
            QueryDef::new("post_count", "SELECT count(*) AS n FROM posts")
                .with_field(QueryFieldDef::new("n", "bigint")),
        );

        IrBuilder::new(&config, &StandardTypeResolver)
            .build(Arc::new(catalog))
            .unwrap()
    }

    #[test]
    fn test_built_set_is_clean() {
        assert!(validate(&linked_set()).is_empty());
    }

    #[test]
    fn test_foreign_key_field_outside_type() {
        let mut set = linked_set();
        let copy = Arc::new((*set.foreign_keys[0].field).clone());
        set.foreign_keys[0].field = copy;

        let violations = validate(&set);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            &violations[0],
            Violation::DanglingField { field, ty, .. } if field == "AuthorId" && ty == "Posts"
        ));
    }

    #[test]
    fn test_detached_reference_type() {
        let mut set = linked_set();
        let copy = Arc::new((*set.foreign_keys[0].ref_type).clone());
        set.foreign_keys[0].ref_type = copy;

        let violations = validate(&set);
        assert_eq!(
            violations,
            vec![Violation::DetachedType {
                owner: "foreign key 'posts_author_fk'".to_string(),
                ty: "Authors".to_string(),
            }]
        );
    }

    #[test]
    fn test_stray_primary_key_and_duplicate_field() {
        let mut set = linked_set();
        let mut ty = (*set.types[0]).clone();
        let id = Arc::new((*ty.primary_key_fields[0]).clone());
        ty.primary_key_fields = vec![id];
        ty.fields.push(Arc::clone(&ty.fields[1]));
        set.types[0] = Arc::new(ty);

        let violations = validate(&set);
        assert!(violations.contains(&Violation::StrayPrimaryKey {
            ty: "Authors".to_string(),
            field: "Id".to_string(),
        }));
        assert!(violations.contains(&Violation::DuplicateField {
            ty: "Authors".to_string(),
            field: "Handle".to_string(),
        }));
    }

    #[test]
    fn test_index_fields_out_of_order() {
        let mut set = linked_set();
        set.indexes[0].fields.reverse();

        let violations = validate(&set);
        assert_eq!(
            violations,
            vec![Violation::IndexOrder {
                index: "posts_author_state_idx".to_string(),
                expected: vec!["author_id".to_string(), "state".to_string()],
                actual: vec!["state".to_string(), "author_id".to_string()],
            }]
        );
    }

    #[test]
    fn test_enum_values_out_of_order() {
        let mut set = linked_set();
        set.enums[0].values.swap(0, 1);

        assert_eq!(
            validate(&set),
            vec![Violation::EnumOrder {
                name: "PostState".to_string()
            }]
        );
    }

    #[test]
    fn test_query_checks() {
        let mut set = linked_set();
        set.query_types.clear();
        set.queries[0].line_comments.push("orphan".to_string());

        let violations = validate(&set);
        assert_eq!(violations.len(), 2);
        assert!(matches!(&violations[0], Violation::UnknownQueryType { ty, .. } if ty == "PostCountRow"));
        assert!(matches!(
            &violations[1],
            Violation::CommentMismatch { lines: 1, comments: 2, .. }
        ));
    }

    #[test]
    fn test_violations_surface_as_integrity_error() {
        let mut set = linked_set();
        set.indexes[0].fields.reverse();

        let err = set.validate().unwrap_err();
        assert!(matches!(err, crate::error::Error::Integrity(ref v) if v.len() == 1));
    }
}
