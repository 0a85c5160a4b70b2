//! Mapping database types to target-language types.

use serde::Serialize;

/// A database type resolved for the target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedType {
    /// Target type name.
    pub name: String,
    /// Zero or null value expression of the type.
    pub nil_type: String,
    /// Declared length or precision, if the type has one.
    pub len: Option<u32>,
}

/// Resolves catalog data types. Implemented per dialect.
pub trait TypeResolver {
    /// Resolve `data_type` for a column or parameter.
    fn resolve(&self, data_type: &str, nullable: bool) -> ResolvedType;

    /// Resolve a column whose data type is a generated enum named `type_name`.
    fn resolve_enum(&self, type_name: &str, nullable: bool) -> ResolvedType {
        if nullable {
            ResolvedType {
                name: format!("Option<{type_name}>"),
                nil_type: "None".to_string(),
                len: None,
            }
        } else {
            ResolvedType {
                name: type_name.to_string(),
                nil_type: format!("{type_name}::default()"),
                len: None,
            }
        }
    }

    /// Resolve an array column from its already resolved element type.
    fn resolve_array(&self, element: ResolvedType, nullable: bool) -> ResolvedType {
        let name = format!("Vec<{}>", element.name);
        if nullable {
            ResolvedType {
                name: format!("Option<{name}>"),
                nil_type: "None".to_string(),
                len: None,
            }
        } else {
            ResolvedType {
                name,
                nil_type: "Vec::new()".to_string(),
                len: None,
            }
        }
    }
}

/// The element type of an array type name such as `text[]`.
pub fn array_element(data_type: &str) -> Option<&str> {
    data_type.trim().strip_suffix("[]").map(str::trim_end)
}

/// Interpret a raw length where `-1` and `0` mean "not applicable".
pub fn len_from_raw(raw: i64) -> Option<u32> {
    if raw <= 0 {
        return None;
    }
    u32::try_from(raw).ok()
}

/// Resolver for common ANSI, PostgreSQL and MySQL type names, targeting Rust.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypeResolver;

impl StandardTypeResolver {
    fn base(data_type: &str) -> (&'static str, &'static str) {
        match data_type {
            "bool" | "boolean" | "bit" => ("bool", "false"),
            "smallint" | "int2" | "smallserial" | "tinyint" => ("i16", "0"),
            "integer" | "int" | "int4" | "serial" | "mediumint" => ("i32", "0"),
            "bigint" | "int8" | "bigserial" => ("i64", "0"),
            "real" | "float4" => ("f32", "0.0"),
            "double precision" | "double" | "float8" | "float" => ("f64", "0.0"),
            "bytea" | "blob" | "binary" | "varbinary" | "longblob" => ("Vec<u8>", "Vec::new()"),
            _ => ("String", "String::new()"),
        }
    }
}

impl TypeResolver for StandardTypeResolver {
    fn resolve(&self, data_type: &str, nullable: bool) -> ResolvedType {
        if let Some(element) = array_element(data_type) {
            return self.resolve_array(self.resolve(element, false), nullable);
        }

        let (base, len) = split_length(data_type);
        let (name, zero) = Self::base(&base);

        if nullable {
            ResolvedType {
                name: format!("Option<{name}>"),
                nil_type: "None".to_string(),
                len,
            }
        } else {
            ResolvedType {
                name: name.to_string(),
                nil_type: zero.to_string(),
                len,
            }
        }
    }
}

/// Split `varchar(255)` into `("varchar", Some(255))`.
///
/// For `numeric(10,2)` the precision is the length. The base name is
/// lowercased and stripped of any unsigned suffix.
fn split_length(data_type: &str) -> (String, Option<u32>) {
    let lowered = data_type.trim().to_lowercase();
    let lowered = lowered.trim_end_matches(" unsigned").trim();

    match lowered.split_once('(') {
        Some((base, rest)) => {
            let digits = rest
                .trim_end_matches(')')
                .split(',')
                .next()
                .unwrap_or_default()
                .trim();
            let len = digits.parse::<i64>().ok().and_then(len_from_raw);
            (base.trim().to_string(), len)
        }
        None => (lowered.to_string(), None),
    }
}
