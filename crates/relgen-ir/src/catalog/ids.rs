//! Opaque identifiers for raw catalog records.
//!
//! Template entities keep one of these instead of a pointer into the
//! introspector's data; `SchemaCatalog` resolves them.

use serde::Serialize;

macro_rules! top_level_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Position of the record in its catalog list.
            pub const fn index(self) -> usize {
                self.0
            }
        }
    };
}

macro_rules! table_member_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name {
            pub(crate) table: TableId,
            pub(crate) index: usize,
        }

        impl $name {
            /// Owning table.
            pub const fn table(self) -> TableId {
                self.table
            }

            /// Position of the record within its table.
            pub const fn index(self) -> usize {
                self.index
            }
        }
    };
}

top_level_id!(
    /// Identifies a `RawEnum`.
    EnumId
);
top_level_id!(
    /// Identifies a `RawProc`.
    ProcId
);
top_level_id!(
    /// Identifies a `RawTable`.
    TableId
);

table_member_id!(
    /// Identifies a `RawColumn` within its table.
    ColumnId
);
table_member_id!(
    /// Identifies a `RawForeignKey` within its table.
    ForeignKeyId
);
table_member_id!(
    /// Identifies a `RawIndex` within its table.
    IndexId
);

/// Identifies a `RawEnumValue` within its enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EnumValueId {
    pub(crate) enum_id: EnumId,
    pub(crate) index: usize,
}

impl EnumValueId {
    /// Owning enum.
    pub const fn enum_id(self) -> EnumId {
        self.enum_id
    }

    /// Declaration position of the value.
    pub const fn index(self) -> usize {
        self.index
    }
}
