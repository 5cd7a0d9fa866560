//! # Internal Macros
//!
//! This module provides internal macros for reducing boilerplate in the
//! generated table accessors.
//!
//! ## table_fields!
//!
//! Generates the vtable slot constant, the getter and the builder function
//! for each field of a table type. The type must be a wrapper with a
//! `table: Table<'a>` field.
//!
//! ### Usage
//!
//! ```ignore
//! pub struct FriendFb<'a> {
//!     table: Table<'a>,
//! }
//!
//! impl<'a> FriendFb<'a> {
//!     table_fields! { <'a>
//!         id @ 0: str,
//!         age @ 1: i32 = 0,
//!         tags @ 2: vector,
//!     }
//! }
//!
//! // Generates:
//! // pub const VT_ID: VOffset = field_slot(0);
//! // pub fn id(&self) -> Option<&'a str> { ... }
//! // pub fn add_id(builder: &mut FlatBufferBuilder, value: Offset) { ... }
//! // pub const VT_AGE: VOffset = field_slot(1);
//! // pub fn age(&self) -> i32 { ... }
//! // pub fn add_age(builder: &mut FlatBufferBuilder, value: i32) { ... }
//! // pub const VT_TAGS: VOffset = field_slot(2);
//! // pub fn tags(&self) -> Option<Vector<'a>> { ... }
//! // pub fn add_tags(builder: &mut FlatBufferBuilder, value: Offset) { ... }
//! ```
//!
//! Scalar fields take their schema default after `=`; the builder omits the
//! field when the value equals it and the getter returns it when absent.

/// Generates slot constants, getters and `add_*` builder functions for
/// table fields.
#[macro_export]
macro_rules! table_fields {
    (@field $lt:lifetime, $field:ident, $index:literal, str) => {
        ::paste::paste! {
            pub const [<VT_ $field:upper>]: $crate::flatbuf::VOffset =
                $crate::flatbuf::field_slot($index);

            #[inline]
            pub fn $field(&self) -> Option<&$lt str> {
                self.table.get_str(Self::[<VT_ $field:upper>])
            }

            #[inline]
            pub fn [<add_ $field>](
                builder: &mut $crate::flatbuf::FlatBufferBuilder,
                value: $crate::flatbuf::Offset,
            ) {
                builder.add_offset(Self::[<VT_ $field:upper>], value);
            }
        }
    };
    (@field $lt:lifetime, $field:ident, $index:literal, vector) => {
        ::paste::paste! {
            pub const [<VT_ $field:upper>]: $crate::flatbuf::VOffset =
                $crate::flatbuf::field_slot($index);

            #[inline]
            pub fn $field(&self) -> Option<$crate::flatbuf::Vector<$lt>> {
                self.table.get_vector(Self::[<VT_ $field:upper>])
            }

            #[inline]
            pub fn [<add_ $field>](
                builder: &mut $crate::flatbuf::FlatBufferBuilder,
                value: $crate::flatbuf::Offset,
            ) {
                builder.add_offset(Self::[<VT_ $field:upper>], value);
            }
        }
    };
    (@field $lt:lifetime, $field:ident, $index:literal, $ty:ty = $default:expr) => {
        ::paste::paste! {
            pub const [<VT_ $field:upper>]: $crate::flatbuf::VOffset =
                $crate::flatbuf::field_slot($index);

            #[inline]
            pub fn $field(&self) -> $ty {
                self.table.get::<$ty>(Self::[<VT_ $field:upper>], $default)
            }

            #[inline]
            pub fn [<add_ $field>](builder: &mut $crate::flatbuf::FlatBufferBuilder, value: $ty) {
                builder.add_field::<$ty>(Self::[<VT_ $field:upper>], value, $default);
            }
        }
    };
    (<$lt:lifetime> $($field:ident @ $index:literal : $kind:tt $(= $default:expr)?),* $(,)?) => {
        $(
            $crate::table_fields!(@field $lt, $field, $index, $kind $(= $default)?);
        )*
    };
}
