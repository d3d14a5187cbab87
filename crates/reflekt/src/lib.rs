//! Reflekt - zero-cost static reflection over declared struct fields
//!
//! A struct opts a subset of its fields into reflection once, with
//! `#[derive(Reflect)]`. Generic code can then enumerate those fields, read or
//! (given `&mut`) write their values, recurse into nested reflectable structs,
//! and run visitors with enter/exit hooks around each nesting boundary. All
//! dispatch is resolved at compile time; nothing is registered at runtime.
//!
//! # Example
//!
//! ```
//! use reflekt::Reflect;
//!
//! #[derive(Debug, Reflect)]
//! struct Point {
//!     x: f32,
//!     y: f32,
//! }
//!
//! #[derive(Reflect)]
//! #[reflect(fields(label, origin))]
//! struct Marker {
//!     origin: Point,
//!     label: String,
//!     cache: Vec<u8>,
//! }
//!
//! let marker = Marker {
//!     origin: Point { x: 1.0, y: 2.0 },
//!     label: "home".into(),
//!     cache: Vec::new(),
//! };
//!
//! assert_eq!(<Marker as Reflect>::FIELD_COUNT, 2);
//!
//! let mut names = Vec::new();
//! reflekt::visit_fields(&marker, |field| names.push(field.name()));
//! assert_eq!(names, ["label", "x", "y"]);
//! ```
//!
//! # Compile-time rejection
//!
//! Reflection operations on a type without the derive do not compile, and
//! neither does a declaration above the field limit (32 unless raised with
//! `#[reflect(max_fields = N)]`):
//!
//! ```compile_fail
//! use reflekt::Reflect;
//!
//! #[derive(Reflect)]
//! struct Wide {
//!     f0: u8, f1: u8, f2: u8, f3: u8, f4: u8, f5: u8, f6: u8, f7: u8,
//!     f8: u8, f9: u8, f10: u8, f11: u8, f12: u8, f13: u8, f14: u8, f15: u8,
//!     f16: u8, f17: u8, f18: u8, f19: u8, f20: u8, f21: u8, f22: u8, f23: u8,
//!     f24: u8, f25: u8, f26: u8, f27: u8, f28: u8, f29: u8, f30: u8, f31: u8,
//!     f32: u8,
//! }
//! ```
//!
//! A field whose type is neither a [`Leaf`] nor reflectable is rejected at
//! the declaration:
//!
//! ```compile_fail
//! use reflekt::Reflect;
//!
//! struct Opaque;
//!
//! #[derive(Reflect)]
//! struct Holder {
//!     inner: Opaque,
//! }
//! ```

//!
//! # Field type visibility
//!
//! Declared fields can be private, but a declared field's *type* must be at
//! least as visible as the record: the generated table names it in a trait
//! impl. A `pub` record holding a module-private type is rejected:
//!
//! ```compile_fail
//! mod shapes {
//!     use reflekt::Reflect;
//!
//!     #[derive(Debug)]
//!     struct Secret(u8);
//!
//!     impl reflekt::Leaf for Secret {}
//!
//!     #[derive(Reflect)]
//!     pub struct Public {
//!         id: u8,
//!         secret: Secret,
//!     }
//! }
//! ```
//!
//! Declaring the type `pub` inside a private module keeps it unreachable from
//! outside while satisfying the check. Alternatively leave the field out with
//! `#[reflect(skip)]`:
//!
//! ```
//! mod shapes {
//!     use reflekt::Reflect;
//!
//!     mod detail {
//!         #[derive(Debug)]
//!         pub struct Secret(pub u8);
//!
//!         impl reflekt::Leaf for Secret {}
//!     }
//!
//!     #[derive(Debug)]
//!     struct Hidden(u8);
//!
//!     #[derive(Reflect)]
//!     pub struct Public {
//!         id: u8,
//!         secret: detail::Secret,
//!         #[reflect(skip)]
//!         hidden: Hidden,
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod field;
mod leaf;
mod print;
mod reflect;
mod visit;

pub use field::{ErasedField, ErasedFieldMut, Field, FieldDecl, FieldMut, Selector};
pub use leaf::{AnyLeaf, Leaf};
pub use print::{pretty_print, pretty_print_to, print, to_pretty_string, PrettyOptions};
pub use reflect::{
    field, field_count, field_index, field_mut, field_names, is_record, HasField, Member, Reflect,
};
pub use visit::{visit, visit_fields, visit_fields_mut, visit_mut, Callbacks, Visitor, VisitorMut};

/// Derive macro generating the static field table; see [`Reflect`].
pub use reflekt_derive::Reflect;

/// Default ceiling on declared fields per type.
///
/// Raise or lower it per type with `#[reflect(max_fields = N)]`.
// Mirrors `DEFAULT_MAX_FIELDS` in reflekt-derive/src/attrs.rs, which is the
// value the derive enforces.
pub const DEFAULT_MAX_FIELDS: usize = 32;

// Support items for generated code and macros. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::reflect::{NotReflectable, Probe, Reflectable};
    pub use crate::visit::{descend, descend_mut, walk_field, walk_field_mut};
}
