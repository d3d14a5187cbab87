// reflekt-derive: field table generation for reflekt
//
// Provides the derive macro behind static reflection:
// - #[derive(Reflect)] - Declares which fields of a struct are reflected
//
// Example:
// ```
// use reflekt::Reflect;
//
// #[derive(Debug, Reflect)]
// #[reflect(fields(x, y))]
// struct Point {
//     x: f32,
//     y: f32,
//     cache: Vec<u8>,
// }
// ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod error;
mod reflect;

/// Declares a struct as reflectable.
///
/// Generates a static field table for the struct:
/// - One `FieldDecl` marker per declared field (ordinal, name, value type, accessors)
/// - `HasField<N>` for every ordinal, so lookup by ordinal is checked at compile time
/// - `Reflect` (field count and names) and `Member` (recursion into nested records)
///
/// # Attributes
///
/// On the struct:
/// - `#[reflect(fields(a, b, ...))]` - exposes exactly these members, in this order
/// - `#[reflect(max_fields = N)]` - raises or lowers the field limit (default 32)
/// - `#[reflect(crate = "path")]` - path to the reflekt crate in generated code
///
/// On a field:
/// - `#[reflect(skip)]` - leaves the field out (only without `fields(...)`)
/// - `#[reflect(rename = "name")]` - declares the field under another name
///
/// # Visibility
///
/// Fields may have any visibility. The type of every declared field must be
/// at least as visible as the struct, because the generated `FieldDecl` impl
/// names it as an associated type; otherwise rustc reports E0446. Make the
/// type `pub` (a private module keeps it unreachable) or `#[reflect(skip)]`
/// the field.
///
/// # Example
///
/// ```ignore
/// #[derive(Reflect)]
/// struct Private {
///     x: [i32; 1],
///     #[reflect(rename = "size")]
///     y: usize,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::expand_reflect(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
