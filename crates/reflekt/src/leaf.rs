//! Leaf values: field types that traversal hands to the visitor as-is.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// A field type that is not itself a reflected record.
///
/// Traversal calls [`Visitor::leaf`](crate::Visitor::leaf) on fields of leaf
/// types instead of recursing. Implemented for primitives and common std
/// containers; opt your own types in with an empty impl:
///
/// ```
/// #[derive(Debug)]
/// struct Rgb(u8, u8, u8);
///
/// impl reflekt::Leaf for Rgb {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a reflected field",
    label = "neither a leaf nor a reflectable record",
    note = "derive `Reflect` for `{Self}` to recurse into it, or `impl reflekt::Leaf for {Self} {{}}` to treat it as a leaf"
)]
pub trait Leaf: fmt::Debug + 'static {}

/// Object-safe view of a [`Leaf`], used by the type-erased descriptors.
pub trait AnyLeaf: fmt::Debug + Any {
    /// Upcast to `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Upcast to `Any` for mutable downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast to `Debug` for formatting.
    fn as_debug(&self) -> &dyn fmt::Debug;
}

impl<T: Leaf> AnyLeaf for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_debug(&self) -> &dyn fmt::Debug {
        self
    }
}

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {
        $(impl Leaf for $ty {})*
    };
}

impl_leaf!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, (),
    String, &'static str, PathBuf, Duration,
);

impl<T: fmt::Debug + 'static> Leaf for Option<T> {}
impl<T: fmt::Debug + ?Sized + 'static> Leaf for Box<T> {}
impl<T: fmt::Debug + ?Sized + 'static> Leaf for Rc<T> {}
impl<T: fmt::Debug + ?Sized + 'static> Leaf for Arc<T> {}
impl<T: fmt::Debug + 'static> Leaf for Vec<T> {}
impl<T: fmt::Debug + 'static> Leaf for VecDeque<T> {}
impl<T: fmt::Debug + 'static, const N: usize> Leaf for [T; N] {}
impl<T: fmt::Debug + 'static, S: 'static> Leaf for HashSet<T, S> {}
impl<K: fmt::Debug + 'static, V: fmt::Debug + 'static, S: 'static> Leaf for HashMap<K, V, S> {}
impl<T: fmt::Debug + 'static> Leaf for BTreeSet<T> {}
impl<K: fmt::Debug + 'static, V: fmt::Debug + 'static> Leaf for BTreeMap<K, V> {}

macro_rules! impl_leaf_tuple {
    ($(($($name:ident),+))*) => {
        $(impl<$($name: fmt::Debug + 'static),+> Leaf for ($($name,)+) {})*
    };
}

impl_leaf_tuple! {
    (A)
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
    (A, B, C, D, E, F)
}
