//! The reflectable capability and its type-level queries.

use std::marker::PhantomData;

use crate::field::{Field, FieldDecl, FieldMut};
use crate::leaf::Leaf;
use crate::visit::{Visitor, VisitorMut};

/// A record type whose fields were declared with `#[derive(Reflect)]`.
///
/// Reflectability is structural: the derive is the only registration step.
/// Every query below is resolved at compile time.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not reflectable",
    label = "`{Self}` does not declare its fields",
    note = "add `#[derive(Reflect)]` to `{Self}`"
)]
pub trait Reflect: Member + Sized {
    /// Number of declared fields.
    const FIELD_COUNT: usize;

    /// Declared field names, in declared order.
    const FIELD_NAMES: &'static [&'static str];

    /// Hand every declared field, in order, to the visitor.
    ///
    /// Leaf fields go to [`Visitor::leaf`]; record fields are wrapped in
    /// `enter`/`exit` and walked recursively.
    fn walk_fields<V: Visitor>(&self, visitor: &mut V);

    /// Mutable counterpart of [`walk_fields`](Self::walk_fields).
    fn walk_fields_mut<V: VisitorMut>(&mut self, visitor: &mut V);
}

/// Ordinal lookup: `R: HasField<N>` holds exactly when `N < R::FIELD_COUNT`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no reflected field at ordinal {N}",
    note = "ordinals run from 0 to `<{Self} as Reflect>::FIELD_COUNT - 1`"
)]
pub trait HasField<const N: usize>: Reflect {
    /// Declaration of field `N`.
    type Decl: FieldDecl<Record = Self>;
}

/// How a field's value type takes part in traversal.
///
/// Every declared field type must implement `Member`. Leaf types get it from
/// the blanket impl over [`Leaf`]; reflectable records get it from the derive.
/// The choice between "call the leaf callback" and "recurse" is made here,
/// statically, per field type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a reflected field",
    label = "neither a leaf nor a reflectable record",
    note = "derive `Reflect` for `{Self}` to recurse into it, or `impl reflekt::Leaf for {Self} {{}}` to treat it as a leaf"
)]
pub trait Member: 'static {
    /// `true` for reflectable records, `false` for leaves.
    const REFLECTABLE: bool;

    /// Visit a field holding a value of this type.
    fn accept<F, V>(field: Field<'_, F>, visitor: &mut V)
    where
        F: FieldDecl<Value = Self>,
        V: Visitor;

    /// Visit a mutable field holding a value of this type.
    fn accept_mut<F, V>(field: FieldMut<'_, F>, visitor: &mut V)
    where
        F: FieldDecl<Value = Self>,
        V: VisitorMut;
}

impl<T: Leaf> Member for T {
    const REFLECTABLE: bool = false;

    #[inline]
    fn accept<F, V>(field: Field<'_, F>, visitor: &mut V)
    where
        F: FieldDecl<Value = Self>,
        V: Visitor,
    {
        visitor.leaf(field)
    }

    #[inline]
    fn accept_mut<F, V>(field: FieldMut<'_, F>, visitor: &mut V)
    where
        F: FieldDecl<Value = Self>,
        V: VisitorMut,
    {
        visitor.leaf(field)
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Number of declared fields of `R`.
pub const fn field_count<R: Reflect>() -> usize {
    R::FIELD_COUNT
}

/// Declared field names of `R`, in declared order.
pub const fn field_names<R: Reflect>() -> &'static [&'static str] {
    R::FIELD_NAMES
}

/// Ordinal of the field declared as `name`, if `R` declares one.
pub fn field_index<R: Reflect>(name: &str) -> Option<usize> {
    R::FIELD_NAMES.iter().position(|declared| *declared == name)
}

/// Whether values of type `T` are recursed into (records) rather than handed
/// to the leaf callback.
pub const fn is_record<T: Member>() -> bool {
    T::REFLECTABLE
}

/// Descriptor for field `N` of a read-only record.
///
/// ```
/// use reflekt::Reflect;
///
/// #[derive(Reflect)]
/// struct Point { x: f32, y: f32 }
///
/// let p = Point { x: 1.0, y: 2.0 };
/// let y = reflekt::field::<1, _>(&p);
/// assert_eq!(y.name(), "y");
/// assert_eq!(*y.get(), 2.0);
/// ```
///
/// Ordinals outside the declaration do not compile:
///
/// ```compile_fail
/// use reflekt::Reflect;
///
/// #[derive(Reflect)]
/// struct Point { x: f32, y: f32 }
///
/// let p = Point { x: 1.0, y: 2.0 };
/// let _ = reflekt::field::<2, _>(&p);
/// ```
///
/// Neither does writing through a read-only descriptor:
///
/// ```compile_fail
/// use reflekt::Reflect;
///
/// #[derive(Reflect)]
/// struct Point { x: f32, y: f32 }
///
/// let p = Point { x: 1.0, y: 2.0 };
/// let x = reflekt::field::<0, _>(&p);
/// *x.get() = 5.0;
/// ```
#[inline]
pub fn field<const N: usize, R: HasField<N>>(record: &R) -> Field<'_, R::Decl> {
    Field::of(record)
}

/// Descriptor for field `N` of a mutable record.
#[inline]
pub fn field_mut<const N: usize, R: HasField<N>>(record: &mut R) -> FieldMut<'_, R::Decl> {
    FieldMut::of(record)
}

// ============================================================================
// is_reflectable!
// ============================================================================

/// Evaluates to `true` if the named type derives `Reflect`, `false` otherwise.
///
/// Unlike a `T: Reflect` bound this accepts any concrete type, so it can be
/// asked about types that do not implement any reflekt trait:
///
/// ```
/// use reflekt::Reflect;
///
/// #[derive(Reflect)]
/// struct Point { x: f32, y: f32 }
///
/// struct Opaque;
///
/// assert!(reflekt::is_reflectable!(Point));
/// assert!(!reflekt::is_reflectable!(Opaque));
/// assert!(!reflekt::is_reflectable!(i32));
/// ```
///
/// Resolution happens at the macro call site, so inside generic code it
/// answers for the bounds in scope, not for the eventual type argument. Use a
/// `Member` bound and [`is_record`](crate::is_record) there instead.
#[macro_export]
macro_rules! is_reflectable {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::__private::{NotReflectable as _, Reflectable as _};
        (&&$crate::__private::Probe::<$ty>::new()).is_reflectable()
    }};
}

#[doc(hidden)]
pub struct Probe<T: ?Sized>(PhantomData<fn() -> *const T>);

impl<T: ?Sized> Probe<T> {
    pub fn new() -> Self {
        Probe(PhantomData)
    }
}

// Picked by autoref when `T: Reflect`: `&&Probe<T>` matches `&self` here
// before auto-deref reaches the fallback below.
#[doc(hidden)]
pub trait Reflectable {
    fn is_reflectable(&self) -> bool {
        true
    }
}

impl<T: Reflect> Reflectable for &Probe<T> {}

#[doc(hidden)]
pub trait NotReflectable {
    fn is_reflectable(&self) -> bool {
        false
    }
}

impl<T: ?Sized> NotReflectable for Probe<T> {}
