//! Recursive traversal over declared fields.
//!
//! A traversal walks ordinals `0..FIELD_COUNT` of a record in declared order.
//! Fields whose type is itself reflectable are composites: the visitor's
//! `enter` hook runs, the nested record is walked, then `exit` runs. Every
//! other field is a leaf and goes to the visitor's `leaf` callback exactly
//! once. Hooks never fire around the top-level record or around leaves.
//!
//! Traversal over `&R` only ever produces read-only descriptors, at every
//! depth; mutable descriptors require `&mut R` and a [`VisitorMut`].

use crate::field::{ErasedField, ErasedFieldMut, Field, FieldDecl, FieldMut};
use crate::leaf::Leaf;
use crate::reflect::{Member, Reflect};

/// Leaf callback plus enter/exit hooks for a read-only traversal.
///
/// ```
/// use reflekt::{Field, FieldDecl, Leaf, Reflect, Visitor};
///
/// #[derive(Reflect)]
/// struct Inner { c: u8, d: u8 }
///
/// #[derive(Reflect)]
/// struct Outer { a: u8, b: Inner }
///
/// #[derive(Default)]
/// struct Trace(Vec<String>);
///
/// impl Visitor for Trace {
///     fn leaf<F: FieldDecl>(&mut self, field: Field<'_, F>)
///     where
///         F::Value: Leaf,
///     {
///         self.0.push(field.name().to_string());
///     }
///
///     fn enter(&mut self) {
///         self.0.push("enter".into());
///     }
///
///     fn exit(&mut self) {
///         self.0.push("exit".into());
///     }
/// }
///
/// let mut trace = Trace::default();
/// reflekt::visit(&Outer { a: 1, b: Inner { c: 2, d: 3 } }, &mut trace);
/// assert_eq!(trace.0, ["a", "enter", "c", "d", "exit"]);
/// ```
pub trait Visitor {
    /// Called once per leaf field, in declared order, depth-first.
    fn leaf<F: FieldDecl>(&mut self, field: Field<'_, F>)
    where
        F::Value: Leaf;

    /// Called before descending into a nested record field.
    fn enter(&mut self) {}

    /// Called after a nested record field has been fully walked.
    fn exit(&mut self) {}
}

/// Leaf callback plus enter/exit hooks for a mutable traversal.
pub trait VisitorMut {
    /// Called once per leaf field, in declared order, depth-first.
    fn leaf<F: FieldDecl>(&mut self, field: FieldMut<'_, F>)
    where
        F::Value: Leaf;

    /// Called before descending into a nested record field.
    fn enter(&mut self) {}

    /// Called after a nested record field has been fully walked.
    fn exit(&mut self) {}
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    #[inline]
    fn leaf<F: FieldDecl>(&mut self, field: Field<'_, F>)
    where
        F::Value: Leaf,
    {
        (**self).leaf(field)
    }

    #[inline]
    fn enter(&mut self) {
        (**self).enter()
    }

    #[inline]
    fn exit(&mut self) {
        (**self).exit()
    }
}

impl<V: VisitorMut + ?Sized> VisitorMut for &mut V {
    #[inline]
    fn leaf<F: FieldDecl>(&mut self, field: FieldMut<'_, F>)
    where
        F::Value: Leaf,
    {
        (**self).leaf(field)
    }

    #[inline]
    fn enter(&mut self) {
        (**self).enter()
    }

    #[inline]
    fn exit(&mut self) {
        (**self).exit()
    }
}

/// Walk every leaf of `record`, firing hooks around nested records.
///
/// ```compile_fail
/// struct Plain { x: i32 }
///
/// reflekt::visit_fields(&Plain { x: 1 }, |_| {});
/// ```
#[inline]
pub fn visit<R: Reflect, V: Visitor>(record: &R, visitor: &mut V) {
    record.walk_fields(visitor)
}

/// Walk every leaf of `record` with mutable access.
#[inline]
pub fn visit_mut<R: Reflect, V: VisitorMut>(record: &mut R, visitor: &mut V) {
    record.walk_fields_mut(visitor)
}

/// Walk every leaf of `record`, handing each to `leaf` as an [`ErasedField`].
pub fn visit_fields<R, L>(record: &R, leaf: L)
where
    R: Reflect,
    L: FnMut(ErasedField<'_>),
{
    visit(record, &mut Callbacks::new(leaf))
}

/// Walk every leaf of `record` mutably, handing each to `leaf` as an
/// [`ErasedFieldMut`].
pub fn visit_fields_mut<R, L>(record: &mut R, leaf: L)
where
    R: Reflect,
    L: FnMut(ErasedFieldMut<'_>),
{
    visit_mut(record, &mut Callbacks::new_mut(leaf))
}

// ============================================================================
// Closure Visitors
// ============================================================================

fn noop() {}

/// A visitor assembled from closures.
///
/// The leaf closure receives type-erased fields; `on_enter` and `on_exit`
/// attach the nesting hooks.
///
/// ```
/// use reflekt::{Callbacks, Reflect};
///
/// #[derive(Reflect)]
/// struct Inner { c: u8 }
///
/// #[derive(Reflect)]
/// struct Outer { a: u8, b: Inner }
///
/// let depth = std::cell::Cell::new(0);
/// let mut leaves = Vec::new();
/// {
///     let mut visitor = Callbacks::new(|f| leaves.push((f.name(), depth.get())))
///         .on_enter(|| depth.set(depth.get() + 1))
///         .on_exit(|| depth.set(depth.get() - 1));
///     reflekt::visit(&Outer { a: 1, b: Inner { c: 2 } }, &mut visitor);
/// }
/// assert_eq!(leaves, [("a", 0), ("c", 1)]);
/// ```
pub struct Callbacks<L, E = fn(), X = fn()> {
    leaf: L,
    enter: E,
    exit: X,
}

impl<L> Callbacks<L> {
    /// Read-only visitor calling `leaf` for every leaf field.
    pub fn new(leaf: L) -> Self
    where
        L: FnMut(ErasedField<'_>),
    {
        Callbacks {
            leaf,
            enter: noop,
            exit: noop,
        }
    }

    /// Mutable visitor calling `leaf` for every leaf field.
    pub fn new_mut(leaf: L) -> Self
    where
        L: FnMut(ErasedFieldMut<'_>),
    {
        Callbacks {
            leaf,
            enter: noop,
            exit: noop,
        }
    }
}

impl<L, E, X> Callbacks<L, E, X> {
    /// Run `enter` before descending into each nested record.
    pub fn on_enter<E2: FnMut()>(self, enter: E2) -> Callbacks<L, E2, X> {
        Callbacks {
            leaf: self.leaf,
            enter,
            exit: self.exit,
        }
    }

    /// Run `exit` after each nested record has been walked.
    pub fn on_exit<X2: FnMut()>(self, exit: X2) -> Callbacks<L, E, X2> {
        Callbacks {
            leaf: self.leaf,
            enter: self.enter,
            exit,
        }
    }
}

impl<L, E, X> Visitor for Callbacks<L, E, X>
where
    L: FnMut(ErasedField<'_>),
    E: FnMut(),
    X: FnMut(),
{
    fn leaf<F: FieldDecl>(&mut self, field: Field<'_, F>)
    where
        F::Value: Leaf,
    {
        (self.leaf)(field.erase())
    }

    fn enter(&mut self) {
        (self.enter)()
    }

    fn exit(&mut self) {
        (self.exit)()
    }
}

impl<L, E, X> VisitorMut for Callbacks<L, E, X>
where
    L: FnMut(ErasedFieldMut<'_>),
    E: FnMut(),
    X: FnMut(),
{
    fn leaf<F: FieldDecl>(&mut self, field: FieldMut<'_, F>)
    where
        F::Value: Leaf,
    {
        (self.leaf)(field.erase())
    }

    fn enter(&mut self) {
        (self.enter)()
    }

    fn exit(&mut self) {
        (self.exit)()
    }
}

// ============================================================================
// Generated-Code Support
// ============================================================================

/// Dispatch field `F` of `record` to its value type's [`Member`] impl.
#[doc(hidden)]
#[inline]
pub fn walk_field<F: FieldDecl, V: Visitor>(record: &F::Record, visitor: &mut V) {
    <F::Value as Member>::accept(Field::<F>::of(record), visitor)
}

#[doc(hidden)]
#[inline]
pub fn walk_field_mut<F: FieldDecl, V: VisitorMut>(record: &mut F::Record, visitor: &mut V) {
    <F::Value as Member>::accept_mut(FieldMut::<F>::of(record), visitor)
}

/// Composite step: hooks around a nested record's own fields.
#[doc(hidden)]
#[inline]
pub fn descend<R: Reflect, V: Visitor>(record: &R, visitor: &mut V) {
    visitor.enter();
    record.walk_fields(visitor);
    visitor.exit();
}

#[doc(hidden)]
#[inline]
pub fn descend_mut<R: Reflect, V: VisitorMut>(record: &mut R, visitor: &mut V) {
    visitor.enter();
    record.walk_fields_mut(visitor);
    visitor.exit();
}
