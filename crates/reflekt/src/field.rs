//! Field declarations and instance-bound field descriptors.
//!
//! A [`FieldDecl`] is the type-level half: one zero-sized marker per declared
//! field, generated by `#[derive(Reflect)]`. A [`Field`] or [`FieldMut`] is the
//! instance-level half: a borrow of one field's value, tagged with its
//! declaration. Descriptors own nothing and cannot outlive the instance.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::leaf::{AnyLeaf, Leaf};
use crate::reflect::Member;

// ============================================================================
// Field Declaration
// ============================================================================

/// Static metadata for one declared field of a record.
///
/// Implemented by the derive on a hidden marker type per field. The marker is
/// never instantiated; all information lives in associated items.
pub trait FieldDecl: 'static {
    /// The record that owns the field.
    type Record: 'static;

    /// The field's value type.
    type Value: Member;

    /// Ordinal in declaration order, starting at 0.
    const INDEX: usize;

    /// Name given at declaration.
    const NAME: &'static str;

    /// Borrow the field from a record.
    fn get(record: &Self::Record) -> &Self::Value;

    /// Mutably borrow the field from a record.
    fn get_mut(record: &mut Self::Record) -> &mut Self::Value;

    /// Instance-independent handle to this field.
    fn selector() -> Selector<Self::Record, Self::Value> {
        Selector {
            name: Self::NAME,
            index: Self::INDEX,
            get: Self::get,
            get_mut: Self::get_mut,
        }
    }
}

// ============================================================================
// Selector
// ============================================================================

/// Identifies "this field of this record type" without referring to any
/// instance.
///
/// A selector is a pair of accessor functions plus the declared name and
/// ordinal. It is `Copy` and can be stored in tables, for example to build a
/// schema or a column layout for `R`.
pub struct Selector<R, V> {
    name: &'static str,
    index: usize,
    get: fn(&R) -> &V,
    get_mut: fn(&mut R) -> &mut V,
}

impl<R, V> Selector<R, V> {
    /// Declared field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared ordinal
    pub fn index(&self) -> usize {
        self.index
    }

    /// Read this field from `record`.
    pub fn read<'r>(&self, record: &'r R) -> &'r V {
        (self.get)(record)
    }

    /// Write access to this field of `record`.
    pub fn write<'r>(&self, record: &'r mut R) -> &'r mut V {
        (self.get_mut)(record)
    }
}

impl<R, V> Clone for Selector<R, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V> Copy for Selector<R, V> {}

impl<R, V> fmt::Debug for Selector<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("record", &std::any::type_name::<R>())
            .field("name", &self.name)
            .field("index", &self.index)
            .finish()
    }
}

// ============================================================================
// Field Descriptors
// ============================================================================

/// Read-only descriptor for one field of one instance.
///
/// Produced by traversal over `&R` or by [`crate::field`]. Only shared
/// references to the value can be obtained from it.
pub struct Field<'a, F: FieldDecl> {
    value: &'a F::Value,
    _decl: PhantomData<F>,
}

impl<'a, F: FieldDecl> Field<'a, F> {
    /// Descriptor for field `F` of `record`.
    #[inline]
    pub fn of(record: &'a F::Record) -> Self {
        Field {
            value: F::get(record),
            _decl: PhantomData,
        }
    }

    /// The field's current value.
    #[inline]
    pub fn get(&self) -> &'a F::Value {
        self.value
    }

    /// Declared field name
    #[inline]
    pub fn name(&self) -> &'static str {
        F::NAME
    }

    /// Declared ordinal
    #[inline]
    pub fn index(&self) -> usize {
        F::INDEX
    }

    /// Instance-independent handle to this field
    #[inline]
    pub fn selector(&self) -> Selector<F::Record, F::Value> {
        F::selector()
    }

    /// Name of the field's value type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<F::Value>()
    }

    /// Drop the static type, keeping name, ordinal and a dynamic view of the
    /// value.
    pub fn erase(&self) -> ErasedField<'a>
    where
        F::Value: Leaf,
    {
        ErasedField {
            name: F::NAME,
            index: F::INDEX,
            type_name: self.type_name(),
            value: self.value,
        }
    }
}

impl<F: FieldDecl> Clone for Field<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: FieldDecl> Copy for Field<'_, F> {}

impl<F: FieldDecl> fmt::Debug for Field<'_, F>
where
    F::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &F::NAME)
            .field("index", &F::INDEX)
            .field("value", self.value)
            .finish()
    }
}

/// Mutable descriptor for one field of one instance.
///
/// Produced by traversal over `&mut R` or by [`crate::field_mut`]. Writes
/// through it land directly in the instance.
pub struct FieldMut<'a, F: FieldDecl> {
    value: &'a mut F::Value,
    _decl: PhantomData<F>,
}

impl<'a, F: FieldDecl> FieldMut<'a, F> {
    /// Descriptor for field `F` of `record`.
    #[inline]
    pub fn of(record: &'a mut F::Record) -> Self {
        FieldMut {
            value: F::get_mut(record),
            _decl: PhantomData,
        }
    }

    /// The field's current value.
    #[inline]
    pub fn get(&self) -> &F::Value {
        self.value
    }

    /// Mutable access to the field's value.
    #[inline]
    pub fn get_mut(&mut self) -> &mut F::Value {
        self.value
    }

    /// Consume the descriptor, keeping the borrow of the value.
    #[inline]
    pub fn into_mut(self) -> &'a mut F::Value {
        self.value
    }

    /// Overwrite the field, returning the previous value.
    pub fn set(&mut self, value: F::Value) -> F::Value {
        std::mem::replace(self.value, value)
    }

    /// Declared field name
    #[inline]
    pub fn name(&self) -> &'static str {
        F::NAME
    }

    /// Declared ordinal
    #[inline]
    pub fn index(&self) -> usize {
        F::INDEX
    }

    /// Instance-independent handle to this field
    #[inline]
    pub fn selector(&self) -> Selector<F::Record, F::Value> {
        F::selector()
    }

    /// Name of the field's value type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<F::Value>()
    }

    /// Drop the static type, keeping name, ordinal and a dynamic mutable view
    /// of the value.
    pub fn erase(self) -> ErasedFieldMut<'a>
    where
        F::Value: Leaf,
    {
        ErasedFieldMut {
            name: F::NAME,
            index: F::INDEX,
            type_name: std::any::type_name::<F::Value>(),
            value: self.value,
        }
    }
}

impl<F: FieldDecl> fmt::Debug for FieldMut<'_, F>
where
    F::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMut")
            .field("name", &F::NAME)
            .field("index", &F::INDEX)
            .field("value", &*self.value)
            .finish()
    }
}

// ============================================================================
// Type-Erased Descriptors
// ============================================================================

/// A leaf field with its static type erased.
///
/// Handed to closure-based visitors, which cannot be generic over the field.
/// The value can be formatted with `Debug` or recovered with
/// [`downcast_ref`](Self::downcast_ref).
#[derive(Clone, Copy)]
pub struct ErasedField<'a> {
    name: &'static str,
    index: usize,
    type_name: &'static str,
    value: &'a dyn AnyLeaf,
}

impl<'a> ErasedField<'a> {
    /// Declared field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared ordinal within the owning record
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the value's type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The value as a `Debug` object.
    pub fn value(&self) -> &'a dyn fmt::Debug {
        let value: &'a dyn AnyLeaf = self.value;
        value.as_debug()
    }

    /// The value as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        let value: &'a dyn AnyLeaf = self.value;
        value.as_any().downcast_ref()
    }

    /// Whether the value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.as_any().is::<T>()
    }
}

impl fmt::Debug for ErasedField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedField")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("value", self.value.as_debug())
            .finish()
    }
}

/// A mutable leaf field with its static type erased.
pub struct ErasedFieldMut<'a> {
    name: &'static str,
    index: usize,
    type_name: &'static str,
    value: &'a mut dyn AnyLeaf,
}

impl<'a> ErasedFieldMut<'a> {
    /// Declared field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared ordinal within the owning record
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name of the value's type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The value as a `Debug` object.
    pub fn value(&self) -> &dyn fmt::Debug {
        self.value.as_debug()
    }

    /// The value as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref()
    }

    /// Mutable access to the value as `T`, if that is its type.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.as_any_mut().downcast_mut()
    }

    /// Whether the value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.as_any().is::<T>()
    }
}

impl fmt::Debug for ErasedFieldMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedFieldMut")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("value", self.value.as_debug())
            .finish()
    }
}
