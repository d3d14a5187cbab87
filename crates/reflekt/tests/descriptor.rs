//! Tests for field descriptors, selectors and type-level queries

use std::any::TypeId;
use std::collections::HashMap;

use reflekt::{Field, FieldDecl, HasField, Leaf, Reflect, Selector, Visitor};

#[derive(Debug, Default, Clone, PartialEq, Reflect)]
struct Point {
    x: f32,
    y: f32,
}

#[derive(Debug, Default, Reflect)]
struct Data {
    foo: String,
    #[reflect(skip)]
    bar: Vec<i32>,
    #[reflect(rename = "bazz")]
    baz: u8,
}

#[derive(Debug, Default, Reflect)]
#[reflect(fields(1, 0))]
struct Pair(u8, String);

#[derive(Debug, Default, Reflect)]
#[reflect(fields(label, position))]
struct Marker {
    position: Point,
    label: String,
    scratch: Vec<u8>,
    cache: HashMap<String, u32>,
    dirty: bool,
}

struct Opaque;

mod geometry {
    use reflekt::Reflect;

    /// Fields are private to this module; reflection still reaches them.
    #[derive(Debug, Reflect)]
    pub struct Circle {
        radius: f64,
        center: (f64, f64),
    }

    impl Circle {
        pub fn new(radius: f64) -> Self {
            Circle {
                radius,
                center: (0.0, 0.0),
            }
        }

        pub fn radius(&self) -> f64 {
            self.radius
        }
    }
}

mod inventory {
    use reflekt::Reflect;

    mod detail {
        /// `pub`, but unreachable outside `inventory`.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct Sku(pub u32);

        impl reflekt::Leaf for Sku {}
    }

    #[derive(Debug)]
    struct Scratch(Vec<u8>);

    #[derive(Debug, Reflect)]
    pub struct Item {
        count: u16,
        sku: detail::Sku,
        #[reflect(skip)]
        scratch: Scratch,
    }

    impl Item {
        pub fn new(count: u16, sku: u32) -> Self {
            Item {
                count,
                sku: detail::Sku(sku),
                scratch: Scratch(Vec::new()),
            }
        }

        pub fn sku(&self) -> u32 {
            self.sku.0
        }
    }
}

// ============================================================================
// Type-Level Queries
// ============================================================================

#[test]
fn test_field_count() {
    assert_eq!(reflekt::field_count::<Point>(), 2);
    assert_eq!(<Data as Reflect>::FIELD_COUNT, 2);
    assert_eq!(<Pair as Reflect>::FIELD_COUNT, 2);
    assert_eq!(<Marker as Reflect>::FIELD_COUNT, 2);

    const COUNT: usize = reflekt::field_count::<Marker>();
    let table = [0u8; COUNT];
    assert_eq!(table.len(), 2);
}

#[test]
fn test_field_names_in_declared_order() {
    assert_eq!(reflekt::field_names::<Point>(), ["x", "y"]);
    assert_eq!(reflekt::field_names::<Data>(), ["foo", "bazz"]);
    assert_eq!(reflekt::field_names::<Pair>(), ["1", "0"]);
    assert_eq!(reflekt::field_names::<Marker>(), ["label", "position"]);
}

#[test]
fn test_field_index() {
    assert_eq!(reflekt::field_index::<Data>("foo"), Some(0));
    assert_eq!(reflekt::field_index::<Data>("bazz"), Some(1));
    // Lookup is by declared name, not member name.
    assert_eq!(reflekt::field_index::<Data>("baz"), None);
    assert_eq!(reflekt::field_index::<Data>("bar"), None);
    assert_eq!(reflekt::field_index::<Marker>("scratch"), None);
}

#[test]
fn test_is_reflectable() {
    assert!(reflekt::is_reflectable!(Point));
    assert!(reflekt::is_reflectable!(Marker));
    assert!(reflekt::is_reflectable!(geometry::Circle));
    assert!(!reflekt::is_reflectable!(Opaque));
    assert!(!reflekt::is_reflectable!(i32));
    assert!(!reflekt::is_reflectable!(String));
    assert!(!reflekt::is_reflectable!(Vec<Point>));
}

#[test]
fn test_is_record() {
    assert!(reflekt::is_record::<Point>());
    assert!(!reflekt::is_record::<f32>());
    assert!(!reflekt::is_record::<Option<String>>());
}

#[test]
fn test_decl_metadata_via_has_field() {
    type Label = <Marker as HasField<0>>::Decl;
    type Position = <Marker as HasField<1>>::Decl;

    assert_eq!(Label::NAME, "label");
    assert_eq!(Label::INDEX, 0);
    assert_eq!(TypeId::of::<<Label as FieldDecl>::Value>(), TypeId::of::<String>());

    assert_eq!(Position::NAME, "position");
    assert_eq!(Position::INDEX, 1);
    assert_eq!(TypeId::of::<<Position as FieldDecl>::Value>(), TypeId::of::<Point>());
}

// ============================================================================
// Instance Descriptors
// ============================================================================

#[test]
fn test_read_descriptor() {
    let p = Point { x: 1.5, y: -2.0 };

    let x = reflekt::field::<0, _>(&p);
    let y = reflekt::field::<1, _>(&p);
    assert_eq!((x.name(), x.index(), *x.get()), ("x", 0, 1.5));
    assert_eq!((y.name(), y.index(), *y.get()), ("y", 1, -2.0));
    assert_eq!(x.type_name(), "f32");

    // Descriptors are cheap copies of a borrow.
    let copy = x;
    assert_eq!(*copy.get(), *x.get());
}

#[test]
fn test_names_stable_across_instances() {
    let a = Point { x: 1.0, y: 2.0 };
    let b = Point { x: 3.0, y: 4.0 };
    assert_eq!(
        reflekt::field::<1, _>(&a).name(),
        reflekt::field::<1, _>(&b).name()
    );
}

#[test]
fn test_write_descriptor() {
    let mut p = Point { x: 1.0, y: 2.0 };

    {
        let mut x = reflekt::field_mut::<0, _>(&mut p);
        assert_eq!(*x.get(), 1.0);
        *x.get_mut() = 10.0;
        assert_eq!(x.set(11.0), 10.0);
    }
    *reflekt::field_mut::<1, _>(&mut p).into_mut() += 5.0;

    assert_eq!(p, Point { x: 11.0, y: 7.0 });
}

#[test]
fn test_private_fields_reachable() {
    let mut circle = geometry::Circle::new(2.0);
    assert_eq!(reflekt::field_names::<geometry::Circle>(), ["radius", "center"]);
    assert_eq!(*reflekt::field::<0, _>(&circle).get(), 2.0);

    reflekt::field_mut::<0, _>(&mut circle).set(3.0);
    assert_eq!(circle.radius(), 3.0);
    assert_eq!(*reflekt::field::<1, _>(&circle).get(), (0.0, 0.0));
}

#[test]
fn test_public_record_with_hidden_field_types() {
    let mut item = inventory::Item::new(3, 1001);
    assert_eq!(reflekt::field_names::<inventory::Item>(), ["count", "sku"]);

    let mut rendered = Vec::new();
    reflekt::visit_fields(&item, |field| {
        rendered.push(format!("{}={:?}", field.name(), field.value()));
    });
    assert_eq!(rendered, ["count=3", "sku=Sku(1001)"]);

    reflekt::visit_fields_mut(&mut item, |mut field| {
        if let Some(n) = field.downcast_mut::<u16>() {
            *n += 1;
        }
    });
    assert_eq!(*reflekt::field::<0, _>(&item).get(), 4);
    assert_eq!(item.sku(), 1001);
}

#[test]
fn test_tuple_struct_descriptors() {
    let pair = Pair(9, "nine".to_string());
    let first = reflekt::field::<0, _>(&pair);
    assert_eq!(first.name(), "1");
    assert_eq!(first.get(), "nine");
    assert_eq!(*reflekt::field::<1, _>(&pair).get(), 9);
}

#[test]
fn test_skipped_field_untouched() {
    let mut data = Data {
        foo: "a".into(),
        bar: vec![1, 2, 3],
        baz: 4,
    };

    let mut seen = Vec::new();
    reflekt::visit_fields_mut(&mut data, |mut field| {
        seen.push(field.name());
        if let Some(s) = field.downcast_mut::<String>() {
            s.push('!');
        }
        if let Some(n) = field.downcast_mut::<u8>() {
            *n *= 10;
        }
    });

    assert_eq!(seen, ["foo", "bazz"]);
    assert_eq!(data.foo, "a!");
    assert_eq!(data.baz, 40);
    assert_eq!(data.bar, [1, 2, 3]);
}

// ============================================================================
// Selectors
// ============================================================================

#[test]
fn test_selector_read_write() {
    let sel: Selector<Point, f32> = <Point as HasField<1>>::Decl::selector();
    assert_eq!(sel.name(), "y");
    assert_eq!(sel.index(), 1);

    let mut p = Point { x: 0.0, y: 3.0 };
    assert_eq!(*sel.read(&p), 3.0);
    *sel.write(&mut p) = 4.0;
    assert_eq!(p.y, 4.0);
}

#[test]
fn test_selector_table() {
    let columns = [
        reflekt::field::<0, _>(&Point::default()).selector(),
        reflekt::field::<1, _>(&Point::default()).selector(),
    ];

    let rows = vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.0, y: 4.0 }];
    let sums: Vec<(&str, f32)> = columns
        .iter()
        .map(|col| (col.name(), rows.iter().map(|r| *col.read(r)).sum()))
        .collect();
    assert_eq!(sums, [("x", 4.0), ("y", 6.0)]);
}

// ============================================================================
// Static Type Branching
// ============================================================================

/// Collects only `String` leaves, deciding by the declared field type.
#[derive(Default)]
struct Strings(Vec<String>);

impl Visitor for Strings {
    fn leaf<F: FieldDecl>(&mut self, field: Field<'_, F>)
    where
        F::Value: Leaf,
    {
        if TypeId::of::<F::Value>() == TypeId::of::<String>() {
            if let Some(s) = field.erase().downcast_ref::<String>() {
                self.0.push(s.clone());
            }
        }
    }
}

#[test]
fn test_branch_on_field_type() {
    let marker = Marker {
        position: Point { x: 1.0, y: 2.0 },
        label: "home".into(),
        ..Default::default()
    };

    let mut strings = Strings::default();
    reflekt::visit(&marker, &mut strings);
    assert_eq!(strings.0, ["home"]);
}

#[test]
fn test_erased_fields() {
    let marker = Marker {
        position: Point { x: 1.0, y: 2.0 },
        label: "home".into(),
        ..Default::default()
    };

    let mut rendered = Vec::new();
    reflekt::visit_fields(&marker, |field| {
        assert!(field.is::<String>() || field.is::<f32>());
        rendered.push(format!("{}#{}={:?}", field.name(), field.index(), field.value()));
    });
    assert_eq!(rendered, ["label#0=\"home\"", "x#0=1.0", "y#1=2.0"]);
}
