//! Tests for pretty printing and the leaf-counting print

use reflekt::{PrettyOptions, Reflect};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("reflekt=trace")
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default, Reflect)]
struct Point {
    x: f32,
    y: f32,
}

#[derive(Debug, Default, Reflect)]
struct Points {
    pt1: Point,
    pt2: Point,
}

#[derive(Debug, Default, Reflect)]
#[reflect(fields(name, points, tags))]
struct Scene {
    name: String,
    points: Points,
    tags: Vec<&'static str>,
    revision: u64,
}

#[derive(Debug, Default, Reflect)]
struct Empty;

// ============================================================================
// Pretty Printing
// ============================================================================

#[test]
fn test_flat_record() {
    let p = Point { x: 1.0, y: 2.5 };
    assert_eq!(
        reflekt::to_pretty_string(&p),
        "{\n    x = 1.0,\n    y = 2.5,\n}\n"
    );
}

#[test]
fn test_two_levels_of_nesting() {
    init_tracing();

    let scene = Scene {
        name: "demo".into(),
        points: Points {
            pt1: Point { x: 1.0, y: 2.0 },
            pt2: Point { x: 3.0, y: 4.0 },
        },
        tags: vec!["a", "b"],
        revision: 3,
    };

    let expected = "\
{
    name = \"demo\",
    {
        {
            x = 1.0,
            y = 2.0,
        },
        {
            x = 3.0,
            y = 4.0,
        },
    },
    tags = [\"a\", \"b\"],
}
";
    assert_eq!(reflekt::to_pretty_string(&scene), expected);
    assert!(!expected.contains("revision"));
}

#[test]
fn test_empty_record() {
    assert_eq!(reflekt::to_pretty_string(&Empty), "{\n}\n");
}

#[test]
fn test_custom_indent() {
    let points = Points::default();
    let mut out = String::new();
    reflekt::pretty_print_to(&points, &mut out, PrettyOptions { indent: "\t" }).unwrap();
    assert_eq!(
        out,
        "{\n\t{\n\t\tx = 0.0,\n\t\ty = 0.0,\n\t},\n\t{\n\t\tx = 0.0,\n\t\ty = 0.0,\n\t},\n}\n"
    );
}

#[test]
fn test_default_options() {
    assert_eq!(PrettyOptions::default().indent, "    ");
}

#[test]
fn test_write_error_propagates() {
    use std::fmt;

    /// Accepts `limit` writes, then fails.
    struct Limited {
        limit: usize,
        writes: usize,
    }

    impl fmt::Write for Limited {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            if self.writes == self.limit {
                return Err(fmt::Error);
            }
            self.writes += 1;
            Ok(())
        }
    }

    let mut sink = Limited { limit: 3, writes: 0 };
    let result = reflekt::pretty_print_to(&Points::default(), &mut sink, PrettyOptions::default());
    assert!(result.is_err());
    assert_eq!(sink.writes, 3);
}

/// A leaf whose `Debug` always fails.
struct Broken;

impl std::fmt::Debug for Broken {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Err(std::fmt::Error)
    }
}

impl reflekt::Leaf for Broken {}

#[derive(Reflect)]
struct HoldsBroken {
    id: u8,
    broken: Broken,
}

#[test]
fn test_failing_debug_reported_by_pretty_print_to() {
    let record = HoldsBroken { id: 1, broken: Broken };
    let mut out = String::new();
    let result = reflekt::pretty_print_to(&record, &mut out, PrettyOptions::default());
    assert!(result.is_err());
    assert_eq!(out, "{\n    id = 1,\n    broken = ");
}

#[test]
#[should_panic(expected = "a Debug implementation returned an error")]
fn test_failing_debug_panics_in_to_pretty_string() {
    reflekt::to_pretty_string(&HoldsBroken { id: 1, broken: Broken });
}

#[test]
fn test_pretty_print_to_stdout() {
    reflekt::pretty_print(&Point { x: 1.0, y: 2.0 });
}

// ============================================================================
// Print
// ============================================================================

#[test]
fn test_print_counts_leaves() {
    init_tracing();

    assert_eq!(reflekt::print(&Point::default()), 2);
    assert_eq!(reflekt::print(&Points::default()), 4);
    assert_eq!(reflekt::print(&Scene::default()), 6);
    assert_eq!(reflekt::print(&Empty), 0);
}
