//! Diagnostic output built on traversal.

use std::fmt::{self, Write};

use crate::field::{Field, FieldDecl};
use crate::leaf::Leaf;
use crate::reflect::Reflect;
use crate::visit::{visit, Visitor};

/// Formatting options for [`pretty_print_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrettyOptions {
    /// Indentation added per nesting level.
    pub indent: &'static str,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        PrettyOptions { indent: "    " }
    }
}

/// Walk `record` leaf by leaf without producing output.
///
/// Each leaf is reported as a `trace` event carrying its name and `Debug`
/// value; concrete output is left to a real visitor. Returns the number of
/// leaves visited.
///
/// ```compile_fail
/// struct Plain { x: i32 }
///
/// reflekt::print(&Plain { x: 1 });
/// ```
pub fn print<R: Reflect>(record: &R) -> usize {
    struct Leaves(usize);

    impl Visitor for Leaves {
        fn leaf<F: FieldDecl>(&mut self, field: Field<'_, F>)
        where
            F::Value: Leaf,
        {
            tracing::trace!(field = field.name(), value = ?field.get(), "leaf");
            self.0 += 1;
        }
    }

    let mut leaves = Leaves(0);
    visit(record, &mut leaves);
    leaves.0
}

/// Print `record` to stdout as an indented, brace-delimited tree.
pub fn pretty_print<R: Reflect>(record: &R) {
    print!("{}", to_pretty_string(record));
}

/// Render `record` as an indented, brace-delimited tree.
///
/// ```
/// use reflekt::Reflect;
///
/// #[derive(Reflect)]
/// struct Point { x: i32, y: i32 }
///
/// #[derive(Reflect)]
/// struct Line { id: u8, from: Point }
///
/// let line = Line { id: 7, from: Point { x: 1, y: 2 } };
/// assert_eq!(
///     reflekt::to_pretty_string(&line),
///     "{\n    id = 7,\n    {\n        x = 1,\n        y = 2,\n    },\n}\n"
/// );
/// ```
///
/// # Panics
///
/// Panics if a leaf's `Debug` implementation returns an error, as `format!`
/// does.
pub fn to_pretty_string<R: Reflect>(record: &R) -> String {
    let mut out = String::new();
    pretty_print_to(record, &mut out, PrettyOptions::default())
        .expect("a Debug implementation returned an error when the underlying stream did not");
    out
}

/// Render `record` into `out`.
///
/// Leaves are written as `name = value,` with `Debug` formatting. Each nested
/// record is wrapped in its own `{ ... },` block one level deeper.
pub fn pretty_print_to<R, W>(record: &R, out: &mut W, options: PrettyOptions) -> fmt::Result
where
    R: Reflect,
    W: Write,
{
    let _span = tracing::debug_span!(
        "pretty_print",
        record = std::any::type_name::<R>(),
        fields = R::FIELD_COUNT
    )
    .entered();

    let mut printer = PrettyPrinter {
        out,
        indent: options.indent,
        depth: 0,
        result: Ok(()),
    };

    printer.write(format_args!("{{\n"));
    visit(record, &mut printer);
    printer.write(format_args!("}}\n"));
    printer.result
}

struct PrettyPrinter<'w, W> {
    out: &'w mut W,
    indent: &'static str,
    depth: usize,
    result: fmt::Result,
}

impl<W: Write> PrettyPrinter<'_, W> {
    // The first error sticks; later writes are skipped.
    fn write(&mut self, args: fmt::Arguments<'_>) {
        if self.result.is_ok() {
            self.result = self.out.write_fmt(args);
        }
    }

    fn pad(&mut self, levels: usize) {
        let indent = self.indent;
        for _ in 0..levels {
            self.write(format_args!("{indent}"));
        }
    }
}

impl<W: Write> Visitor for PrettyPrinter<'_, W> {
    fn leaf<F: FieldDecl>(&mut self, field: Field<'_, F>)
    where
        F::Value: Leaf,
    {
        self.pad(self.depth + 1);
        self.write(format_args!("{} = {:?},\n", field.name(), field.get()));
    }

    fn enter(&mut self) {
        self.depth += 1;
        self.pad(self.depth);
        self.write(format_args!("{{\n"));
    }

    fn exit(&mut self) {
        self.pad(self.depth);
        self.write(format_args!("}},\n"));
        self.depth -= 1;
    }
}
