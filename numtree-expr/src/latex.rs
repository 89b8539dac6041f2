//! LaTeX rendering of expressions.
//!
//! Rendering is a direct structural recursion over the tree. No parentheses are inserted based on
//! operator precedence, so `(a + b) c` renders as `a + b c`.
//!
//! Unlike comparison, hashing, evaluation and compilation, which walk the tree with an explicit
//! stack, rendering uses the call stack: one frame per level of nesting. Trees nested more than a
//! few thousand levels deep can overflow the stack when rendered, which includes rendering an
//! error report or looking up [`Expr::variable_spans`] for them.

use crate::expr::{BinOpKind, Expr, UnaryOpKind, Variable};
use std::fmt::{self, Display, Formatter, Write};
use std::ops::Range;

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.fmt_latex(f)
    }
}

/// A writer that tracks how many characters have been written through it.
struct LatexWriter<W> {
    inner: W,
    position: usize,
}

impl<W: Write> LatexWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }
}

impl<W: Write> Write for LatexWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.position += s.chars().count();
        self.inner.write_str(s)
    }
}

/// A writer that discards its input.
struct Discard;

impl Write for Discard {
    fn write_str(&mut self, _: &str) -> fmt::Result {
        Ok(())
    }
}

/// Writes a constant. Integral values are written without a fractional part.
fn write_constant<W: Write>(out: &mut W, value: f64) -> fmt::Result {
    // `-0.0` would otherwise render as `-0`
    if value == 0.0 {
        return write!(out, "0");
    }
    write!(out, "{}", value)
}

/// Renders `expr` into `out`, calling `on_variable` with the character range of every variable
/// occurrence.
fn render<W: Write>(
    expr: &Expr,
    out: &mut LatexWriter<W>,
    on_variable: &mut dyn FnMut(&Variable, Range<usize>),
) -> fmt::Result {
    match expr {
        Expr::Constant(value) => write_constant(out, *value),
        Expr::Variable(var) => {
            let start = out.position;
            out.write_str(var.name())?;
            on_variable(var, start..out.position);
            Ok(())
        },
        Expr::Unary(unary) => {
            let (open, close) = match unary.op {
                UnaryOpKind::Neg => ("-", ""),
                UnaryOpKind::Sqrt => ("\\sqrt{", "}"),
                UnaryOpKind::Sin => ("\\sin{ \\left(", "\\right) }"),
                UnaryOpKind::Cos => ("\\cos{ \\left(", "\\right) }"),
                UnaryOpKind::Exp => ("e^{", "}"),
                UnaryOpKind::Ln => ("\\ln{", "}"),
            };
            out.write_str(open)?;
            render(&unary.operand, out, on_variable)?;
            out.write_str(close)
        },
        Expr::Binary(binary) => match binary.op {
            BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul => {
                let sep = match binary.op {
                    BinOpKind::Add => " + ",
                    BinOpKind::Sub => " - ",
                    _ => " ",
                };
                render(&binary.lhs, out, on_variable)?;
                out.write_str(sep)?;
                render(&binary.rhs, out, on_variable)
            },
            BinOpKind::Div => {
                out.write_str("\\frac{")?;
                render(&binary.lhs, out, on_variable)?;
                out.write_str("}{")?;
                render(&binary.rhs, out, on_variable)?;
                out.write_str("}")
            },
            BinOpKind::Pow => {
                render(&binary.lhs, out, on_variable)?;
                out.write_str("^{")?;
                render(&binary.rhs, out, on_variable)?;
                out.write_str("}")
            },
            BinOpKind::Log => {
                // the base is written before the argument
                out.write_str("\\log_{")?;
                render(&binary.rhs, out, on_variable)?;
                out.write_str("}{ \\left(")?;
                render(&binary.lhs, out, on_variable)?;
                out.write_str("\\right)}")
            },
        },
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut Formatter) -> fmt::Result {
        render(self, &mut LatexWriter::new(f), &mut |_, _| {})
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_latex(f)
    }
}

impl Expr {
    /// Renders this expression as LaTeX.
    pub fn to_latex(&self) -> String {
        self.as_display().to_string()
    }

    /// Returns the character ranges of every occurrence of the variable `name` in the LaTeX
    /// rendering of this expression, in the order they appear.
    pub fn variable_spans(&self, name: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut out = LatexWriter::new(Discard);
        // writing to `Discard` cannot fail
        let _ = render(self, &mut out, &mut |var, span| {
            if var.name() == name {
                spans.push(span);
            }
        });
        spans
    }
}
