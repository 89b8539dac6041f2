//! Errors raised while dispatching a call, and helpers to report errors against an expression.

use ariadne::Fmt;
use numtree_attrs::ErrorKind;
use numtree_error::{Error, EXPR};
use numtree_expr::Expr;
use std::io;

/// Strict mode is enabled and the data supplies a variable the expression does not use.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected variable: `{}`", self.name),
    help = if self.expected.is_empty() {
        "the expression does not depend on any variables".to_string()
    } else {
        format!(
            "the expression only depends on {}",
            self.expected
                .iter()
                .map(|name| format!("`{}`", name.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", "),
        )
    },
)]
pub struct UnexpectedVariable {
    /// The name of the unexpected variable.
    pub name: String,

    /// The variables the expression depends on, in parameter order.
    pub expected: Vec<String>,
}

/// The data mixes scalar and array values.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "inconsistent arguments: `{}` is {}, but `{}` is {}",
        self.name,
        self.found,
        self.first,
        self.expected,
    ),
    labels = std::iter::repeat("this variable"),
    help = "supply either a single number for every variable, or an array for every variable",
)]
pub struct InconsistentArguments {
    /// The name of the first entry, which decides the shape of the call.
    pub first: String,

    /// The shape of the first entry.
    pub expected: &'static str,

    /// The name of the offending entry.
    pub name: String,

    /// The shape of the offending entry.
    pub found: &'static str,
}

/// A table row has a different number of values than the table has columns.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!(
        "row {} has {} value{}, but the table has {} column{}",
        self.row,
        self.given,
        if self.given == 1 { "" } else { "s" },
        self.expected,
        if self.expected == 1 { "" } else { "s" },
    ),
)]
pub struct RowWidthMismatch {
    /// The index of the row.
    pub row: usize,

    /// The number of columns in the table.
    pub expected: usize,

    /// The number of values in the row.
    pub given: usize,
}

/// The name used for the rendered expression in reports.
const SRC_ID: &str = "expression";

/// Writes the report of `err` to the given writer, highlighting its spans in the LaTeX rendering
/// of `expr`.
pub fn write_report(err: &Error, expr: &Expr, writer: impl io::Write) -> io::Result<()> {
    err.write_report(SRC_ID, &expr.to_latex(), writer)
}

/// Prints the report of `err` to stderr, highlighting its spans in the LaTeX rendering of `expr`.
///
/// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so the report
/// can only be printed to stderr or written to an [`io::Write`] (see [`write_report`]).
///
/// [`Report`]: https://docs.rs/ariadne/latest/ariadne/struct.Report.html
pub fn report_to_stderr(err: &Error, expr: &Expr) -> io::Result<()> {
    err.report_to_stderr(SRC_ID, &expr.to_latex())
}
