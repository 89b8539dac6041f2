//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors in numtree point into the LaTeX rendering of the expression they concern. The spans
//! stored in an [`Error`] are character offsets into that rendering, so a report can be built by
//! handing the rendered expression to [`Error::report_to_stderr`] or [`Error::write_report`].

extern crate self as numtree_error;

pub use ariadne;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns this error kind as [`Any`], so that it can be downcast to its concrete type.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of an expression's rendering that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the rendered expression that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any part of the expression.
    pub fn unspanned(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the kind of this error as the concrete type `T`, if it is one.
    pub fn kind_as<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// Returns true if the kind of this error is the concrete type `T`.
    pub fn is<T: ErrorKind + 'static>(&self) -> bool {
        self.kind_as::<T>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report of this error to the given writer, using `src` as the text the spans
    /// point into.
    pub fn write_report(&self, src_id: &str, src: &str, writer: impl io::Write) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(src)), writer)
    }

    /// Prints the report of this error to stderr, using `src` as the text the spans point into.
    pub fn report_to_stderr(&self, src_id: &str, src: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(src)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

impl<K: ErrorKind + 'static> From<K> for Error {
    fn from(kind: K) -> Self {
        Self::unspanned(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numtree_attrs::ErrorKind;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("no value was supplied for `{}`", name),
        labels = ["this variable", ""],
        help = "supply a value for it",
    )]
    struct NoValue {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "something else went wrong", note = "nothing was evaluated")]
    struct Other;

    fn render(error: &Error, src: &str) -> String {
        let mut buf = Vec::new();
        error.write_report("expr", src, &mut buf).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn message_uses_fields() {
        let error = Error::new(vec![0..1], NoValue { name: "x".to_string() });
        assert_eq!(error.to_string(), "no value was supplied for `x`");
    }

    #[test]
    fn downcast_kind() {
        let error = Error::from(Other);
        assert!(error.is::<Other>());
        assert!(error.kind_as::<NoValue>().is_none());
        assert!(error.spans.is_empty());
    }

    #[test]
    fn report_contains_labels_and_help() {
        let src = r"x + \sqrt{x}";
        let error = Error::new(vec![0..1, 10..11], NoValue { name: "x".to_string() });
        let report = render(&error, src);

        assert!(report.contains("no value was supplied for `x`"));
        assert!(report.contains("this variable"));
        assert!(report.contains("supply a value for it"));
    }

    #[test]
    fn report_without_spans() {
        let error = Error::from(Other);
        let report = render(&error, "1");
        assert!(report.contains("something else went wrong"));
        assert!(report.contains("nothing was evaluated"));
    }
}
