use ariadne::Fmt;
use numtree_attrs::ErrorKind;
use numtree_error::EXPR;

/// Arrays of different lengths were stacked into one input buffer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot evaluate over arrays of different lengths",
    help = format!(
        "every array must have the same number of elements; got lengths {}",
        self.lengths
            .iter()
            .map(|len| len.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    ),
    note = "only the arrays of variables the expression depends on are compared",
)]
pub struct LengthMismatch {
    /// The length of each array, in the order they were given.
    pub lengths: Vec<usize>,
}

/// A variable was compiled that does not appear in the parameter list.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown variable: `{}`", self.name),
    labels = std::iter::repeat("this variable"),
    help = format!(
        "add {} to the parameter list the expression is compiled against",
        (&self.name).fg(EXPR),
    ),
)]
pub struct UnknownVariable {
    /// The name of the variable.
    pub name: String,
}
