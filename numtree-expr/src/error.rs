//! Errors raised while building or evaluating expressions.

use ariadne::Fmt;
use levenshtein::levenshtein;
use numtree_attrs::ErrorKind;
use numtree_error::EXPR;

/// A literal of a type that cannot be used as an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot use a value of type `{}` in an expression", self.type_name),
    help = format!(
        "`{}` is not a number, a variable name, or an expression; only those can be converted",
        self.value,
    ),
)]
pub struct UnsupportedLiteralType {
    /// The display text of the offending value.
    pub value: String,

    /// The name of the offending value's type.
    pub type_name: &'static str,
}

/// No value was supplied for a variable the expression depends on.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing value for variable `{}`", self.name),
    labels = std::iter::repeat("this variable"),
    help = if self.suggestions.is_empty() {
        format!("supply a value for {}", (&self.name).fg(EXPR))
    } else {
        format!(
            "a value was supplied for {}; did you mean to name it {}?",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", "),
            (&self.name).fg(EXPR),
        )
    },
)]
pub struct MissingVariable {
    /// The name of the variable.
    pub name: String,

    /// Supplied names that are similar to the missing one, if any.
    pub suggestions: Vec<String>,
}

/// Returns the candidates that are within one edit of `name`.
pub fn similar_names<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|candidate| levenshtein(candidate, name) < 2)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn similar_names_within_one_edit() {
        let names = similar_names("x", ["x1", "y", "xyz", "long"]);
        assert_eq!(names, vec!["x1".to_string(), "y".to_string()]);
    }

    #[test]
    fn missing_variable_message() {
        let error = numtree_error::Error::unspanned(MissingVariable {
            name: "x".to_string(),
            suggestions: Vec::new(),
        });
        assert_eq!(error.to_string(), "missing value for variable `x`");
    }
}
