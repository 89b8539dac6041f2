//! Implicit conversion of loosely typed values into expressions.
//!
//! Expressions are usually built with operators, where numbers and strings convert into
//! [`Expr`]s statically through [`From`]. Values whose type is only known at runtime, such as
//! values decoded from a configuration file or passed across a dynamic boundary, are represented as
//! a [`Literal`] and converted with [`coerce`], which rejects anything that has no expression
//! equivalent.

use crate::{error::UnsupportedLiteralType, expr::Expr};
use numtree_error::Error;
use std::fmt;

/// A dynamically typed value that may be convertible into an [`Expr`].
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An existing expression, returned unchanged by [`coerce`].
    Expr(Expr),

    /// A floating-point number, converted into a constant.
    Float(f64),

    /// An integer, converted into a constant.
    Integer(i64),

    /// A string, converted into a variable with that name.
    Str(String),

    /// A boolean. Not convertible.
    Boolean(bool),

    /// A list of values. Not convertible.
    List(Vec<Literal>),

    /// The absence of a value. Not convertible.
    Unit,
}

impl Literal {
    /// Returns the name of the type of this literal.
    pub fn typename(&self) -> &'static str {
        match self {
            Self::Expr(_) => "Expr",
            Self::Float(_) => "Float",
            Self::Integer(_) => "Integer",
            Self::Str(_) => "Str",
            Self::Boolean(_) => "Boolean",
            Self::List(_) => "List",
            Self::Unit => "Unit",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{}", expr),
            Self::Float(value) => write!(f, "{}", value),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Str(value) => write!(f, "{:?}", value),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::List(values) => {
                write!(f, "[")?;
                let mut iter = values.iter();
                if let Some(value) = iter.next() {
                    write!(f, "{}", value)?;
                    for value in iter {
                        write!(f, ", {}", value)?;
                    }
                }
                write!(f, "]")
            },
            Self::Unit => write!(f, "()"),
        }
    }
}

/// Converts a literal into an expression.
///
/// Expressions are returned unchanged, numbers become [`Expr::Constant`]s and strings become
/// [`Expr::Variable`]s. Any other literal fails with [`UnsupportedLiteralType`].
pub fn coerce(literal: Literal) -> Result<Expr, Error> {
    match literal {
        Literal::Expr(expr) => Ok(expr),
        Literal::Float(value) => Ok(Expr::Constant(value)),
        Literal::Integer(value) => Ok(Expr::Constant(value as f64)),
        Literal::Str(name) => Ok(Expr::variable(name)),
        other => Err(Error::unspanned(UnsupportedLiteralType {
            value: other.to_string(),
            type_name: other.typename(),
        })),
    }
}

impl TryFrom<Literal> for Expr {
    type Error = Error;

    fn try_from(literal: Literal) -> Result<Self, Self::Error> {
        coerce(literal)
    }
}

impl From<Expr> for Literal {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn coerce_numbers() {
        assert_eq!(coerce(Literal::Float(2.5)).unwrap(), Expr::Constant(2.5));
        assert_eq!(coerce(Literal::Integer(3)).unwrap(), Expr::Constant(3.0));
    }

    #[test]
    fn coerce_string() {
        assert_eq!(coerce(Literal::from("x")).unwrap(), Expr::variable("x"));
    }

    #[test]
    fn coerce_expr_unchanged() {
        let expr = Expr::variable("x").sin();
        assert_eq!(Expr::try_from(Literal::from(expr.clone())).unwrap(), expr);
    }

    #[test]
    fn unsupported_literals() {
        for (literal, type_name) in [
            (Literal::Boolean(true), "Boolean"),
            (Literal::List(vec![Literal::Integer(1), Literal::Integer(2)]), "List"),
            (Literal::Unit, "Unit"),
        ] {
            let value = literal.to_string();
            let err = coerce(literal).unwrap_err();
            let kind = err.kind_as::<UnsupportedLiteralType>().unwrap();
            assert_eq!(kind.type_name, type_name);
            assert_eq!(kind.value, value);
            assert!(err.to_string().contains(type_name));
        }
    }

    #[test]
    fn list_display() {
        let list = Literal::List(vec![Literal::Integer(1), Literal::from("a")]);
        assert_eq!(list.to_string(), r#"[1, "a"]"#);
    }
}
