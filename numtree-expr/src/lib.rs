//! Immutable mathematical expression trees.
//!
//! Expressions are built with operators or named constructors, where numbers become constants and
//! strings become variables:
//!
//! ```
//! use numtree_expr::{Bindings, Eval, Expr};
//!
//! let x = Expr::variable("x");
//! let expr = 2 + 3 * &x;
//!
//! assert_eq!(expr.to_latex(), "2 + 3 x");
//! assert_eq!(expr.eval(&Bindings::new().with("x", 4.0)).unwrap(), 14.0);
//! ```
//!
//! A tree can be rendered as LaTeX ([`latex`]), queried for the variables it depends on
//! ([`traverse`]) and evaluated once for a single set of values ([`eval`]). Evaluating a tree over
//! many rows of input is handled by compiling it, see the `numtree-compiler` crate.

pub mod error;
pub mod eval;
pub mod expr;
pub mod latex;
pub mod literal;
mod ops;
pub mod traverse;

pub use eval::{Bindings, Eval};
pub use expr::{BinOpKind, Binary, Expr, ExprIter, Unary, UnaryOpKind, Variable};
pub use latex::Latex;
pub use literal::{coerce, Literal};
pub use traverse::ParameterList;
