//! Build mathematical expressions as trees, render them as LaTeX, and evaluate them for a single
//! set of values or for whole arrays of values at once.
//!
//! Expressions are built with operators or with the named constructors on [`Expr`]. Numbers and
//! strings are converted automatically: a string becomes a variable with that name.
//!
//! ```
//! use numtree::{Call, Data, Expr};
//!
//! let x = Expr::variable("x");
//! let expr = 2 + 3 * x.clone();
//! assert_eq!(expr.to_latex(), "2 + 3 x");
//!
//! // one set of values
//! let output = expr.call(Data::new().with("x", 4.0)).unwrap();
//! assert_eq!(output.as_scalar(), Some(14.0));
//!
//! // one output per row
//! let output = expr.call(Data::new().with("x", [1.0, 2.0, 3.0])).unwrap();
//! assert_eq!(output.into_array(), Some(vec![5.0, 8.0, 11.0]));
//! ```
//!
//! Scalar calls walk the tree. Array calls compile the tree for a [`Backend`], by default the
//! bytecode [`VmBackend`], and run the compiled form over every row, in parallel unless
//! [`EvalOptions::parallel`] is turned off. Compiled forms are cached per [`Evaluator`].
//!
//! Errors are [`Error`]s, which can be rendered as a report that points into the LaTeX rendering
//! of the expression with [`error::report_to_stderr`] or [`error::write_report`].

pub mod data;
pub mod error;
pub mod evaluator;
pub mod options;
pub mod output;
pub mod table;

pub use data::{Data, Value, VariableId};
pub use evaluator::{default_evaluator, Call, Evaluator};
pub use numtree_compiler::{Backend, Columns, CompileCache, Vectorized};
pub use numtree_error::Error;
pub use numtree_expr::{
    coerce,
    BinOpKind,
    Bindings,
    Eval,
    Expr,
    Latex,
    Literal,
    ParameterList,
    UnaryOpKind,
    Variable,
};
pub use numtree_vm::VmBackend;
pub use options::{EvalOptions, EvalOptionsBuilder};
pub use output::Output;
pub use table::Table;
