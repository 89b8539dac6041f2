//! Compilation of expression trees for vectorized evaluation.
//!
//! Evaluating an expression over many rows of input is delegated to a [`Backend`]. The protocol
//! between a tree and a backend has three parts:
//!
//! 1. The tree's [`ParameterList`](numtree_expr::ParameterList) fixes the position of each
//!    variable. [`Compile`] walks the tree bottom-up, asking the backend to build a node for each
//!    subtree, and resolves every variable to its index in the list.
//! 2. [`Backend::finish`] turns the root node into an opaque compiled form implementing
//!    [`Vectorized`].
//! 3. The caller stacks one array per parameter, in parameter order, into a column-major
//!    [`Columns`] buffer and calls [`Vectorized::evaluate_vectorized`], which produces one output
//!    per row.
//!
//! Compiling is much more expensive than evaluating a single row, so compiled forms are memoized
//! in a [`CompileCache`] keyed by the tree and its parameter order.
//!
//! ```
//! use numtree_compiler::Columns;
//! use numtree_expr::Expr;
//!
//! let expr = Expr::div("x", "y");
//! let params = expr.parameter_list();
//! assert_eq!(params.names().collect::<Vec<_>>(), vec!["x", "y"]);
//!
//! // x = [1, 2], y = [4, 8]
//! let columns = Columns::from_columns([[1.0, 2.0], [4.0, 8.0]]).unwrap();
//! assert_eq!(columns.as_slice(), &[1.0, 2.0, 4.0, 8.0]);
//! ```

pub mod backend;
pub mod cache;
pub mod columns;
pub mod compile;
pub mod error;

#[cfg(test)]
mod testing;

pub use backend::{Backend, Vectorized};
pub use cache::CompileCache;
pub use columns::Columns;
pub use compile::{build, Compile};
pub use numtree_expr::ParameterList;
