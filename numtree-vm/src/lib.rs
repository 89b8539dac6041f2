//! A stack bytecode backend for vectorized evaluation.
//!
//! [`VmBackend`] implements [`Backend`](numtree_compiler::Backend) by emitting a post-order
//! sequence of [`Instruction`]s for the tree. Finishing the sequence validates it and produces a
//! [`Vm`], which implements [`Vectorized`](numtree_compiler::Vectorized) by running the program
//! once per input row.
//!
//! When parallel evaluation is requested, rows are split across the [`rayon`] global thread pool
//! with one value stack per worker. Every row runs the same instructions in the same order, so
//! the outputs are bit-identical to a sequential run.
//!
//! ```
//! use numtree_compiler::{build, Columns, Vectorized};
//! use numtree_expr::Expr;
//! use numtree_vm::VmBackend;
//!
//! let expr = 2 + 3 * Expr::variable("x");
//! let vm = build(&VmBackend, &expr, &expr.parameter_list()).unwrap();
//!
//! let columns = Columns::from_columns([[1.0, 2.0, 3.0]]).unwrap();
//! assert_eq!(vm.evaluate_vectorized(&columns, true).unwrap(), vec![5.0, 8.0, 11.0]);
//! ```

pub mod backend;
pub mod error;
pub mod instruction;
mod vm;

pub use backend::VmBackend;
pub use instruction::{Chunk, Instruction};
pub use vm::Vm;
