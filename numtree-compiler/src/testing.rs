//! A closure-tree backend for exercising the compilation protocol in tests.

use crate::{Backend, Columns, Vectorized};
use numtree_error::Error;
use std::sync::{atomic::{AtomicUsize, Ordering}, Arc};

type Func = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// A node that knows how to print itself and how to evaluate a single row.
#[derive(Clone)]
pub struct SexpNode {
    pub sexp: String,
    eval: Func,
}

impl std::fmt::Debug for SexpNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SexpNode").field("sexp", &self.sexp).finish_non_exhaustive()
    }
}

/// The compiled form of [`SexpBackend`].
pub struct SexpCompiled {
    pub sexp: String,
    pub arity: usize,
    eval: Func,
}

impl Vectorized for SexpCompiled {
    fn arity(&self) -> usize {
        self.arity
    }

    fn evaluate_vectorized(&self, columns: &Columns, _: bool) -> Result<Vec<f64>, Error> {
        let mut buf = Vec::new();
        Ok((0..columns.rows())
            .map(|row| {
                columns.row(row, &mut buf);
                (self.eval)(&buf)
            })
            .collect())
    }
}

/// Builds s-expressions and counts how many trees it finished.
#[derive(Default)]
pub struct SexpBackend {
    pub finished: AtomicUsize,
}

impl SexpBackend {
    fn unary_node(&self, name: &str, operand: SexpNode, f: fn(f64) -> f64) -> SexpNode {
        let inner = operand.eval;
        SexpNode {
            sexp: format!("({} {})", name, operand.sexp),
            eval: Arc::new(move |row| f(inner(row))),
        }
    }

    fn binary_node(&self, name: &str, lhs: SexpNode, rhs: SexpNode, f: fn(f64, f64) -> f64) -> SexpNode {
        let (l, r) = (lhs.eval, rhs.eval);
        SexpNode {
            sexp: format!("({} {} {})", name, lhs.sexp, rhs.sexp),
            eval: Arc::new(move |row| f(l(row), r(row))),
        }
    }
}

impl Backend for SexpBackend {
    type Node = SexpNode;
    type Compiled = SexpCompiled;

    fn constant(&self, value: f64) -> SexpNode {
        SexpNode { sexp: value.to_string(), eval: Arc::new(move |_| value) }
    }

    fn variable(&self, index: usize) -> SexpNode {
        SexpNode { sexp: format!("${}", index), eval: Arc::new(move |row| row[index]) }
    }

    fn negate(&self, operand: SexpNode) -> SexpNode {
        self.unary_node("neg", operand, |x| -x)
    }

    fn sqrt(&self, operand: SexpNode) -> SexpNode {
        self.unary_node("sqrt", operand, f64::sqrt)
    }

    fn sin(&self, operand: SexpNode) -> SexpNode {
        self.unary_node("sin", operand, f64::sin)
    }

    fn cos(&self, operand: SexpNode) -> SexpNode {
        self.unary_node("cos", operand, f64::cos)
    }

    fn exp(&self, operand: SexpNode) -> SexpNode {
        self.unary_node("exp", operand, f64::exp)
    }

    fn ln(&self, operand: SexpNode) -> SexpNode {
        self.unary_node("ln", operand, f64::ln)
    }

    fn add(&self, lhs: SexpNode, rhs: SexpNode) -> SexpNode {
        self.binary_node("add", lhs, rhs, |a, b| a + b)
    }

    fn subtract(&self, lhs: SexpNode, rhs: SexpNode) -> SexpNode {
        self.binary_node("sub", lhs, rhs, |a, b| a - b)
    }

    fn multiply(&self, lhs: SexpNode, rhs: SexpNode) -> SexpNode {
        self.binary_node("mul", lhs, rhs, |a, b| a * b)
    }

    fn divide(&self, lhs: SexpNode, rhs: SexpNode) -> SexpNode {
        self.binary_node("div", lhs, rhs, |a, b| a / b)
    }

    fn pow(&self, base: SexpNode, exponent: SexpNode) -> SexpNode {
        self.binary_node("pow", base, exponent, f64::powf)
    }

    fn log(&self, argument: SexpNode, base: SexpNode) -> SexpNode {
        self.binary_node("log", argument, base, f64::log)
    }

    fn finish(&self, root: SexpNode, arity: usize) -> Result<SexpCompiled, Error> {
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(SexpCompiled { sexp: root.sexp, arity, eval: root.eval })
    }
}
