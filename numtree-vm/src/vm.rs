use crate::{error::ArityMismatch, instruction::{Chunk, Instruction}};
use numtree_compiler::{Columns, Vectorized};
use numtree_error::Error;
use rayon::prelude::*;

/// A validated bytecode program that evaluates an expression for any number of input rows.
///
/// A [`Vm`] is created by [`VmBackend::finish`](numtree_compiler::Backend::finish), which
/// guarantees that the program never underflows its stack, never reads past its inputs, and
/// leaves exactly one value when it finishes.
#[derive(Debug, Clone)]
pub struct Vm {
    /// The program to execute.
    chunk: Chunk,

    /// The number of input columns the program reads.
    arity: usize,

    /// The maximum number of values on the stack at any point during execution.
    max_stack: usize,
}

impl Vm {
    /// Creates a virtual machine for an already validated chunk.
    pub(crate) fn new(chunk: Chunk, arity: usize, max_stack: usize) -> Self {
        Self { chunk, arity, max_stack }
    }

    /// Returns the program executed by this virtual machine.
    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    /// Returns the size of the value stack the program needs.
    pub fn max_stack(&self) -> usize {
        self.max_stack
    }

    /// Runs the program once, reading input column `j` through `load(j)`. `stack` must hold at
    /// least [`Vm::max_stack`] values.
    #[inline]
    fn exec(&self, stack: &mut [f64], load: impl Fn(usize) -> f64) -> f64 {
        let mut top = 0;
        for instruction in &self.chunk.instructions {
            match *instruction {
                Instruction::LoadConst(value) => {
                    stack[top] = value;
                    top += 1;
                },
                Instruction::LoadVar(index) => {
                    stack[top] = load(index);
                    top += 1;
                },
                Instruction::Unary(op) => {
                    stack[top - 1] = op.apply(stack[top - 1]);
                },
                Instruction::Binary(op) => {
                    top -= 1;
                    stack[top - 1] = op.apply(stack[top - 1], stack[top]);
                },
            }
        }
        stack[0]
    }

    /// Evaluates the program for a single row of inputs.
    pub fn eval_row(&self, row: &[f64]) -> Result<f64, Error> {
        if row.len() != self.arity {
            return Err(Error::unspanned(ArityMismatch {
                expected: self.arity,
                given: row.len(),
            }));
        }
        let mut stack = vec![0.0; self.max_stack];
        Ok(self.exec(&mut stack, |index| row[index]))
    }
}

impl Vectorized for Vm {
    fn arity(&self) -> usize {
        self.arity
    }

    fn evaluate_vectorized(&self, columns: &Columns, parallel: bool) -> Result<Vec<f64>, Error> {
        if columns.cols() != self.arity {
            return Err(Error::unspanned(ArityMismatch {
                expected: self.arity,
                given: columns.cols(),
            }));
        }

        tracing::trace!(rows = columns.rows(), parallel, "evaluating chunk");
        let outputs: Vec<f64> = if parallel {
            (0..columns.rows())
                .into_par_iter()
                .map_init(
                    || vec![0.0; self.max_stack],
                    |stack, row| self.exec(stack, |col| columns.get(row, col)),
                )
                .collect()
        } else {
            let mut stack = vec![0.0; self.max_stack];
            (0..columns.rows())
                .map(|row| self.exec(&mut stack, |col| columns.get(row, col)))
                .collect()
        };
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use numtree_compiler::build;
    use numtree_expr::Expr;
    use pretty_assertions::assert_eq;
    use crate::VmBackend;
    use super::*;

    fn compile(expr: &Expr) -> Vm {
        build(&VmBackend, expr, &expr.parameter_list()).unwrap()
    }

    #[test]
    fn linear_over_rows() {
        let vm = compile(&(2 + 3 * Expr::variable("x")));
        let columns = Columns::from_columns([[1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(vm.evaluate_vectorized(&columns, false).unwrap(), vec![5.0, 8.0, 11.0]);
        assert_eq!(vm.evaluate_vectorized(&columns, true).unwrap(), vec![5.0, 8.0, 11.0]);
    }

    #[test]
    fn eval_row() {
        let vm = compile(&Expr::div("x", "y").pow(2));
        assert_eq!(vm.eval_row(&[6.0, 3.0]).unwrap(), 4.0);
        assert!(vm.eval_row(&[6.0]).unwrap_err().is::<ArityMismatch>());
    }

    #[test]
    fn parallel_matches_sequential_bitwise() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let expr = (&x * 1.5).sin() + (&y / (&x + 1)).exp().ln() - y.clone().sqrt().log(&x + 2);
        let vm = compile(&expr);

        let n = 10_000;
        let xs = (0..n).map(|i| i as f64 * 0.001).collect::<Vec<_>>();
        let ys = (0..n).map(|i| (n - i) as f64 * 0.37).collect::<Vec<_>>();
        let columns = Columns::from_columns([xs, ys]).unwrap();

        let sequential = vm.evaluate_vectorized(&columns, false).unwrap();
        let parallel = vm.evaluate_vectorized(&columns, true).unwrap();
        assert_eq!(sequential.len(), n);
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn matches_scalar_evaluation() {
        use numtree_expr::{Bindings, Eval};

        let expr = Expr::variable("a").cos() * Expr::variable("b").exp() - 4;
        let vm = compile(&expr);
        let columns = Columns::from_columns([[0.1, 0.2], [1.0, -1.0]]).unwrap();
        let outputs = vm.evaluate_vectorized(&columns, true).unwrap();

        for (row, output) in outputs.iter().enumerate() {
            let bindings = Bindings::new()
                .with("a", columns.get(row, 0))
                .with("b", columns.get(row, 1));
            assert_float_absolute_eq!(*output, expr.eval(&bindings).unwrap(), 1e-12);
        }
    }

    #[test]
    fn constant_program_over_rows() {
        let vm = compile(&Expr::Constant(7.0));
        let outputs = vm.evaluate_vectorized(&Columns::with_rows(3), true).unwrap();
        assert_eq!(outputs, vec![7.0, 7.0, 7.0]);
    }

    #[test]
    fn arity_mismatch() {
        let vm = compile(&Expr::add("x", "y"));
        let columns = Columns::from_columns([[1.0]]).unwrap();
        let err = vm.evaluate_vectorized(&columns, false).unwrap_err();
        let kind = err.kind_as::<ArityMismatch>().unwrap();
        assert_eq!((kind.expected, kind.given), (2, 1));
    }

    #[test]
    fn empty_rows() {
        let vm = compile(&Expr::variable("x").sin());
        let columns = Columns::from_columns([Vec::<f64>::new()]).unwrap();
        assert!(vm.evaluate_vectorized(&columns, true).unwrap().is_empty());
    }
}
