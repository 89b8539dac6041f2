use crate::columns::Columns;
use numtree_error::Error;
use numtree_expr::{BinOpKind, UnaryOpKind};

/// An evaluation engine that expression trees can be compiled for.
///
/// A backend builds its own representation of a tree bottom-up: every constructor receives the
/// already-built nodes of its children. Once the root is built, [`Backend::finish`] turns it into
/// the backend's compiled form, which evaluates the tree over many rows at once.
///
/// Variables are identified by their position in the parameter list the tree is compiled against,
/// so the compiled form reads the value of variable `i` from column `i` of its input.
pub trait Backend {
    /// A node of the backend's representation of a tree.
    type Node;

    /// The compiled form produced by [`Backend::finish`].
    type Compiled: Vectorized + Send + Sync;

    /// Builds a constant.
    fn constant(&self, value: f64) -> Self::Node;

    /// Builds a reference to the variable at the given parameter index.
    fn variable(&self, index: usize) -> Self::Node;

    /// Builds the negation of `operand`.
    fn negate(&self, operand: Self::Node) -> Self::Node;

    /// Builds the square root of `operand`.
    fn sqrt(&self, operand: Self::Node) -> Self::Node;

    /// Builds the sine of `operand`.
    fn sin(&self, operand: Self::Node) -> Self::Node;

    /// Builds the cosine of `operand`.
    fn cos(&self, operand: Self::Node) -> Self::Node;

    /// Builds `e` raised to `operand`.
    fn exp(&self, operand: Self::Node) -> Self::Node;

    /// Builds the natural logarithm of `operand`.
    fn ln(&self, operand: Self::Node) -> Self::Node;

    /// Builds `lhs + rhs`.
    fn add(&self, lhs: Self::Node, rhs: Self::Node) -> Self::Node;

    /// Builds `lhs - rhs`.
    fn subtract(&self, lhs: Self::Node, rhs: Self::Node) -> Self::Node;

    /// Builds `lhs * rhs`.
    fn multiply(&self, lhs: Self::Node, rhs: Self::Node) -> Self::Node;

    /// Builds `lhs / rhs`.
    fn divide(&self, lhs: Self::Node, rhs: Self::Node) -> Self::Node;

    /// Builds `base` raised to `exponent`.
    fn pow(&self, base: Self::Node, exponent: Self::Node) -> Self::Node;

    /// Builds the logarithm of `argument` in the given `base`.
    fn log(&self, argument: Self::Node, base: Self::Node) -> Self::Node;

    /// Turns the root node into the compiled form. `arity` is the number of input columns the
    /// compiled form reads.
    fn finish(&self, root: Self::Node, arity: usize) -> Result<Self::Compiled, Error>;

    /// Builds the unary operation `op` applied to `operand`.
    fn unary(&self, op: UnaryOpKind, operand: Self::Node) -> Self::Node {
        match op {
            UnaryOpKind::Neg => self.negate(operand),
            UnaryOpKind::Sqrt => self.sqrt(operand),
            UnaryOpKind::Sin => self.sin(operand),
            UnaryOpKind::Cos => self.cos(operand),
            UnaryOpKind::Exp => self.exp(operand),
            UnaryOpKind::Ln => self.ln(operand),
        }
    }

    /// Builds the binary operation `op` applied to `lhs` and `rhs`.
    fn binary(&self, op: BinOpKind, lhs: Self::Node, rhs: Self::Node) -> Self::Node {
        match op {
            BinOpKind::Add => self.add(lhs, rhs),
            BinOpKind::Sub => self.subtract(lhs, rhs),
            BinOpKind::Mul => self.multiply(lhs, rhs),
            BinOpKind::Div => self.divide(lhs, rhs),
            BinOpKind::Pow => self.pow(lhs, rhs),
            BinOpKind::Log => self.log(lhs, rhs),
        }
    }
}

/// A compiled expression that evaluates over many rows of input at once.
pub trait Vectorized {
    /// The number of input columns this compiled form reads.
    fn arity(&self) -> usize;

    /// Evaluates the expression once per row of `columns`, returning one output per row in row
    /// order.
    ///
    /// `parallel` allows the implementation to split the rows across threads. The outputs must
    /// not depend on it.
    fn evaluate_vectorized(&self, columns: &Columns, parallel: bool) -> Result<Vec<f64>, Error>;
}
