//! The expression tree.
//!
//! An [`Expr`] is an immutable tree of nodes. Leaves are [`Expr::Constant`]s and
//! [`Expr::Variable`]s; every other node applies a unary or binary operator to its children.
//! Children are held behind [`Arc`]s, so cloning an expression is cheap and subtrees can be shared
//! between any number of parents (and threads) without copying.
//!
//! # Structural equality
//!
//! The [`PartialEq`], [`Eq`] and [`Hash`] implementations for [`Expr`] compare trees
//! **structurally**: two expressions are equal if they are the same kind of node, with the same
//! operator, and structurally equal children. Constants are compared by their bit pattern, which
//! makes equality reflexive even for `NaN` constants.
//!
//! Structural equality is not mathematical equality. `x + y` and `y + x` evaluate to the same
//! value for every input, but they are different trees and compare unequal.

mod iter;

pub use iter::ExprIter;

use std::{fmt, hash::{Hash, Hasher}, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named input of an expression, such as `x` or `y`.
///
/// Two variables with the same name are the same variable, no matter where they were created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable {
    name: Arc<str>,
}

impl Variable {
    /// Creates a new variable with the given name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::borrow::Borrow<str> for Variable {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({})", self.name)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&Variable> for Variable {
    fn from(var: &Variable) -> Self {
        var.clone()
    }
}

/// The operation performed by a [`Unary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    /// Negation, `-x`.
    Neg,

    /// Square root.
    Sqrt,

    /// Sine, in radians.
    Sin,

    /// Cosine, in radians.
    Cos,

    /// The natural exponential function, `e^x`.
    Exp,

    /// The natural logarithm.
    Ln,
}

impl UnaryOpKind {
    /// Applies the operation to the given value.
    #[inline]
    pub fn apply(self, operand: f64) -> f64 {
        match self {
            Self::Neg => -operand,
            Self::Sqrt => operand.sqrt(),
            Self::Sin => operand.sin(),
            Self::Cos => operand.cos(),
            Self::Exp => operand.exp(),
            Self::Ln => operand.ln(),
        }
    }
}

/// The operation performed by a [`Binary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    /// Addition.
    Add,

    /// Subtraction.
    Sub,

    /// Multiplication.
    Mul,

    /// Division. The left child is the numerator, the right child the denominator.
    Div,

    /// Exponentiation. The left child is the base, the right child the exponent.
    Pow,

    /// Logarithm. The left child is the argument, the right child the base.
    Log,
}

impl BinOpKind {
    /// Applies the operation to the given operands.
    #[inline]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
            Self::Log => lhs.log(rhs),
        }
    }
}

/// A node applying a [`UnaryOpKind`] to a single child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operation to apply.
    pub op: UnaryOpKind,

    /// The child expression.
    pub operand: Arc<Expr>,
}

/// A node applying a [`BinOpKind`] to two children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left child.
    pub lhs: Arc<Expr>,

    /// The operation to apply.
    pub op: BinOpKind,

    /// The right child.
    pub rhs: Arc<Expr>,
}

/// A mathematical expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A numeric constant, such as `2` or `0.5`.
    Constant(f64),

    /// A variable, such as `x`.
    Variable(Variable),

    /// A unary operation, such as `-x` or `\sin{x}`.
    Unary(Unary),

    /// A binary operation, such as `x + y` or `x^{2}`.
    Binary(Binary),
}

impl PartialEq for Expr {
    /// Two trees are equal if their left-to-right post-order sequences match node for node. Every
    /// node has a fixed number of children, so the sequence determines the tree.
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        let mut lhs = self.post_order_iter();
        let mut rhs = other.post_order_iter();
        loop {
            match (lhs.next(), rhs.next()) {
                (Some(a), Some(b)) if a.shallow_eq(b) => {},
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

/// Constants are compared by their bit pattern, so equality is reflexive.
impl Eq for Expr {}

/// [`Hash`] is implemented manually to hash [`Expr::Constant`]s by their bit pattern, which agrees
/// with the [`PartialEq`] implementation.
impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.post_order_iter() {
            std::mem::discriminant(node).hash(state);
            match node {
                Self::Constant(value) => value.to_bits().hash(state),
                Self::Variable(var) => var.hash(state),
                Self::Unary(unary) => unary.op.hash(state),
                Self::Binary(binary) => binary.op.hash(state),
            }
        }
    }
}

/// Dropping a deep tree recursively would overflow the stack, so uniquely owned children are
/// detached and dropped from an explicit stack instead.
impl Drop for Expr {
    fn drop(&mut self) {
        if !self.has_branch_children() {
            return;
        }

        let leaf = Arc::new(Expr::Constant(0.0));
        let mut pending = Vec::new();
        self.detach_children(&leaf, &mut pending);
        while let Some(child) = pending.pop() {
            // shared children are only released here; their last owner drops them
            if let Ok(mut child) = Arc::try_unwrap(child) {
                child.detach_children(&leaf, &mut pending);
            }
        }
    }
}

impl Expr {
    /// Creates a constant.
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Creates a variable with the given name.
    pub fn variable(name: impl Into<Variable>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a unary node applying `op` to `operand`.
    pub fn unary(op: UnaryOpKind, operand: impl Into<Expr>) -> Self {
        Self::Unary(Unary { op, operand: Arc::new(operand.into()) })
    }

    /// Creates a binary node applying `op` to `lhs` and `rhs`, in that order.
    pub fn binary(lhs: impl Into<Expr>, op: BinOpKind, rhs: impl Into<Expr>) -> Self {
        Self::Binary(Binary {
            lhs: Arc::new(lhs.into()),
            op,
            rhs: Arc::new(rhs.into()),
        })
    }

    /// Creates the negation of `operand`.
    pub fn neg(operand: impl Into<Expr>) -> Self {
        Self::unary(UnaryOpKind::Neg, operand)
    }

    /// Creates the sum `lhs + rhs`.
    pub fn add(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary(lhs, BinOpKind::Add, rhs)
    }

    /// Creates the difference `lhs - rhs`.
    pub fn sub(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary(lhs, BinOpKind::Sub, rhs)
    }

    /// Creates the product `lhs * rhs`.
    pub fn mul(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self::binary(lhs, BinOpKind::Mul, rhs)
    }

    /// Creates the fraction `numerator / denominator`.
    pub fn div(numerator: impl Into<Expr>, denominator: impl Into<Expr>) -> Self {
        Self::binary(numerator, BinOpKind::Div, denominator)
    }

    /// Returns the square root of this expression.
    pub fn sqrt(self) -> Self {
        Self::unary(UnaryOpKind::Sqrt, self)
    }

    /// Returns the sine of this expression.
    pub fn sin(self) -> Self {
        Self::unary(UnaryOpKind::Sin, self)
    }

    /// Returns the cosine of this expression.
    pub fn cos(self) -> Self {
        Self::unary(UnaryOpKind::Cos, self)
    }

    /// Returns `e` raised to this expression.
    pub fn exp(self) -> Self {
        Self::unary(UnaryOpKind::Exp, self)
    }

    /// Returns the natural logarithm of this expression.
    pub fn ln(self) -> Self {
        Self::unary(UnaryOpKind::Ln, self)
    }

    /// Returns this expression raised to `exponent`.
    pub fn pow(self, exponent: impl Into<Expr>) -> Self {
        Self::binary(self, BinOpKind::Pow, exponent)
    }

    /// Returns `base` raised to this expression.
    pub fn rpow(self, base: impl Into<Expr>) -> Self {
        Self::binary(base, BinOpKind::Pow, self)
    }

    /// Returns the logarithm of this expression in the given `base`.
    pub fn log(self, base: impl Into<Expr>) -> Self {
        Self::binary(self, BinOpKind::Log, base)
    }

    /// Unary plus. Returns this expression unchanged.
    pub fn pos(self) -> Self {
        self
    }

    /// Returns the value of this expression if it is a constant.
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the variable if this expression is one.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Returns the children of this node, in traversal order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Constant(_) | Self::Variable(_) => Vec::new(),
            Self::Unary(unary) => vec![&*unary.operand],
            Self::Binary(binary) => vec![&*binary.lhs, &*binary.rhs],
        }
    }

    /// Returns the operand of a unary node.
    pub fn operand(&self) -> Option<&Expr> {
        match self {
            Self::Unary(unary) => Some(&*unary.operand),
            _ => None,
        }
    }

    /// Returns the left child of a binary node.
    pub fn lhs(&self) -> Option<&Expr> {
        match self {
            Self::Binary(binary) => Some(&*binary.lhs),
            _ => None,
        }
    }

    /// Returns the right child of a binary node.
    pub fn rhs(&self) -> Option<&Expr> {
        match self {
            Self::Binary(binary) => Some(&*binary.rhs),
            _ => None,
        }
    }

    /// Returns the left child of a binary node with the given operator.
    fn lhs_of(&self, op: BinOpKind) -> Option<&Expr> {
        match self {
            Self::Binary(binary) if binary.op == op => Some(&*binary.lhs),
            _ => None,
        }
    }

    /// Returns the right child of a binary node with the given operator.
    fn rhs_of(&self, op: BinOpKind) -> Option<&Expr> {
        match self {
            Self::Binary(binary) if binary.op == op => Some(&*binary.rhs),
            _ => None,
        }
    }

    /// Returns the numerator of a fraction.
    pub fn numerator(&self) -> Option<&Expr> {
        self.lhs_of(BinOpKind::Div)
    }

    /// Returns the denominator of a fraction.
    pub fn denominator(&self) -> Option<&Expr> {
        self.rhs_of(BinOpKind::Div)
    }

    /// Returns the base of a power or a logarithm.
    pub fn base(&self) -> Option<&Expr> {
        self.lhs_of(BinOpKind::Pow).or_else(|| self.rhs_of(BinOpKind::Log))
    }

    /// Returns the exponent of a power.
    pub fn exponent(&self) -> Option<&Expr> {
        self.rhs_of(BinOpKind::Pow)
    }

    /// Returns the argument of a logarithm.
    pub fn argument(&self) -> Option<&Expr> {
        self.lhs_of(BinOpKind::Log)
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in this tree. Shared subtrees are counted once per occurrence.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns true if this node is a constant or a variable.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Constant(_) | Self::Variable(_))
    }

    /// Compares this node with another, ignoring their children.
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Constant(lhs), Self::Constant(rhs)) => lhs.to_bits() == rhs.to_bits(),
            (Self::Variable(lhs), Self::Variable(rhs)) => lhs == rhs,
            (Self::Unary(lhs), Self::Unary(rhs)) => lhs.op == rhs.op,
            (Self::Binary(lhs), Self::Binary(rhs)) => lhs.op == rhs.op,
            _ => false,
        }
    }

    /// Returns true if any child of this node has children of its own.
    fn has_branch_children(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Variable(_) => false,
            Self::Unary(unary) => !unary.operand.is_leaf(),
            Self::Binary(binary) => !binary.lhs.is_leaf() || !binary.rhs.is_leaf(),
        }
    }

    /// Replaces the children of this node with `leaf`, moving the originals onto `pending`.
    fn detach_children(&mut self, leaf: &Arc<Expr>, pending: &mut Vec<Arc<Expr>>) {
        match self {
            Self::Constant(_) | Self::Variable(_) => {},
            Self::Unary(unary) => {
                pending.push(std::mem::replace(&mut unary.operand, Arc::clone(leaf)));
            },
            Self::Binary(binary) => {
                pending.push(std::mem::replace(&mut binary.lhs, Arc::clone(leaf)));
                pending.push(std::mem::replace(&mut binary.rhs, Arc::clone(leaf)));
            },
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::Constant(value as f64)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Constant(value as f64)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::Variable(name.into())
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Self::Variable(name.into())
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Self::Variable(var)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

impl From<Arc<Expr>> for Expr {
    fn from(expr: Arc<Expr>) -> Self {
        Arc::unwrap_or_clone(expr)
    }
}
