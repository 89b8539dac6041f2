//! Scalar evaluation of expressions.

use crate::{error::{similar_names, MissingVariable}, expr::{Expr, Variable}};
use numtree_error::Error;
use std::collections::HashMap;

/// Values bound to variable names for one scalar evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<Variable, f64>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to the variable, replacing any previous value.
    pub fn set(&mut self, var: impl Into<Variable>, value: f64) -> &mut Self {
        self.values.insert(var.into(), value);
        self
    }

    /// Binds `value` to the variable, replacing any previous value.
    pub fn with(mut self, var: impl Into<Variable>, value: f64) -> Self {
        self.set(var, value);
        self
    }

    /// Returns the value bound to the variable with the given name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Returns the names of the bound variables, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(Variable::name)
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Into<Variable>> FromIterator<(V, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (V, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(var, value)| (var.into(), value)).collect(),
        }
    }
}

impl<V: Into<Variable>> Extend<(V, f64)> for Bindings {
    fn extend<I: IntoIterator<Item = (V, f64)>>(&mut self, iter: I) {
        self.values.extend(iter.into_iter().map(|(var, value)| (var.into(), value)));
    }
}

/// Evaluates an expression to a single number.
pub trait Eval {
    /// Evaluates the expression with the given bindings.
    ///
    /// Floating-point semantics apply throughout: dividing by zero produces an infinity and taking
    /// the logarithm of a negative number produces `NaN`. The only failure is a variable with no
    /// binding, which is reported as [`MissingVariable`].
    fn eval(&self, bindings: &Bindings) -> Result<f64, Error>;
}

/// Evaluates the tree in post-order on a value stack, returning the first unbound variable met on
/// failure.
fn eval_inner<'a>(expr: &'a Expr, bindings: &Bindings) -> Result<f64, &'a Variable> {
    let mut stack = Vec::new();
    for node in expr.post_order_iter() {
        match node {
            Expr::Constant(value) => stack.push(*value),
            Expr::Variable(var) => stack.push(bindings.get(var.name()).ok_or(var)?),
            Expr::Unary(unary) => {
                let top = stack.len() - 1;
                stack[top] = unary.op.apply(stack[top]);
            },
            Expr::Binary(binary) => {
                let rhs = stack.len() - 1;
                let value = binary.op.apply(stack[rhs - 1], stack[rhs]);
                stack.truncate(rhs);
                stack[rhs - 1] = value;
            },
        }
    }

    // post-order leaves exactly the root's value
    Ok(stack[0])
}

impl Eval for Expr {
    fn eval(&self, bindings: &Bindings) -> Result<f64, Error> {
        eval_inner(self, bindings).map_err(|var| {
            let referenced = self.variables();
            let unused = bindings.names().filter(|name| !referenced.contains(*name));
            Error::new(self.variable_spans(var.name()), MissingVariable {
                name: var.name().to_string(),
                suggestions: similar_names(var.name(), unused),
            })
        })
    }
}
