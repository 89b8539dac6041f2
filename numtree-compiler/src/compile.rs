use crate::{backend::Backend, error::UnknownVariable};
use numtree_error::Error;
use numtree_expr::{Expr, ParameterList, Variable};

/// Any type that can be compiled into a backend's representation.
pub trait Compile {
    /// Builds the backend node for this value, resolving each variable to its index in `params`.
    fn compile<B: Backend>(&self, backend: &B, params: &ParameterList) -> Result<B::Node, Error>;
}

impl<T: Compile> Compile for &T {
    fn compile<B: Backend>(&self, backend: &B, params: &ParameterList) -> Result<B::Node, Error> {
        (*self).compile(backend, params)
    }
}

/// Builds the tree bottom-up in post-order, returning the first variable missing from `params` on
/// failure.
fn compile_inner<'a, B: Backend>(
    expr: &'a Expr,
    backend: &B,
    params: &ParameterList,
) -> Result<B::Node, &'a Variable> {
    let mut nodes = Vec::<B::Node>::new();
    for node in expr.post_order_iter() {
        let built = match node {
            Expr::Constant(value) => backend.constant(*value),
            Expr::Variable(var) => backend.variable(params.index_of(var.name()).ok_or(var)?),
            Expr::Unary(unary) => {
                let Some(operand) = nodes.pop() else {
                    unreachable!("operand is built before its operator");
                };
                backend.unary(unary.op, operand)
            },
            Expr::Binary(binary) => {
                let (Some(rhs), Some(lhs)) = (nodes.pop(), nodes.pop()) else {
                    unreachable!("operands are built before their operator");
                };
                backend.binary(binary.op, lhs, rhs)
            },
        };
        nodes.push(built);
    }

    match nodes.pop() {
        Some(root) => Ok(root),
        None => unreachable!("every tree has a root"),
    }
}

impl Compile for Expr {
    fn compile<B: Backend>(&self, backend: &B, params: &ParameterList) -> Result<B::Node, Error> {
        compile_inner(self, backend, params).map_err(|var| {
            Error::new(self.variable_spans(var.name()), UnknownVariable {
                name: var.name().to_string(),
            })
        })
    }
}

/// Compiles `expr` against `params` and finishes it into the backend's compiled form.
pub fn build<B: Backend>(
    backend: &B,
    expr: &Expr,
    params: &ParameterList,
) -> Result<B::Compiled, Error> {
    tracing::debug!(params = params.len(), nodes = expr.node_count(), "compiling expression");
    let root = expr.compile(backend, params)?;
    backend.finish(root, params.len())
}
