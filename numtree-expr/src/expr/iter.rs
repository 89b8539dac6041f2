use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// Each stack entry records whether its children have already been pushed. Subtrees may be shared
/// between parents, so a node cannot be recognized by comparing it with the last visited node.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![(expr, false)],
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(expr);
            }

            match expr {
                Expr::Constant(_) | Expr::Variable(_) => return Some(expr),
                Expr::Unary(unary) => {
                    self.stack.push((expr, true));
                    self.stack.push((&*unary.operand, false));
                },
                Expr::Binary(binary) => {
                    self.stack.push((expr, true));
                    self.stack.push((&*binary.rhs, false));
                    self.stack.push((&*binary.lhs, false));
                },
            }
        }
    }
}
