//! Operator overloads for building expressions.
//!
//! Each operator is sugar for the corresponding named constructor on [`Expr`], and operands keep
//! their written order: `3.0 - x` builds `Sub(3, x)`, never `Sub(x, 3)`. Numbers become
//! [`Expr::Constant`]s and strings become [`Expr::Variable`]s.

use crate::expr::Expr;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Implements a binary operator for [`Expr`] and `&Expr` with any right operand convertible into
/// an [`Expr`], plus the reflected implementations for number and string left operands.
macro_rules! impl_binary_op {
    ($($trait:ident, $method:ident);* $(;)?) => {
        $(
            impl<T: Into<Expr>> $trait<T> for Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Self::Output {
                    Expr::$method(self, rhs)
                }
            }

            impl<T: Into<Expr>> $trait<T> for &Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Self::Output {
                    Expr::$method(self.clone(), rhs)
                }
            }

            impl_binary_op!(@reflected $trait, $method, f64);
            impl_binary_op!(@reflected $trait, $method, i32);
            impl_binary_op!(@reflected $trait, $method, &str);
        )*
    };
    (@reflected $trait:ident, $method:ident, $lhs:ty) => {
        impl $trait<Expr> for $lhs {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Self::Output {
                Expr::$method(self, rhs)
            }
        }

        impl $trait<&Expr> for $lhs {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Self::Output {
                Expr::$method(self, rhs.clone())
            }
        }
    };
}

impl_binary_op! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::neg(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::neg(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{BinOpKind, UnaryOpKind};
    use super::*;

    #[test]
    fn reflected_sub_preserves_order() {
        let x = Expr::variable("x");
        let expr = 3.0 - &x;
        assert_eq!(expr, Expr::binary(3.0, BinOpKind::Sub, "x"));
        assert_eq!(expr.lhs(), Some(&Expr::Constant(3.0)));
    }

    #[test]
    fn reflected_div_preserves_order() {
        let expr = 1 / Expr::variable("x");
        assert_eq!(expr.numerator(), Some(&Expr::Constant(1.0)));
        assert_eq!(expr.denominator(), Some(&Expr::variable("x")));
    }

    #[test]
    fn string_operands_become_variables() {
        let expr = "y" * Expr::variable("x");
        assert_eq!(expr, Expr::mul("y", "x"));

        let expr = Expr::variable("x") + "y";
        assert_eq!(expr, Expr::add("x", "y"));
    }

    #[test]
    fn mixed_chain() {
        // 2 + 3x
        let x = Expr::variable("x");
        let expr = 2 + 3 * &x;
        assert_eq!(expr, Expr::add(2, Expr::mul(3, "x")));
    }

    #[test]
    fn negation() {
        let x = Expr::variable("x");
        assert_eq!(-&x, Expr::unary(UnaryOpKind::Neg, "x"));
        assert_eq!(-(-x.clone()), Expr::neg(Expr::neg("x")));
        assert_eq!(x.clone().pos(), x);
    }

    #[test]
    fn reused_operand() {
        let inner = Expr::variable("x").sin();
        let expr = &inner + &inner;
        assert_eq!(expr.lhs(), Some(&inner));
        assert_eq!(expr.rhs(), Some(&inner));
    }
}
