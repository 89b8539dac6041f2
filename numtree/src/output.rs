#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Output {
    /// The value of a scalar evaluation.
    Scalar(f64),

    /// The values of a vectorized evaluation, one per row, in row order.
    Array(Vec<f64>),
}

impl Output {
    /// Returns true if this is the result of a scalar evaluation.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns the value of a scalar evaluation.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Array(_) => None,
        }
    }

    /// Returns the values of a vectorized evaluation.
    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(values) => Some(values),
        }
    }

    /// Consumes the output, returning the values of a vectorized evaluation.
    pub fn into_array(self) -> Option<Vec<f64>> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(values) => Some(values),
        }
    }
}
