#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options that control how an expression is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalOptions {
    /// Whether vectorized evaluation may split rows across threads.
    ///
    /// This is passed unchanged to the evaluation backend. It never changes the result, only how
    /// it is computed. Scalar evaluation ignores it.
    ///
    /// The default is `true`.
    pub parallel: bool,

    /// Whether to reject data that supplies variables the expression does not depend on.
    ///
    /// When `false`, such variables are ignored. When `true`, the call fails with
    /// [`UnexpectedVariable`](crate::error::UnexpectedVariable).
    ///
    /// The default is `false`.
    pub strict: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            strict: false,
        }
    }
}

impl EvalOptions {
    /// Wraps the given [`EvalOptions`] into a builder for further customization.
    pub fn into_builder(self) -> EvalOptionsBuilder {
        EvalOptionsBuilder(self)
    }
}

/// A builder for [`EvalOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptionsBuilder(EvalOptions);

impl EvalOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether vectorized evaluation may run in parallel. See [`EvalOptions::parallel`].
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.0.parallel = parallel;
        self
    }

    /// Sets whether unreferenced variables are rejected. See [`EvalOptions::strict`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.0.strict = strict;
        self
    }

    /// Builds the [`EvalOptions`].
    pub fn build(self) -> EvalOptions {
        self.0
    }
}
