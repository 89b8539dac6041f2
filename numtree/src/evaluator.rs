use crate::{
    data::{Data, Value},
    error::{InconsistentArguments, UnexpectedVariable},
    options::EvalOptions,
    output::Output,
};
use numtree_compiler::{Backend, Columns, CompileCache, Vectorized};
use numtree_error::Error;
use numtree_expr::{error::{similar_names, MissingVariable}, Bindings, Eval, Expr, Variable};
use numtree_vm::VmBackend;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Values keyed by variable, in the order each variable was first supplied.
///
/// A later value for the same variable replaces the earlier one in place.
#[derive(Debug)]
struct Keyed<T> {
    entries: Vec<(Variable, T)>,
    indices: HashMap<Variable, usize>,
}

impl<T> Keyed<T> {
    fn new() -> Self {
        Self { entries: Vec::new(), indices: HashMap::new() }
    }

    fn insert(&mut self, var: Variable, value: T) {
        match self.indices.get(&var) {
            Some(&index) => self.entries[index].1 = value,
            None => {
                self.indices.insert(var.clone(), self.entries.len());
                self.entries.push((var, value));
            },
        }
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.indices.get(name).map(|&index| &self.entries[index].1)
    }

    fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(var, _)| var.name())
    }
}

/// Data whose values all have the same shape.
#[derive(Debug)]
enum Normalized {
    Scalars(Keyed<f64>),
    Arrays(Keyed<Vec<f64>>),
}

impl Normalized {
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Scalars(keyed) => Box::new(keyed.names()),
            Self::Arrays(keyed) => Box::new(keyed.names()),
        }
    }

    fn contains(&self, name: &str) -> bool {
        match self {
            Self::Scalars(keyed) => keyed.contains(name),
            Self::Arrays(keyed) => keyed.contains(name),
        }
    }
}

/// Checks that every value has the shape of the first one, and keys the values by variable.
///
/// Empty data is treated as scalar.
fn normalize(expr: &Expr, data: Data) -> Result<Normalized, Error> {
    let mut entries = data.into_entries().into_iter();
    let Some((first_id, first_value)) = entries.next() else {
        return Ok(Normalized::Scalars(Keyed::new()));
    };

    let first = first_id.into_variable();
    let expected = first_value.typename();
    let mismatch = |var: &Variable, value: &Value| {
        Error::new(expr.variable_spans(var.name()), InconsistentArguments {
            first: first.name().to_string(),
            expected,
            name: var.name().to_string(),
            found: value.typename(),
        })
    };

    match first_value {
        Value::Scalar(value) => {
            let mut keyed = Keyed::new();
            keyed.insert(first.clone(), value);
            for (id, value) in entries {
                let var = id.into_variable();
                match value {
                    Value::Scalar(value) => keyed.insert(var, value),
                    array => return Err(mismatch(&var, &array)),
                }
            }
            Ok(Normalized::Scalars(keyed))
        },
        Value::Array(values) => {
            let mut keyed = Keyed::new();
            keyed.insert(first.clone(), values);
            for (id, value) in entries {
                let var = id.into_variable();
                match value {
                    Value::Array(values) => keyed.insert(var, values),
                    scalar => return Err(mismatch(&var, &scalar)),
                }
            }
            Ok(Normalized::Arrays(keyed))
        },
    }
}

/// Evaluates expressions over scalar or array data.
///
/// Scalar data is evaluated by walking the tree. Array data is evaluated by the backend `B`: the
/// tree is compiled once per parameter order, and the compiled form is kept in the evaluator's
/// bounded [`CompileCache`] for later calls.
///
/// ```
/// use numtree::{Data, EvalOptions, Evaluator, Expr, Output};
///
/// let evaluator: Evaluator = Evaluator::default();
/// let expr = 2 + 3 * Expr::variable("x");
///
/// let output = evaluator.evaluate(&expr, Data::new().with("x", 4.0), EvalOptions::default());
/// assert_eq!(output.unwrap(), Output::Scalar(14.0));
///
/// let output = evaluator.evaluate(&expr, [("x", vec![1.0, 2.0, 3.0])], EvalOptions::default());
/// assert_eq!(output.unwrap(), Output::Array(vec![5.0, 8.0, 11.0]));
/// ```
#[derive(Debug)]
pub struct Evaluator<B: Backend = VmBackend> {
    backend: B,
    cache: CompileCache<B>,
}

impl<B: Backend + Default> Default for Evaluator<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: Backend> Evaluator<B> {
    /// Creates an evaluator that compiles array evaluations with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend, cache: CompileCache::new() }
    }

    /// Creates an evaluator whose cache holds up to `capacity` compiled forms.
    pub fn with_cache_capacity(backend: B, capacity: usize) -> Self {
        Self { backend, cache: CompileCache::with_capacity(capacity) }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the cache of compiled forms.
    pub fn cache(&self) -> &CompileCache<B> {
        &self.cache
    }

    /// Evaluates `expr` with the given data.
    ///
    /// If the first value in `data` is a scalar, every value must be a scalar and the result is
    /// [`Output::Scalar`]. Otherwise every value must be an array, the arrays of the variables the
    /// expression depends on must have the same length, and the result is an [`Output::Array`]
    /// with one value per row. Arrays for other names are ignored unless
    /// [`EvalOptions::strict`] is set. Every variable the
    /// expression depends on must be supplied. All of these are checked before anything is
    /// evaluated.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(
        &self,
        expr: &Expr,
        data: impl Into<Data>,
        options: EvalOptions,
    ) -> Result<Output, Error> {
        let data = normalize(expr, data.into())?;
        let params = expr.parameter_list();
        let order = params.names().collect::<Vec<_>>();
        tracing::trace!(?order, "parameter order");

        if let Some(missing) = params.variables().iter().find(|var| !data.contains(var.name())) {
            let unused = data.names().filter(|name| !params.contains(name));
            return Err(Error::new(expr.variable_spans(missing.name()), MissingVariable {
                name: missing.name().to_string(),
                suggestions: similar_names(missing.name(), unused),
            }));
        }

        if options.strict {
            if let Some(name) = data.names().find(|name| !params.contains(name)) {
                return Err(Error::unspanned(UnexpectedVariable {
                    name: name.to_string(),
                    expected: params.names().map(str::to_string).collect(),
                }));
            }
        }

        match data {
            Normalized::Scalars(keyed) => {
                tracing::debug!(variables = params.len(), "scalar evaluation");
                let bindings = keyed.entries.into_iter().collect::<Bindings>();
                expr.eval(&bindings).map(Output::Scalar)
            },
            Normalized::Arrays(keyed) => {
                // only the columns the tree reads must agree in length
                let columns = if params.is_empty() {
                    let rows = keyed.entries.first().map_or(0, |(_, values)| values.len());
                    Columns::with_rows(rows)
                } else {
                    Columns::from_columns(params.variables().iter().map(|var| {
                        keyed.get(var.name()).map_or(&[][..], Vec::as_slice)
                    }))?
                };

                let rows = columns.rows();
                tracing::debug!(rows, parallel = options.parallel, "vectorized evaluation");
                let compiled = self.cache.get_or_compile(&self.backend, expr, &params)?;
                compiled.evaluate_vectorized(&columns, options.parallel).map(Output::Array)
            },
        }
    }
}

/// The evaluator used by [`Call`].
static DEFAULT_EVALUATOR: Lazy<Evaluator> = Lazy::new(Evaluator::default);

/// Returns the process-wide evaluator used by [`Call`].
pub fn default_evaluator() -> &'static Evaluator {
    &DEFAULT_EVALUATOR
}

/// Calls an expression like a function of its variables, using the process-wide evaluator.
///
/// ```
/// use numtree::{Call, Data, Expr};
///
/// let expr = Expr::variable("x").pow(2);
/// let output = expr.call(Data::new().with("x", [1.0, 2.0, 3.0])).unwrap();
/// assert_eq!(output.into_array(), Some(vec![1.0, 4.0, 9.0]));
/// ```
pub trait Call {
    /// Evaluates the expression with the default [`EvalOptions`].
    fn call(&self, data: impl Into<Data>) -> Result<Output, Error> {
        self.call_with(data, EvalOptions::default())
    }

    /// Evaluates the expression with the given options.
    fn call_with(&self, data: impl Into<Data>, options: EvalOptions) -> Result<Output, Error>;
}

impl Call for Expr {
    fn call_with(&self, data: impl Into<Data>, options: EvalOptions) -> Result<Output, Error> {
        default_evaluator().evaluate(self, data, options)
    }
}
