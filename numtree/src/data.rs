//! The values an expression is called with.

use crate::table::Table;
use numtree_expr::Variable;
use std::collections::{BTreeMap, HashMap};

/// Identifies the variable a value is supplied for, either by name or by [`Variable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariableId {
    /// A variable name.
    Name(String),

    /// A variable.
    Variable(Variable),
}

impl VariableId {
    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Variable(var) => var.name(),
        }
    }

    /// Converts this identifier into a [`Variable`].
    pub fn into_variable(self) -> Variable {
        match self {
            Self::Name(name) => Variable::new(name),
            Self::Variable(var) => var,
        }
    }
}

impl From<&str> for VariableId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for VariableId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for VariableId {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<Variable> for VariableId {
    fn from(var: Variable) -> Self {
        Self::Variable(var)
    }
}

impl From<&Variable> for VariableId {
    fn from(var: &Variable) -> Self {
        Self::Variable(var.clone())
    }
}

/// A value supplied for one variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single number.
    Scalar(f64),

    /// One number per row.
    Array(Vec<f64>),
}

impl Value {
    /// Returns the name of the shape of this value.
    pub fn typename(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "a scalar",
            Self::Array(_) => "an array",
        }
    }

    /// Returns true if this value is a single number.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Scalar(value as f64)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Self::Array(values)
    }
}

impl From<&[f64]> for Value {
    fn from(values: &[f64]) -> Self {
        Self::Array(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(values: [f64; N]) -> Self {
        Self::Array(values.to_vec())
    }
}

/// The data an expression is called with: an ordered list of values keyed by variable.
///
/// Keys may repeat; when they do, the later value replaces the earlier one. Data can be built
/// from maps and vectors of pairs, from a [`Table`], or keyword-style:
///
/// ```
/// use numtree::Data;
///
/// let data = Data::new()
///     .with("x", 1.0)
///     .with("y", 2.0);
/// assert_eq!(data.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data {
    entries: Vec<(VariableId, Value)>,
}

impl Data {
    /// Creates empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value for the given variable.
    pub fn with(mut self, id: impl Into<VariableId>, value: impl Into<Value>) -> Self {
        self.push(id, value);
        self
    }

    /// Adds a value for the given variable.
    pub fn push(&mut self, id: impl Into<VariableId>, value: impl Into<Value>) {
        self.entries.push((id.into(), value.into()));
    }

    /// Returns the entries in the order they were added.
    pub fn entries(&self) -> &[(VariableId, Value)] {
        &self.entries
    }

    /// Returns the number of entries, counting repeated keys separately.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the data, returning its entries in the order they were added.
    pub fn into_entries(self) -> Vec<(VariableId, Value)> {
        self.entries
    }
}

impl<K: Into<VariableId>, V: Into<Value>> FromIterator<(K, V)> for Data {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<VariableId>, V: Into<Value>> From<Vec<(K, V)>> for Data {
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<VariableId>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Data {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// The entries are taken in the map's iteration order, which is unspecified.
impl<K: Into<VariableId>, V: Into<Value>, S> From<HashMap<K, V, S>> for Data {
    fn from(map: HashMap<K, V, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<VariableId>, V: Into<Value>> From<BTreeMap<K, V>> for Data {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

/// One array per column, in column order.
impl From<Table> for Data {
    fn from(table: Table) -> Self {
        table.into_columns().collect()
    }
}

impl From<&Table> for Data {
    fn from(table: &Table) -> Self {
        table.column_names()
            .iter()
            .enumerate()
            .map(|(index, name)| (name, table.column_at(index)))
            .collect()
    }
}
