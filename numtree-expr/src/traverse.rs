//! Queries over the variables of an expression.

use crate::expr::{Expr, Variable};
use std::{collections::{HashMap, HashSet}, hash::{Hash, Hasher}};

/// The ordered list of distinct variables an expression depends on.
///
/// The order is the positional contract between an expression and its compiled form: the `i`th
/// input column of a compiled expression holds the values of the `i`th variable in this list.
#[derive(Debug, Clone, Default)]
pub struct ParameterList {
    /// The variables, in first-seen order.
    variables: Vec<Variable>,

    /// The index of each variable in `variables`.
    indices: HashMap<Variable, usize>,
}

impl ParameterList {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the variable if it is not already in the list. Returns true if it was added.
    pub fn push(&mut self, var: &Variable) -> bool {
        if self.indices.contains_key(var) {
            return false;
        }
        self.indices.insert(var.clone(), self.variables.len());
        self.variables.push(var.clone());
        true
    }

    /// Returns the variables in order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns the names of the variables in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.iter().map(Variable::name)
    }

    /// Returns the position of the variable with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns true if the list contains a variable with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if there are no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl PartialEq for ParameterList {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
    }
}

impl Eq for ParameterList {}

impl Hash for ParameterList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variables.hash(state);
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}

impl<V: Into<Variable>> FromIterator<V> for ParameterList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut list = Self::new();
        for var in iter {
            list.push(&var.into());
        }
        list
    }
}

impl Expr {
    /// Returns the set of distinct variables in this expression.
    pub fn variables(&self) -> HashSet<Variable> {
        self.post_order_iter()
            .filter_map(Expr::as_variable)
            .cloned()
            .collect()
    }

    /// Returns the distinct variables of this expression in depth-first, left-to-right order of
    /// first appearance.
    ///
    /// The result only depends on the structure of the tree, so calling this twice on the same
    /// tree always gives the same list.
    pub fn parameter_list(&self) -> ParameterList {
        let mut list = ParameterList::new();
        self.build_parameter_list(&mut list);
        list
    }

    /// Appends the variables of this expression that are not already in `list`, in depth-first,
    /// left-to-right order.
    pub fn build_parameter_list(&self, list: &mut ParameterList) {
        for var in self.post_order_iter().filter_map(Expr::as_variable) {
            list.push(var);
        }
    }
}
