//! Summing variables out of a `Factor`.

use super::{shape_of, Factor, Table};
use crate::semiring::SemiRing;
use crate::util::{Result, TallyError};
use crate::variable::Variable;

use indexmap::IndexSet;
use log::debug;
use ndarray::IxDyn;

use std::iter::FromIterator;


/// An ordered set of variable names.
///
/// A single name converts into a one-element set, so `factor.marginal("R")` and
/// `factor.marginal(vec!["R", "S"])` go through the same code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableSet {
    names: IndexSet<String>
}

impl VariableSet {

    /// The empty set
    pub fn new() -> Self {
        VariableSet { names: IndexSet::new() }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

}

impl<S: Into<String>> FromIterator<S> for VariableSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        VariableSet { names: iter.into_iter().map(|s| s.into()).collect() }
    }
}

impl<'a> From<&'a str> for VariableSet {
    fn from(name: &'a str) -> Self {
        Some(name).into_iter().collect()
    }
}

impl From<String> for VariableSet {
    fn from(name: String) -> Self {
        Some(name).into_iter().collect()
    }
}

impl<'a> From<Vec<&'a str>> for VariableSet {
    fn from(names: Vec<&'a str>) -> Self {
        names.into_iter().collect()
    }
}

impl From<Vec<String>> for VariableSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl<'a, 'b> From<&'b [&'a str]> for VariableSet {
    fn from(names: &'b [&'a str]) -> Self {
        names.iter().cloned().collect()
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for VariableSet {
    fn from(names: [&'a str; N]) -> Self {
        names.iter().cloned().collect()
    }
}


impl Factor {

    /// The distribution over the variables named in `keep`, with every other variable summed
    /// out. The retained variables keep their relative order from this `Factor`'s scope.
    ///
    /// Keeping the whole scope returns the `Factor` unchanged; keeping nothing returns a scalar
    /// holding the total mass of the table.
    ///
    /// # Errors
    /// * `TallyError::UnknownVariable` if a name in `keep` is not in the scope
    pub fn marginal<K: Into<VariableSet>>(&self, keep: K) -> Result<Factor> {
        self.marginalize(keep, &SemiRing::sum_product())
    }

    /// Eliminate every variable not named in `keep` with the addition of `ring`.
    ///
    /// The table is traversed exactly once, however many variables are removed.
    pub fn marginalize<K: Into<VariableSet>>(&self, keep: K, ring: &SemiRing) -> Result<Factor> {
        let keep = keep.into();
        debug!("marginalize({:?}, keep = {:?})", self.scope(), keep.names().collect::<Vec<_>>());

        if let Some(name) = keep.names().find(|n| self.position(n).is_none()) {
            return Err(TallyError::UnknownVariable(String::from(name)));
        }

        if keep.len() == self.scope.len() {
            return Ok(self.clone());
        }

        let positions: Vec<usize> = (0..self.scope.len())
            .filter(|&i| keep.contains(self.scope[i].name()))
            .collect();
        let scope: Vec<Variable> = positions.iter().map(|&i| self.scope[i].clone()).collect();

        let mut table = Table::from_elem(IxDyn(&shape_of(&scope)), ring.zero);
        let mut kept = vec![0; positions.len()];
        for (idx, &v) in self.table.indexed_iter() {
            for (k, &p) in positions.iter().enumerate() {
                kept[k] = idx[p];
            }
            let cell = &mut table[IxDyn(&kept)];
            *cell = (ring.add)(*cell, v);
        }

        Ok(Factor::from_table(scope, table))
    }

}
