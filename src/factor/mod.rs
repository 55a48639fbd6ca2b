//! Definition of the factor module
//!
//! A `Factor` represents a table of non-negative values over every assignment of an ordered
//! scope of `Variable`s. Depending on how it was built it is a prior, a joint distribution, or a
//! conditional probability table.
//!
//! `Factor`s are immutable: the algebra in the submodules always produces a new `Factor`.

use crate::config::Config;
use crate::util::{Result, TallyError};
use crate::variable::{Assignment, Domain, Variable};

use indexmap::IndexSet;
use ndarray::prelude as nd;
use ndarray::IxDyn;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use std::fmt;

mod builder;
mod entries;
mod joint;
mod marginal;
mod observe;

pub use self::builder::FactorBuilder;
pub use self::entries::{all_assignments, Entries};
pub use self::marginal::VariableSet;


/// Alias f64 ndarray::Array as Table
pub type Table = nd::ArrayD<f64>;


/// A table over all assignments of an ordered scope.
///
/// The table holds one axis per scope `Variable`, in scope order, with one entry per value of
/// that `Variable`'s `Domain`. A `Factor` with an empty scope holds exactly one value.
#[derive(Clone, Debug)]
pub struct Factor {
    /// The scope of the `Factor`
    scope: Vec<Variable>,

    /// The values of the `Factor` table.
    table: Table
}


impl Factor {

    /// Create a new `Factor` from a scope and a table of probabilities.
    ///
    /// # Errors
    /// * `TallyError::DuplicateVariable` if a name occurs twice in the scope
    /// * `TallyError::Shape` if the table does not have one axis per variable, each as long as
    ///   the variable's `Domain`
    /// * `TallyError::NegativeProbability` / `TallyError::InvalidProbability` for values that
    ///   are not finite and non-negative
    pub fn new(scope: Vec<Variable>, table: Table) -> Result<Self> {
        check_unique(&scope)?;

        if table.shape() != shape_of(&scope).as_slice() {
            return Err(TallyError::Shape(
                ndarray::ShapeError::from_kind(ndarray::ErrorKind::IncompatibleShape)
            ));
        }

        for &v in table.iter() {
            check_probability(v)?;
        }

        Ok(Factor::from_table(scope, table))
    }

    /// A `Factor` with an empty scope holding a single value
    ///
    /// # Errors
    /// * `TallyError::NegativeProbability` / `TallyError::InvalidProbability` if `value` is not
    ///   finite and non-negative
    pub fn scalar(value: f64) -> Result<Self> {
        check_probability(value)?;
        Ok(Factor::from_table(vec![], nd::ArrayD::from_elem(IxDyn(&[]), value)))
    }

    /// A `Factor` over `scope` with every value drawn uniformly from `[0, 1)`
    pub fn random<R: Rng + ?Sized>(scope: Vec<Variable>, rng: &mut R) -> Result<Self> {
        check_unique(&scope)?;
        let table = Table::random_using(IxDyn(&shape_of(&scope)), Uniform::new(0.0, 1.0), rng);
        Ok(Factor::from_table(scope, table))
    }

    /// A random `Factor` over `scope` whose values sum to 1
    pub fn random_distribution<R: Rng + ?Sized>(scope: Vec<Variable>, rng: &mut R) -> Result<Self> {
        Factor::random(scope, rng)?.normalize()
    }

    /// Wrap a table whose shape is already known to match `scope`
    pub(crate) fn from_table(scope: Vec<Variable>, table: Table) -> Self {
        Factor { scope, table }
    }


    /// Retrieve the names of the scope, in order.
    pub fn scope(&self) -> Vec<&str> {
        self.scope.iter().map(|v| v.name()).collect()
    }

    /// Retrieve the scope along with each `Variable`'s `Domain`.
    pub fn variables(&self) -> &[Variable] {
        &self.scope
    }

    /// Look up a scope `Variable` by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.scope.iter().find(|v| v.name() == name)
    }

    /// Position of the named `Variable` in the scope
    pub fn position(&self, name: &str) -> Option<usize> {
        self.scope.iter().position(|v| v.name() == name)
    }

    /// Retrieve the `Domain` of a scope variable.
    ///
    /// # Errors
    /// * `TallyError::UnknownVariable` if `name` is not in the scope
    pub fn domain_of(&self, name: &str) -> Result<&Domain> {
        self.variable(name)
            .map(|v| v.domain())
            .ok_or_else(|| TallyError::UnknownVariable(String::from(name)))
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always `false`: every `Factor` holds at least one entry
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The underlying table, one axis per scope variable
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The single value of a `Factor` with an empty scope
    pub fn scalar_value(&self) -> Option<f64> {
        if self.scope.is_empty() {
            self.table.iter().next().cloned()
        } else {
            None
        }
    }


    /// Retrieve the value for a complete assignment over the scope of this `Factor`
    ///
    /// # Args
    /// assignment: an assignment to exactly the scope of the `Factor`
    ///
    /// # Errors
    /// * `TallyError::IncompleteAssignment`, if the assignment does not name exactly the scope
    /// * `TallyError::DomainMismatch`, if a value is outside its variable's `Domain`
    pub fn value_at(&self, assignment: &Assignment) -> Result<f64> {
        let idx = self.indices_of(assignment)?;
        Ok(self.table[IxDyn(&idx)])
    }

    /// Fetch a single value by naming some or all of the scope variables.
    ///
    /// Naming the whole scope is the same as `value_at`. Naming part of it returns the total
    /// mass of the matching assignments, e.g. `P(R = true)` from a joint over `S` and `R`.
    ///
    /// # Errors
    /// * `TallyError::UnknownVariable` if a name is not in the scope
    /// * `TallyError::DomainMismatch` if a value is outside its variable's `Domain`
    pub fn query(&self, assignment: &Assignment) -> Result<f64> {
        if let Some(name) = assignment.names().find(|n| self.position(n).is_none()) {
            return Err(TallyError::UnknownVariable(String::from(name)));
        }

        if assignment.len() == self.scope.len() {
            self.value_at(assignment)
        } else {
            self.marginal(assignment.names().collect::<VariableSet>())?.value_at(assignment)
        }
    }

    /// The (assignment, value) pairs of the table in canonical order: the first scope variable
    /// varies slowest, the last fastest, each in its `Domain`'s order.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    /// Sum of every value in the table
    pub fn sum(&self) -> f64 {
        self.table.sum()
    }

    /// `true` if the table sums to 1 within the configured tolerance
    pub fn is_normalized(&self, config: &Config) -> bool {
        (self.sum() - 1.0).abs() <= config.tolerance()
    }

    /// Compare two `Factor`s value for value, ignoring the order of their scopes.
    ///
    /// The scopes must hold the same variables with identical `Domain`s.
    pub fn approx_eq(&self, other: &Factor, tolerance: f64) -> bool {
        if self.scope.len() != other.scope.len() {
            return false;
        }

        if ! self.scope.iter().all(|v| other.variable(v.name()) == Some(v)) {
            return false;
        }

        self.entries().all(|(assignment, v)| {
            other.value_at(&assignment).map(|o| (o - v).abs() <= tolerance).unwrap_or(false)
        })
    }

    /// Find the assignment with the largest value by brute force. Ties go to the assignment
    /// that comes first in canonical order.
    pub fn max_assignment(&self) -> (Assignment, f64) {
        let mut best: Option<(Assignment, f64)> = None;
        for (assignment, v) in self.entries() {
            if best.as_ref().map_or(true, |&(_, b)| v > b) {
                best = Some((assignment, v));
            }
        }

        best.unwrap_or_else(|| (Assignment::new(), f64::NEG_INFINITY))
    }

    /// Take the natural logarithm of every value.
    ///
    /// The result is a log-domain table meant only for the `SemiRing::max_sum` operations
    /// (`combine`, `marginalize`, `eliminate`). Its values may be negative or `-inf`, so it is not
    /// a probability table: do not pass it to `joint`, `marginal` or `observe`.
    pub fn ln(&self) -> Factor {
        Factor::from_table(self.scope.clone(), self.table.mapv(f64::ln))
    }


    /// Translate a full assignment into table indices
    fn indices_of(&self, assignment: &Assignment) -> Result<Vec<usize>> {
        if assignment.len() != self.scope.len()
            || self.scope.iter().any(|v| ! assignment.contains(v.name()))
        {
            return Err(TallyError::IncompleteAssignment(
                self.scope.iter().map(|v| String::from(v.name())).collect()
            ));
        }

        self.scope.iter()
            .map(|v| {
                let value = &assignment[v.name()];
                v.domain().index_of(value).ok_or_else(|| TallyError::DomainMismatch {
                    variable: String::from(v.name()),
                    value: value.clone()
                })
            })
            .collect()
    }

}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", crate::printer::render(self))
    }
}


/// Chain-rule product of two `Factor`s. See `Factor::joint`.
pub fn joint(a: &Factor, b: &Factor) -> Result<Factor> {
    a.joint(b)
}

/// Sum out every variable of `factor` not named in `keep`. See `Factor::marginal`.
pub fn marginal<K: Into<VariableSet>>(factor: &Factor, keep: K) -> Result<Factor> {
    factor.marginal(keep)
}

/// Condition `factor` on `evidence`. See `Factor::observe`.
pub fn observe(factor: &Factor, evidence: &Assignment) -> Result<Factor> {
    factor.observe(evidence)
}


/// The table shape of a scope
pub(crate) fn shape_of(scope: &[Variable]) -> Vec<usize> {
    scope.iter().map(|v| v.cardinality()).collect()
}

/// Scope variable names must be unique
pub(crate) fn check_unique(scope: &[Variable]) -> Result<()> {
    let mut seen = IndexSet::new();
    for v in scope {
        if ! seen.insert(v.name()) {
            return Err(TallyError::DuplicateVariable(String::from(v.name())));
        }
    }
    Ok(())
}

/// Probabilities must be finite and non-negative
pub(crate) fn check_probability(value: f64) -> Result<()> {
    if ! value.is_finite() {
        Err(TallyError::InvalidProbability(value))
    } else if value < 0.0 {
        Err(TallyError::NegativeProbability(value))
    } else {
        Ok(())
    }
}
