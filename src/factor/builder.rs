//! Construction of `Factor`s from a generating rule or from literal table data.

use super::{check_probability, check_unique, shape_of, Factor, Table};
use crate::util::{Result, TallyError};
use crate::variable::{Assignment, Domain, Value, Variable};
use super::entries::all_assignments;

use log::{debug, trace};
use ndarray::IxDyn;


/// An implementation of the [builder pattern] for creating a `Factor`.
///
/// Variables are declared in scope order. The first error encountered while declaring them is
/// held by the builder and reported when the `Factor` is built.
///
/// ```
/// # #[macro_use] extern crate tally;
/// # fn main() -> tally::Result<()> {
/// use tally::FactorBuilder;
///
/// // P(R | S)
/// let cp_r_given_s = FactorBuilder::new()
///     .with_binary("S")
///     .with_binary("R")
///     .build_with(|a| match (a["S"] == true, a["R"] == true) {
///         (true, true) => 0.9,
///         (true, false) => 0.1,
///         (false, true) => 0.1,
///         (false, false) => 0.9,
///     })?;
///
/// assert_eq!(cp_r_given_s.value_at(&assignment!{ "S" => false, "R" => true })?, 0.1);
/// # Ok(())
/// # }
/// ```
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
#[derive(Debug, Default)]
pub struct FactorBuilder {

    /// The declared scope
    scope: Vec<Variable>,

    /// The error state of the builder
    err: Option<TallyError>

}

impl FactorBuilder {

    /// Construct a new `FactorBuilder` with an empty scope
    pub fn new() -> Self {
        FactorBuilder { scope: Vec::new(), err: None }
    }

    /// Append a `Variable` to the scope
    pub fn with_variable(mut self, var: Variable) -> Self {
        if self.err.is_none() {
            if self.scope.iter().any(|v| v.name() == var.name()) {
                self.err = Some(TallyError::DuplicateVariable(String::from(var.name())));
            } else {
                self.scope.push(var);
            }
        }
        self
    }

    /// Append a variable with the given ordered values to the scope
    pub fn with_domain<I, V>(self, name: &str, values: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        match Domain::new(values) {
            Ok(domain) => self.with_variable(Variable::new(name, domain)),
            Err(e) => self.fail(e)
        }
    }

    /// Append a variable with the domain `[true, false]` to the scope
    pub fn with_binary(self, name: &str) -> Self {
        self.with_variable(Variable::binary(name))
    }

    /// The scope declared so far
    pub fn variables(&self) -> &[Variable] {
        &self.scope
    }

    /// Build the `Factor` by evaluating `rule` once for every assignment of the scope, in
    /// canonical order.
    ///
    /// # Errors
    /// * any error latched while declaring the scope
    /// * `TallyError::NegativeProbability` if the rule returns a negative value
    /// * `TallyError::InvalidProbability` if the rule returns NaN or an infinity
    pub fn build_with<F>(self, rule: F) -> Result<Factor>
        where F: Fn(&Assignment) -> f64
    {
        let scope = self.finish()?;
        debug!("build_with({:?})", scope.iter().map(|v| v.name()).collect::<Vec<_>>());

        let mut values = Vec::new();
        for assignment in all_assignments(&scope) {
            let v = rule(&assignment);
            trace!("  {} -> {}", assignment, v);
            check_probability(v)?;
            values.push(v);
        }

        let table = Table::from_shape_vec(IxDyn(&shape_of(&scope)), values)?;
        Ok(Factor::from_table(scope, table))
    }

    /// Build the `Factor` from literal values listed in canonical order.
    ///
    /// # Errors
    /// * any error latched while declaring the scope
    /// * `TallyError::Shape` if the number of values does not match the scope
    /// * `TallyError::NegativeProbability` / `TallyError::InvalidProbability` for bad values
    pub fn build_from_table(self, values: Vec<f64>) -> Result<Factor> {
        let scope = self.finish()?;
        debug!("build_from_table({:?})", scope.iter().map(|v| v.name()).collect::<Vec<_>>());

        for &v in values.iter() {
            check_probability(v)?;
        }

        let table = Table::from_shape_vec(IxDyn(&shape_of(&scope)), values)?;
        Ok(Factor::from_table(scope, table))
    }

    fn fail(mut self, err: TallyError) -> Self {
        if self.err.is_none() {
            self.err = Some(err);
        }
        self
    }

    fn finish(self) -> Result<Vec<Variable>> {
        match self.err {
            Some(e) => Err(e),
            None => {
                check_unique(&self.scope)?;
                Ok(self.scope)
            }
        }
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use test_log::test;

    #[test]
    fn rule() {
        let f = FactorBuilder::new()
            .with_binary("S")
            .build_with(|a| if a["S"] == true { 0.1 } else { 0.9 })
            .unwrap();

        assert_eq!(f.scope(), vec!["S"]);
        assert_eq!(f.value_at(&assignment!{ "S" => true }).unwrap(), 0.1);
        assert_eq!(f.value_at(&assignment!{ "S" => false }).unwrap(), 0.9);
    }

    #[test]
    fn rule_called_once_per_assignment_in_order() {
        let calls = Cell::new(0);
        let f = FactorBuilder::new()
            .with_domain("G", vec!["low", "mid", "high"])
            .with_binary("L")
            .build_with(|_| {
                calls.set(calls.get() + 1);
                calls.get() as f64
            })
            .unwrap();

        assert_eq!(calls.get(), 6);
        let values: Vec<f64> = f.entries().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1., 2., 3., 4., 5., 6.]);
        assert_eq!(f.value_at(&assignment!{ "G" => "mid", "L" => false }).unwrap(), 4.);
    }

    #[test]
    fn literal_table() {
        let f = FactorBuilder::new()
            .with_binary("A")
            .with_domain("B", vec![1, 2, 3])
            .build_from_table(vec![ 0.1, 0.2, 0.3, 0.4, 0.5, 0.6 ])
            .unwrap();

        assert_eq!(f.value_at(&assignment!{ "A" => false, "B" => 1 }).unwrap(), 0.4);
        assert_eq!(f.variables()[1].domain(), &Domain::new(vec![1, 2, 3]).unwrap());
    }

    #[test]
    fn empty_scope() {
        let f = FactorBuilder::new().build_with(|a| { assert!(a.is_empty()); 1.0 }).unwrap();
        assert_eq!(f.scalar_value(), Some(1.0));
    }

    #[test]
    fn negative_probability() {
        let f = FactorBuilder::new()
            .with_binary("S")
            .build_with(|a| if a["S"] == true { -0.1 } else { 1.1 });

        match f {
            Err(TallyError::NegativeProbability(v)) => assert_eq!(v, -0.1),
            other => panic!("expected NegativeProbability, got {:?}", other)
        }
    }

    #[test]
    fn invalid_probability() {
        match FactorBuilder::new().with_binary("S").build_with(|_| f64::INFINITY) {
            Err(TallyError::InvalidProbability(_)) => (),
            other => panic!("expected InvalidProbability, got {:?}", other)
        }
    }

    #[test]
    fn latched_errors() {
        match FactorBuilder::new().with_binary("S").with_binary("S").build_with(|_| 0.5) {
            Err(TallyError::DuplicateVariable(ref n)) if n == "S" => (),
            other => panic!("expected DuplicateVariable, got {:?}", other)
        }

        // the first error wins
        let builder = FactorBuilder::new()
            .with_domain("A", vec!["x", "x"])
            .with_binary("B")
            .with_binary("B");
        match builder.build_from_table(vec![]) {
            Err(TallyError::InvalidDomain(_)) => (),
            other => panic!("expected InvalidDomain, got {:?}", other)
        }
    }

    #[test]
    fn wrong_table_length() {
        match FactorBuilder::new().with_binary("S").build_from_table(vec![ 1.0 ]) {
            Err(TallyError::Shape(_)) => (),
            other => panic!("expected Shape, got {:?}", other)
        }
    }
}
