//! Defines a `Network`, the named factors of a Bayesian network as written down by a model
//! author: one prior or conditional probability table per variable.
//!
//! The `Network` does not check the graph structure. Its joint is the chain-rule product of its
//! factors in declaration order, so factors should be declared parents first.

use crate::factor::{Factor, VariableSet};
use crate::util::{Result, TallyError};
use crate::variable::{Assignment, Variable};

use indexmap::IndexMap;
use log::debug;


/// A set of named `Factor`s, kept in declaration order.
#[derive(Clone, Debug)]
pub struct Network {

    /// The factors of the network, by name
    factors: IndexMap<String, Factor>

}

impl Network {

    /// Get a `Factor` by name
    pub fn factor(&self, name: &str) -> Option<&Factor> {
        self.factors.get(name)
    }

    /// The factor names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(|k| k.as_str())
    }

    /// Get the number of `Factor`s in the `Network`
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Every variable of the `Network`, in order of first appearance
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = Vec::new();
        for v in self.factors.values().flat_map(|f| f.variables()) {
            if ! vars.iter().any(|w| w.name() == v.name()) {
                vars.push(v);
            }
        }
        vars
    }

    /// The full joint distribution: the chain-rule product of every factor in declaration
    /// order. An empty `Network` yields the scalar 1.
    pub fn joint(&self) -> Result<Factor> {
        debug!("joint of {} factors", self.factors.len());
        let mut factors = self.factors.values();
        match factors.next() {
            None => Factor::scalar(1.0),
            Some(first) => factors.try_fold(first.clone(), |acc, f| acc.joint(f))
        }
    }

    /// Determine the probability of a full `Assignment` to the variables of the `Network`.
    ///
    /// Specifically, this computes ```P(zeta)``` by the chain rule, without building the joint.
    ///
    /// # Errors
    /// * `TallyError::UnknownVariable` if the assignment names a variable outside the `Network`
    /// * `TallyError::IncompleteAssignment` if it misses a variable of some factor
    pub fn probability(&self, assignment: &Assignment) -> Result<f64> {
        let vars = self.variables();
        if let Some(name) = assignment.names().find(|n| ! vars.iter().any(|v| v.name() == *n)) {
            return Err(TallyError::UnknownVariable(String::from(name)));
        }

        self.factors.values()
            .map(|f| f.value_at(&assignment.restrict(f.scope())))
            .fold(Ok(1.0), |acc, val| acc.and_then(|p| val.map(|v| p * v)))
    }

    /// Answer the query ```P(keep | evidence)``` by enumeration: condition the joint on the
    /// evidence, then sum out everything not in `keep`.
    pub fn query<K: Into<VariableSet>>(&self, keep: K, evidence: &Assignment) -> Result<Factor> {
        self.joint()?.observe(evidence)?.marginal(keep)
    }

    /// The most probable assignment of the unobserved variables given `evidence`, along with
    /// its posterior probability.
    pub fn most_probable(&self, evidence: &Assignment) -> Result<(Assignment, f64)> {
        Ok(self.joint()?.observe(evidence)?.max_assignment())
    }

}


/// An implementation of the [builder pattern] for creating a `Network`.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
#[derive(Debug, Default)]
pub struct NetworkBuilder {

    /// The `Factor`s added so far
    factors: IndexMap<String, Factor>,

    /// The error state of the builder
    err: Option<TallyError>

}

impl NetworkBuilder {

    /// Construct a new `NetworkBuilder` representing an empty `Network`
    pub fn new() -> Self {
        NetworkBuilder { factors: IndexMap::new(), err: None }
    }

    /// Add a named `Factor` to the `Network`.
    ///
    /// A variable shared with an earlier factor must have the same `Domain` there.
    pub fn with_factor(mut self, name: &str, factor: Factor) -> Self {
        ///////////////////////////////////////////////////////////////////////
        // 1) if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Check for error conditions
        if self.factors.contains_key(name) {
            self.err = Some(TallyError::DuplicateFactor(String::from(name)));
            return self;
        }

        for var in factor.variables() {
            let clash = self.factors.values()
                .filter_map(|f| f.variable(var.name()))
                .any(|other| other.domain() != var.domain());
            if clash {
                self.err = Some(TallyError::ScopeCollision(String::from(var.name())));
                return self;
            }
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Add to current network
        self.factors.insert(String::from(name), factor);
        self
    }

    /// Complete building the network.
    ///
    /// # Returns
    /// the `Network`, or the first error generated during the building process
    pub fn build(self) -> Result<Network> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(Network { factors: self.factors })
        }
    }

}


#[cfg(test)]
/// The burglary alarm network: a thief (D) or a storm (S) can set off an alarm (A), which the
/// security service (W) reports; the storm is also announced on the radio (R).
mod tests {
    use super::*;
    use crate::factor::FactorBuilder;
    use crate::variable::Domain;

    use test_log::test;

    fn alarm() -> Network {
        let p_thief = FactorBuilder::new()
            .with_binary("D")
            .build_with(|a| if a["D"] == true { 0.001 } else { 0.999 })
            .unwrap();

        let p_storm = FactorBuilder::new()
            .with_binary("S")
            .build_with(|a| if a["S"] == true { 0.01 } else { 0.99 })
            .unwrap();

        let cp_radio = FactorBuilder::new()
            .with_binary("S")
            .with_binary("R")
            .build_with(|a| if a["R"] == a["S"] { 0.9 } else { 0.1 })
            .unwrap();

        let cp_alarm = FactorBuilder::new()
            .with_binary("D")
            .with_binary("S")
            .with_binary("A")
            .build_with(|a| {
                let p = match (a["D"] == true, a["S"] == true) {
                    (true, true) => 0.95,
                    (true, false) => 0.9,
                    (false, true) => 0.5,
                    (false, false) => 0.01
                };
                if a["A"] == true { p } else { 1.0 - p }
            })
            .unwrap();

        let cp_service = FactorBuilder::new()
            .with_binary("A")
            .with_binary("W")
            .build_with(|a| if a["W"] == a["A"] { 0.9 } else { 0.1 })
            .unwrap();

        NetworkBuilder::new()
            .with_factor("P_Thief", p_thief)
            .with_factor("P_Storm", p_storm)
            .with_factor("CP_Radio", cp_radio)
            .with_factor("CP_Alarm", cp_alarm)
            .with_factor("CP_Service", cp_service)
            .build()
            .unwrap()
    }

    #[test]
    fn joint_is_a_distribution() {
        let net = alarm();
        let joint = net.joint().unwrap();

        assert_eq!(joint.scope(), vec!["D", "S", "R", "A", "W"]);
        assert_eq!(joint.len(), 32);
        assert!((joint.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn probability_matches_joint() {
        let net = alarm();
        let joint = net.joint().unwrap();

        for (assignment, v) in joint.entries() {
            assert!((net.probability(&assignment).unwrap() - v).abs() < 1e-15);
        }

        let zeta = assignment!{ "D" => true, "S" => false, "R" => false, "A" => true, "W" => true };
        let expected = 0.001 * 0.99 * 0.9 * 0.9 * 0.9;
        assert!((net.probability(&zeta).unwrap() - expected).abs() < 1e-15);
    }

    #[test]
    fn probability_errs() {
        let net = alarm();

        match net.probability(&assignment!{ "D" => true, "Q" => false }) {
            Err(TallyError::UnknownVariable(ref n)) if n == "Q" => (),
            other => panic!("expected UnknownVariable, got {:?}", other)
        }

        match net.probability(&assignment!{ "D" => true }) {
            Err(TallyError::IncompleteAssignment(_)) => (),
            other => panic!("expected IncompleteAssignment, got {:?}", other)
        }
    }

    #[test]
    fn query() {
        let net = alarm();

        // P(A = true) by hand
        let p_a = 0.001 * 0.01 * 0.95 + 0.001 * 0.99 * 0.9 + 0.999 * 0.01 * 0.5 + 0.999 * 0.99 * 0.01;
        let m = net.query("A", &Assignment::new()).unwrap();
        assert!((m.value_at(&assignment!{ "A" => true }).unwrap() - p_a).abs() < 1e-12);

        // P(D = true | A = true)
        let p_d_a = (0.001 * 0.01 * 0.95 + 0.001 * 0.99 * 0.9) / p_a;
        let post = net.query("D", &assignment!{ "A" => true }).unwrap();
        assert!((post.value_at(&assignment!{ "D" => true }).unwrap() - p_d_a).abs() < 1e-12);

        // hearing the storm on the radio explains the alarm away
        let explained = net.query("D", &assignment!{ "A" => true, "R" => true }).unwrap();
        assert!(
            explained.value_at(&assignment!{ "D" => true }).unwrap()
                < post.value_at(&assignment!{ "D" => true }).unwrap()
        );
    }

    #[test]
    fn independence_under_observation() {
        let net = alarm();

        // the thief and the storm are independent a priori
        let prior = net.query("S", &Assignment::new()).unwrap();
        let given_thief = net.query("S", &assignment!{ "D" => true }).unwrap();
        assert!(prior.approx_eq(&given_thief, 1e-12));
        assert!(prior.approx_eq(net.factor("P_Storm").unwrap(), 1e-12));
    }

    #[test]
    fn most_probable() {
        let net = alarm();
        let (assignment, p) = net.most_probable(&assignment!{ "W" => true }).unwrap();

        assert_eq!(assignment, assignment!{ "D" => false, "S" => false, "R" => false, "A" => false });
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn variables() {
        let net = alarm();
        let names: Vec<&str> = net.variables().iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["D", "S", "R", "A", "W"]);
    }

    #[test]
    fn empty_network() {
        let net = NetworkBuilder::new().build().unwrap();
        assert!(net.is_empty());
        assert_eq!(net.joint().unwrap().scalar_value(), Some(1.0));
    }

    #[test]
    fn builder_errs() {
        let p = FactorBuilder::new().with_binary("X").build_from_table(vec![ 0.5, 0.5 ]).unwrap();
        match NetworkBuilder::new().with_factor("P", p.clone()).with_factor("P", p.clone()).build() {
            Err(TallyError::DuplicateFactor(ref n)) if n == "P" => (),
            other => panic!("expected DuplicateFactor, got {:?}", other)
        }

        let q = FactorBuilder::new()
            .with_variable(Variable::new("X", Domain::new(vec!["a", "b"]).unwrap()))
            .build_from_table(vec![ 0.5, 0.5 ])
            .unwrap();
        match NetworkBuilder::new().with_factor("P", p).with_factor("Q", q).build() {
            Err(TallyError::ScopeCollision(ref n)) if n == "X" => (),
            other => panic!("expected ScopeCollision, got {:?}", other)
        }
    }
}
