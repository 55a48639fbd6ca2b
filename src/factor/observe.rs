//! Conditioning a `Factor` on observed evidence.

use super::{shape_of, Factor, Table, VariableSet};
use crate::semiring::SemiRing;
use crate::util::{Result, TallyError};
use crate::variable::{Assignment, Variable};

use log::debug;
use ndarray::IxDyn;


impl Factor {

    /// The posterior `P(remaining | evidence) = P(remaining, evidence) / P(evidence)`.
    ///
    /// The evidence variables are removed from the scope; the remaining variables keep their
    /// order and their values are renormalized to sum to 1.
    ///
    /// # Errors
    /// * `TallyError::UnknownVariable` if an evidence variable is not in the scope
    /// * `TallyError::DomainMismatch` if an evidence value is outside its `Domain`
    /// * `TallyError::ZeroEvidence` if the evidence has zero probability under this `Factor`
    pub fn observe(&self, evidence: &Assignment) -> Result<Factor> {
        self.eliminate(evidence, &SemiRing::sum_product(), true)
    }

    /// Restrict the `Factor` to the assignments that agree with `evidence`, without
    /// renormalizing.
    ///
    /// Defined in Koller & Friedman 4.2.3
    pub fn reduce(&self, evidence: &Assignment) -> Result<Factor> {
        self.eliminate(evidence, &SemiRing::sum_product(), false)
    }

    /// Scale the table so it sums to 1.
    ///
    /// # Errors
    /// * `TallyError::ZeroEvidence` if every value is 0
    pub fn normalize(&self) -> Result<Factor> {
        self.observe(&Assignment::new())
    }

    /// Fix the evidence variables to their observed values and drop them from the scope. With
    /// `normalize`, divide the result by its total under `ring`.
    pub fn eliminate(&self, evidence: &Assignment, ring: &SemiRing, normalize: bool) -> Result<Factor> {
        debug!("eliminate({:?}, {}, normalize = {})", self.scope(), evidence, normalize);

        // table index fixed by the evidence, per scope position
        let mut fixed: Vec<Option<usize>> = vec![None; self.scope.len()];
        for (name, value) in evidence.iter() {
            let i = self.position(name)
                .ok_or_else(|| TallyError::UnknownVariable(String::from(name)))?;
            let j = self.scope[i].domain()
                .index_of(value)
                .ok_or_else(|| TallyError::DomainMismatch {
                    variable: String::from(name),
                    value: value.clone()
                })?;
            fixed[i] = Some(j);
        }

        let scope: Vec<Variable> = self.scope.iter()
            .zip(fixed.iter())
            .filter(|&(_, f)| f.is_none())
            .map(|(v, _)| v.clone())
            .collect();

        // a row-major walk that skips non-matching entries leaves the rest in row-major order
        let values: Vec<f64> = self.table.indexed_iter()
            .filter(|(idx, _)| {
                fixed.iter().enumerate().all(|(i, f)| f.map_or(true, |j| idx[i] == j))
            })
            .map(|(_, &v)| v)
            .collect();

        let table = Table::from_shape_vec(IxDyn(&shape_of(&scope)), values)?;
        let restricted = Factor::from_table(scope, table);

        if ! normalize {
            return Ok(restricted);
        }

        let z = match restricted.marginalize(VariableSet::new(), ring)?.scalar_value() {
            Some(z) if z != ring.zero && ! z.is_nan() => z,
            _ => return Err(TallyError::ZeroEvidence)
        };
        debug!("  normalizing constant {}", z);

        let table = restricted.table.mapv(|v| (ring.div)(v, z));
        Ok(Factor::from_table(restricted.scope, table))
    }

}
