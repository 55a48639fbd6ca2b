//! Chain-rule product of two `Factor`s.

use super::{shape_of, Factor, Table};
use crate::semiring::SemiRing;
use crate::util::{Result, TallyError};

use log::debug;
use ndarray::{Dimension, IxDyn};


impl Factor {

    /// The joint distribution over the union of both scopes, by the chain rule:
    /// `P(X, Y, Z) = P(X, Y) * P(Z | X, Y)`.
    ///
    /// The result scope is the scope of `self`, in order, followed by the variables of `other`
    /// that `self` does not have, in their order in `other`. The values do not depend on the
    /// operand order, but the column order of the result does.
    ///
    /// # Errors
    /// * `TallyError::ScopeCollision` if a shared variable has different `Domain`s
    pub fn joint(&self, other: &Factor) -> Result<Factor> {
        self.combine(other, &SemiRing::sum_product())
    }

    /// Product of this `Factor` and another under the multiplication of `ring`.
    ///
    /// Every assignment of the union scope maps to `ring.mul(self[restriction],
    /// other[restriction])`. See `joint` for the ordering of the result scope.
    pub fn combine(&self, other: &Factor, ring: &SemiRing) -> Result<Factor> {
        debug!("combine({:?}, {:?})", self.scope(), other.scope());

        // union scope, and where each variable of `other` lands in it
        let mut scope = self.scope.clone();
        let mut positions = Vec::with_capacity(other.scope.len());
        for var in other.scope.iter() {
            match scope.iter().position(|v| v.name() == var.name()) {
                Some(i) => {
                    if scope[i].domain() != var.domain() {
                        return Err(TallyError::ScopeCollision(String::from(var.name())));
                    }
                    positions.push(i);
                },
                None => {
                    positions.push(scope.len());
                    scope.push(var.clone());
                }
            }
        }

        let n = self.scope.len();
        let mut other_idx = vec![0; positions.len()];
        let mut values = Vec::with_capacity(shape_of(&scope).iter().product());

        for idx in ndarray::indices(IxDyn(&shape_of(&scope))) {
            let idx = idx.slice();
            for (k, &p) in positions.iter().enumerate() {
                other_idx[k] = idx[p];
            }
            let a = self.table[IxDyn(&idx[..n])];
            let b = other.table[IxDyn(&other_idx)];
            values.push((ring.mul)(a, b));
        }

        let table = Table::from_shape_vec(IxDyn(&shape_of(&scope)), values)?;
        debug!("  -> {:?} ({} entries)", scope.iter().map(|v| v.name()).collect::<Vec<_>>(), table.len());
        Ok(Factor::from_table(scope, table))
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::FactorBuilder;
    use crate::variable::{Domain, Variable};

    use ndarray::prelude as nd;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    fn p_s() -> Factor {
        FactorBuilder::new()
            .with_binary("S")
            .build_with(|a| if a["S"] == true { 0.01 } else { 0.99 })
            .unwrap()
    }

    fn cp_r_given_s() -> Factor {
        FactorBuilder::new()
            .with_binary("S")
            .with_binary("R")
            .build_with(|a| if a["S"] == a["R"] { 0.9 } else { 0.1 })
            .unwrap()
    }

    #[test]
    fn chain_rule() {
        let joint = p_s().joint(&cp_r_given_s()).unwrap();
        assert_eq!(joint.scope(), vec!["S", "R"]);

        let expected = vec![
            (assignment!{ "S" => true, "R" => true }, 0.009),
            (assignment!{ "S" => true, "R" => false }, 0.001),
            (assignment!{ "S" => false, "R" => true }, 0.099),
            (assignment!{ "S" => false, "R" => false }, 0.891),
        ];
        for ((a, v), (ea, ev)) in joint.entries().zip(expected) {
            assert_eq!(a, ea);
            assert!((v - ev).abs() < 1e-12, "{}: {} != {}", a, v, ev);
        }
        assert!((joint.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    /// Example taken from Koller & Friedman Figure 4.3
    fn product() {
        let a = Variable::discrete("A", 3).unwrap();
        let b = Variable::binary("B");
        let c = Variable::binary("C");

        let tbl1 = nd::Array::from_shape_vec((3, 2), vec![ 0.5, 0.8, 0.1, 0., 0.3, 0.9 ])
            .unwrap()
            .into_dyn();
        let phi1 = Factor::new(vec![ a, b.clone() ], tbl1).unwrap();

        let tbl2 = nd::Array::from_shape_vec((2, 2), vec![ 0.5, 0.7, 0.1, 0.2 ])
            .unwrap()
            .into_dyn();
        let phi2 = Factor::new(vec![ b, c ], tbl2).unwrap();

        let phi = phi1.joint(&phi2).unwrap();
        assert_eq!(phi.scope(), vec!["A", "B", "C"]);

        let expected = vec![ 0.25, 0.35, 0.08, 0.16, 0.05, 0.07, 0., 0., 0.15, 0.21, 0.09, 0.18 ];
        for ((_, v), ev) in phi.entries().zip(expected) {
            assert!((v - ev).abs() < 1e-12);
        }
    }

    #[test]
    fn operand_order_changes_columns_only() {
        let ab = p_s().joint(&cp_r_given_s()).unwrap();
        let ba = cp_r_given_s().joint(&p_s()).unwrap();

        assert_eq!(ab.scope(), vec!["S", "R"]);
        assert_eq!(ba.scope(), vec!["S", "R"]);

        let r = FactorBuilder::new().with_binary("R").build_from_table(vec![ 0.3, 0.7 ]).unwrap();
        let sr = p_s().joint(&r).unwrap();
        let rs = r.joint(&p_s()).unwrap();
        assert_eq!(sr.scope(), vec!["S", "R"]);
        assert_eq!(rs.scope(), vec!["R", "S"]);
        assert!(sr.approx_eq(&rs, 1e-12));
    }

    #[test]
    fn scalar_is_identity() {
        let joint = Factor::scalar(1.0).unwrap().joint(&p_s()).unwrap();
        assert!(joint.approx_eq(&p_s(), 0.0));
        assert_eq!(joint.scope(), vec!["S"]);
    }

    #[test]
    fn scope_collision() {
        let s = Variable::new("S", Domain::new(vec![false, true]).unwrap());
        let flipped = FactorBuilder::new().with_variable(s).build_from_table(vec![ 0.99, 0.01 ]).unwrap();

        match p_s().joint(&flipped) {
            Err(TallyError::ScopeCollision(ref n)) if n == "S" => (),
            other => panic!("expected ScopeCollision, got {:?}", other)
        }
    }

    #[test]
    fn associative() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Variable::binary("A");
        let b = Variable::discrete("B", 3).unwrap();
        let c = Variable::enumerated("C", &["x", "y"]).unwrap();
        let d = Variable::binary("D");

        let f = Factor::random(vec![ a.clone(), b.clone() ], &mut rng).unwrap();
        let g = Factor::random(vec![ b.clone(), c.clone() ], &mut rng).unwrap();
        let h = Factor::random(vec![ d, a, c ], &mut rng).unwrap();

        let left = f.joint(&g).unwrap().joint(&h).unwrap();
        let right = f.joint(&g.joint(&h).unwrap()).unwrap();
        let swapped = h.joint(&g).unwrap().joint(&f).unwrap();

        assert_eq!(left.scope(), vec!["A", "B", "C", "D"]);
        assert_eq!(swapped.scope(), vec!["D", "A", "C", "B"]);
        assert!(left.approx_eq(&right, 1e-12));
        assert!(left.approx_eq(&swapped, 1e-12));
    }

    #[test]
    fn inputs_unchanged() {
        let p = p_s();
        let cp = cp_r_given_s();
        let _ = p.joint(&cp).unwrap();
        assert!(p.approx_eq(&p_s(), 0.0));
        assert!(cp.approx_eq(&cp_r_given_s(), 0.0));
    }
}
