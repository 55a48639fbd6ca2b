//! The commutative semiring a `Factor` algebra is computed in.
//!
//! Joint, marginal and observe are the sum-product instances of the generic `combine`,
//! `marginalize` and `eliminate` operations. Swapping the ring turns the same enumeration into a
//! most-probable-assignment computation.

/// A commutative semiring, called ring for brevity, together with the inverse of its
/// multiplication (used for normalization).
#[derive(Clone, Copy, Debug)]
pub struct SemiRing {
    /// Combines the values of assignments that are summed out
    pub add: fn(f64, f64) -> f64,

    /// Identity of `add`; also the value of an impossible event
    pub zero: f64,

    /// Combines the values of aligned assignments of two factors
    pub mul: fn(f64, f64) -> f64,

    /// Inverse of `mul`
    pub div: fn(f64, f64) -> f64,

    /// Identity of `mul`
    pub one: f64
}

impl SemiRing {

    /// Ordinary probabilities: `(+, 0, *, /, 1)`
    pub fn sum_product() -> Self {
        SemiRing {
            add: |a, b| a + b,
            zero: 0.0,
            mul: |a, b| a * b,
            div: |a, b| a / b,
            one: 1.0
        }
    }

    /// Most probable assignment over probabilities: `(max, 0, *, /, 1)`
    pub fn max_product() -> Self {
        SemiRing {
            add: f64::max,
            zero: 0.0,
            mul: |a, b| a * b,
            div: |a, b| a / b,
            one: 1.0
        }
    }

    /// Most probable assignment over log probabilities: `(max, -inf, +, -, 0)`
    pub fn max_sum() -> Self {
        SemiRing {
            add: f64::max,
            zero: f64::NEG_INFINITY,
            mul: |a, b| a + b,
            div: |a, b| a - b,
            one: 0.0
        }
    }

}

impl Default for SemiRing {
    fn default() -> Self {
        SemiRing::sum_product()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identities() {
        for ring in &[SemiRing::sum_product(), SemiRing::max_product(), SemiRing::max_sum()] {
            for &x in &[0.0, 0.25, 1.0] {
                assert_eq!((ring.add)(ring.zero, x), x);
                assert_eq!((ring.mul)(ring.one, x), x);
                assert_eq!((ring.div)((ring.mul)(x, 0.5), 0.5), x);
            }
        }
    }
}
