//! Enumeration of assignments in canonical order.
//!
//! Canonical order is row-major over the scope: the first variable varies slowest and the last
//! varies fastest, each variable walking its `Domain` in declared order. This is exactly the
//! logical iteration order of the `Factor`'s table.

use super::{shape_of, Factor};
use crate::variable::{Assignment, Variable};

use ndarray::iter::IndexedIter;
use ndarray::{Dimension, IxDyn};


/// Lazy iterator over the (assignment, value) pairs of a `Factor`.
///
/// Calling `Factor::entries` again starts a fresh pass.
pub struct Entries<'a> {
    scope: &'a [Variable],
    iter: IndexedIter<'a, f64, IxDyn>
}

impl<'a> Entries<'a> {
    pub(crate) fn new(factor: &'a Factor) -> Self {
        Entries {
            scope: &factor.scope,
            iter: factor.table.indexed_iter()
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Assignment, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let scope = self.scope;
        self.iter.next().map(|(idx, &v)| (assignment_at(scope, idx.slice()), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> ExactSizeIterator for Entries<'a> {}


/// Every assignment of `scope`, in canonical order.
///
/// An empty scope has exactly one (empty) assignment.
pub fn all_assignments(scope: &[Variable]) -> impl Iterator<Item = Assignment> + '_ {
    ndarray::indices(IxDyn(&shape_of(scope)))
        .into_iter()
        .map(move |idx| assignment_at(scope, idx.slice()))
}


/// Build the `Assignment` that corresponds to a table index
pub(crate) fn assignment_at(scope: &[Variable], idx: &[usize]) -> Assignment {
    scope.iter()
         .zip(idx.iter())
         .filter_map(|(v, &i)| v.domain().value(i).map(|value| (v.name(), value.clone())))
         .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn all_assignments_order() {
        let scope = vec![ Variable::binary("A"), Variable::enumerated("B", &["x", "y", "z"]).unwrap() ];
        let assignments: Vec<Assignment> = all_assignments(&scope).collect();

        assert_eq!(assignments.len(), 6);
        assert_eq!(assignments[0], assignment!{ "A" => true, "B" => "x" });
        assert_eq!(assignments[1], assignment!{ "A" => true, "B" => "y" });
        assert_eq!(assignments[3], assignment!{ "A" => false, "B" => "x" });
        assert_eq!(assignments[5], assignment!{ "A" => false, "B" => "z" });

        // names come out in scope order
        assert_eq!(assignments[4].names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn all_assignments_empty_scope() {
        let assignments: Vec<Assignment> = all_assignments(&[]).collect();
        assert_eq!(assignments, vec![Assignment::new()]);
    }
}
