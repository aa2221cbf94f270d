//! Pure diff computation between current and desired assignment sets.
//!
//! Reconciliation works from a single point-in-time snapshot: the set of
//! currently active professors and the set of professors with any
//! assignment row (active or inactive). The diff splits the desired set
//! into additions (fresh creates vs. reactivations of inactive rows),
//! removals, and unchanged members. No I/O happens here; the engine
//! applies the result.

use std::collections::HashSet;
use uuid::Uuid;

/// The minimal set of operations moving the active assignment set from
/// `current` to `desired`.
///
/// Invariants (for any inputs with `current ⊆ all_existing`):
/// - `to_create ∪ to_reactivate ∪ to_unassign ∪ unchanged` equals
///   `desired ∪ current`
/// - the four sets are pairwise disjoint
/// - processing order within each set does not affect the final state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentDiff {
    /// Desired professors with no assignment row at all: insert fresh rows.
    pub to_create: Vec<Uuid>,
    /// Desired professors with an inactive row: flip it back to active.
    pub to_reactivate: Vec<Uuid>,
    /// Active professors missing from the desired set: revoke.
    pub to_unassign: Vec<Uuid>,
    /// Professors active now and still desired: no mutation.
    pub unchanged: Vec<Uuid>,
}

impl AssignmentDiff {
    /// Compute the diff from snapshot state.
    ///
    /// * `current` - professor ids with an active assignment
    /// * `all_existing` - professor ids with any assignment row
    /// * `desired` - the caller-supplied target set
    #[must_use]
    pub fn compute(
        current: &HashSet<Uuid>,
        all_existing: &HashSet<Uuid>,
        desired: &HashSet<Uuid>,
    ) -> Self {
        let mut diff = Self::default();

        for &id in desired {
            if current.contains(&id) {
                diff.unchanged.push(id);
            } else if all_existing.contains(&id) {
                diff.to_reactivate.push(id);
            } else {
                diff.to_create.push(id);
            }
        }

        for &id in current {
            if !desired.contains(&id) {
                diff.to_unassign.push(id);
            }
        }

        diff
    }

    /// Number of professors gaining the module (creates + reactivations).
    #[must_use]
    pub fn to_assign_len(&self) -> usize {
        self.to_create.len() + self.to_reactivate.len()
    }

    /// Whether the diff requires no mutation at all.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_reactivate.is_empty() && self.to_unassign.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[Uuid]) -> HashSet<Uuid> {
        ids.iter().copied().collect()
    }

    fn diff_union(diff: &AssignmentDiff) -> HashSet<Uuid> {
        diff.to_create
            .iter()
            .chain(&diff.to_reactivate)
            .chain(&diff.to_unassign)
            .chain(&diff.unchanged)
            .copied()
            .collect()
    }

    #[test]
    fn test_scenario_current_ab_desired_bc() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let current = set(&[a, b]);
        let all_existing = set(&[a, b]);
        let desired = set(&[b, c]);

        let diff = AssignmentDiff::compute(&current, &all_existing, &desired);

        assert_eq!(diff.to_create, vec![c]);
        assert!(diff.to_reactivate.is_empty());
        assert_eq!(diff.to_unassign, vec![a]);
        assert_eq!(diff.unchanged, vec![b]);
    }

    #[test]
    fn test_empty_current_empty_desired_is_noop() {
        let diff = AssignmentDiff::compute(&set(&[]), &set(&[]), &set(&[]));

        assert!(diff.is_noop());
        assert!(diff.unchanged.is_empty());
        assert_eq!(diff.to_assign_len(), 0);
    }

    #[test]
    fn test_inactive_row_is_reactivated_not_created() {
        let a = Uuid::new_v4();

        // `a` has an inactive row: in all_existing but not current.
        let diff = AssignmentDiff::compute(&set(&[]), &set(&[a]), &set(&[a]));

        assert!(diff.to_create.is_empty());
        assert_eq!(diff.to_reactivate, vec![a]);
        assert!(diff.to_unassign.is_empty());
    }

    #[test]
    fn test_identical_sets_are_all_unchanged() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let current = set(&[a, b]);

        let diff = AssignmentDiff::compute(&current, &current, &current.clone());

        assert!(diff.is_noop());
        assert_eq!(diff.unchanged.len(), 2);
    }

    #[test]
    fn test_partition_completeness_and_disjointness() {
        // Exercise a mix of every membership combination.
        let fresh = Uuid::new_v4(); // desired only
        let inactive = Uuid::new_v4(); // desired, inactive row
        let kept = Uuid::new_v4(); // desired and active
        let dropped = Uuid::new_v4(); // active only
        let stale = Uuid::new_v4(); // inactive row, not desired

        let current = set(&[kept, dropped]);
        let all_existing = set(&[kept, dropped, inactive, stale]);
        let desired = set(&[fresh, inactive, kept]);

        let diff = AssignmentDiff::compute(&current, &all_existing, &desired);

        // Union equals desired ∪ current; stale inactive rows are untouched.
        let expected: HashSet<Uuid> = desired.union(&current).copied().collect();
        assert_eq!(diff_union(&diff), expected);

        // Pairwise disjoint.
        let total = diff.to_create.len()
            + diff.to_reactivate.len()
            + diff.to_unassign.len()
            + diff.unchanged.len();
        assert_eq!(total, diff_union(&diff).len());

        assert_eq!(diff.to_create, vec![fresh]);
        assert_eq!(diff.to_reactivate, vec![inactive]);
        assert_eq!(diff.to_unassign, vec![dropped]);
        assert_eq!(diff.unchanged, vec![kept]);
    }

    #[test]
    fn test_unassign_everything() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let diff = AssignmentDiff::compute(&set(&[a, b]), &set(&[a, b]), &set(&[]));

        assert_eq!(diff.to_unassign.len(), 2);
        assert_eq!(diff.to_assign_len(), 0);
        assert!(!diff.is_noop());
    }
}
