//! Set algebra over cell collections.
//!
//! Cell collections are plain ordered `Vec<CellId>`s. Upstream producers hand
//! out duplicate-free collections; the operations defined as sets (union and
//! symmetric difference) deduplicate regardless, while intersection and
//! difference keep the left operand's order and multiplicity.

use hexsieve_types::CellId;
use rustc_hash::FxHashSet;

fn lookup(cells: &[CellId]) -> FxHashSet<CellId> {
    cells.iter().copied().collect()
}

/// Whether `cell` is a member of `cells`.
pub fn contains(cells: &[CellId], cell: CellId) -> bool {
    cells.contains(&cell)
}

/// Cells present in both `a` and `b`, in `a`'s order.
///
/// # Examples
///
/// ```
/// use hexsieve::compute::cellset::intersect;
/// use hexsieve_types::CellId;
///
/// let a: Vec<CellId> = [3, 1, 2].map(CellId::new).to_vec();
/// let b: Vec<CellId> = [2, 3, 4].map(CellId::new).to_vec();
/// assert_eq!(intersect(&a, &b), [3, 2].map(CellId::new).to_vec());
/// ```
pub fn intersect(a: &[CellId], b: &[CellId]) -> Vec<CellId> {
    let b = lookup(b);
    a.iter().copied().filter(|cell| b.contains(cell)).collect()
}

/// Deduplicated cells of `a`, followed by the cells of `b` not already present.
pub fn union(a: &[CellId], b: &[CellId]) -> Vec<CellId> {
    let mut seen = FxHashSet::default();
    let mut result = Vec::with_capacity(a.len() + b.len());
    for &cell in a.iter().chain(b) {
        if seen.insert(cell) {
            result.push(cell);
        }
    }
    result
}

/// Cells of `a` absent from `b` ("`a` NOT `b`"), in `a`'s order.
pub fn difference(a: &[CellId], b: &[CellId]) -> Vec<CellId> {
    let b = lookup(b);
    a.iter().copied().filter(|cell| !b.contains(cell)).collect()
}

/// Cells in exactly one of `a` and `b` ("`a` XOR `b`").
///
/// Survivors of `a` come first in `a`'s order, then survivors of `b`.
pub fn symmetric_difference(a: &[CellId], b: &[CellId]) -> Vec<CellId> {
    let in_a = lookup(a);
    let in_b = lookup(b);
    let mut seen = FxHashSet::default();

    let from_a = a.iter().filter(|cell| !in_b.contains(cell));
    let from_b = b.iter().filter(|cell| !in_a.contains(cell));
    from_a
        .chain(from_b)
        .copied()
        .filter(|cell| seen.insert(*cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(ids: &[u64]) -> Vec<CellId> {
        ids.iter().copied().map(CellId::new).collect()
    }

    fn as_set(cells: &[CellId]) -> FxHashSet<CellId> {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_self_application() {
        let a = cells(&[1, 2, 3]);
        assert_eq!(union(&a, &a), a);
        assert_eq!(intersect(&a, &a), a);
        assert!(difference(&a, &a).is_empty());
        assert!(symmetric_difference(&a, &a).is_empty());
    }

    #[test]
    fn test_commutativity() {
        let a = cells(&[1, 2, 5]);
        let b = cells(&[2, 3, 4]);

        assert_eq!(as_set(&union(&a, &b)), as_set(&union(&b, &a)));
        assert_eq!(
            as_set(&symmetric_difference(&a, &b)),
            as_set(&symmetric_difference(&b, &a))
        );
        assert_ne!(difference(&a, &b), difference(&b, &a));
    }

    #[test]
    fn test_union_order_and_dedup() {
        let a = cells(&[3, 1, 3]);
        let b = cells(&[1, 4, 4, 2]);
        assert_eq!(union(&a, &b), cells(&[3, 1, 4, 2]));
    }

    #[test]
    fn test_intersect_preserves_left_order() {
        let a = cells(&[5, 4, 3, 2, 1]);
        let b = cells(&[1, 3, 5]);
        assert_eq!(intersect(&a, &b), cells(&[5, 3, 1]));
    }

    #[test]
    fn test_difference() {
        let a = cells(&[1, 2, 3, 4]);
        let b = cells(&[2, 3]);
        assert_eq!(difference(&a, &b), cells(&[1, 4]));
        assert_eq!(difference(&b, &a), cells(&[]));
    }

    #[test]
    fn test_symmetric_difference() {
        let a = cells(&[1, 2]);
        let b = cells(&[2, 3]);
        assert_eq!(symmetric_difference(&a, &b), cells(&[1, 3]));
        assert_eq!(symmetric_difference(&a, &[]), a);
    }

    #[test]
    fn test_double_difference_is_intersection() {
        let universe = cells(&[1, 2, 3, 4, 5, 6]);
        let a = cells(&[2, 4, 6, 8]);
        assert_eq!(
            difference(&universe, &difference(&universe, &a)),
            intersect(&universe, &a)
        );
    }

    #[test]
    fn test_contains() {
        let a = cells(&[10, 20]);
        assert!(contains(&a, CellId::new(20)));
        assert!(!contains(&a, CellId::new(30)));
    }

    #[test]
    fn test_empty_operands() {
        let a = cells(&[1, 2]);
        assert_eq!(union(&[], &a), a);
        assert!(intersect(&a, &[]).is_empty());
        assert_eq!(difference(&a, &[]), a);
        assert!(difference(&[], &a).is_empty());
    }
}
