//! Pixel processing orders
//!
//! The union-find builder consumes a permutation of all pixel indices; the
//! direction of that permutation is the only difference between building a
//! max-tree and a min-tree. Both orders are stable: pixels of equal weight
//! keep their index order, so level-root detection is reproducible.

use comptree_core::Weight;

/// Pixel indices ordered by non-decreasing weight (max-tree order)
pub fn sort_non_decreasing<T: Weight>(weights: &[T]) -> Vec<u32> {
    let mut order: Vec<u32> = (0..weights.len() as u32).collect();
    order.sort_by(|&a, &b| weights[a as usize].total_cmp(&weights[b as usize]));
    order
}

/// Pixel indices ordered by non-increasing weight (min-tree order)
pub fn sort_non_increasing<T: Weight>(weights: &[T]) -> Vec<u32> {
    let mut order: Vec<u32> = (0..weights.len() as u32).collect();
    order.sort_by(|&a, &b| weights[b as usize].total_cmp(&weights[a as usize]));
    order
}
