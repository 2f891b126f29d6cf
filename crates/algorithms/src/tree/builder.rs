//! Union-find construction of the canonical parent map
//!
//! Processing pixels in the given order, every pixel adopts the union-find
//! roots of its already-processed neighbours. A second pass rewrites each
//! parent pointer to the level root of the pointed-to component, so a single
//! hop from any pixel lands on the representative of its own component (or,
//! for a level root, on the representative of the enclosing component).
//! Tree construction relies on that one-hop guarantee and performs no
//! further path compression.

use std::cmp::Ordering;

use comptree_core::error::{Error, Result};
use comptree_core::grid::UNDEFINED_INDEX;
use comptree_core::{Adjacency, Weight};

/// Output of the union-find builder: the processing order and the fully
/// canonicalized parent map. Consumed by
/// [`ComponentTree::from_builder`](super::ComponentTree::from_builder).
#[derive(Debug, Clone)]
pub struct BuilderResult {
    /// Permutation of all pixel indices, in processing order
    pub order: Vec<u32>,
    /// For every pixel, its canonical parent pixel; the single tree-root
    /// pixel maps to itself
    pub parent: Vec<u32>,
}

/// Build the canonical parent map for `weights` processed in `order`.
///
/// `order` must be a permutation of all pixel indices; connected pixels of
/// equal weight must be ordered consistently (any stable order works, see
/// [`sort_non_decreasing`](super::sort_non_decreasing)). The adjacency must
/// cover the same domain as `weights`.
pub fn canonical_parents<T: Weight>(
    weights: &[T],
    adjacency: &Adjacency,
    order: Vec<u32>,
) -> Result<BuilderResult> {
    let n = weights.len();
    if n == 0 {
        return Err(Error::EmptyDomain);
    }
    if n >= u32::MAX as usize {
        return Err(Error::DomainTooLarge { points: n });
    }
    if adjacency.domain().point_count() != n {
        return Err(Error::SizeMismatch {
            expected: n,
            actual: adjacency.domain().point_count(),
        });
    }
    if order.len() != n {
        return Err(Error::SizeMismatch {
            expected: n,
            actual: order.len(),
        });
    }

    let mut parent: Vec<u32> = vec![UNDEFINED_INDEX; n];
    let mut zpar: Vec<u32> = vec![UNDEFINED_INDEX; n];
    let mut processed = vec![false; n];

    for &p in &order {
        let pu = p as usize;
        if pu >= n {
            return Err(Error::IndexOutOfBounds { index: p, len: n });
        }
        if processed[pu] {
            return Err(Error::Other(format!(
                "processing order is not a permutation: pixel {p} occurs twice"
            )));
        }
        parent[pu] = p;
        zpar[pu] = p;
        for nbr in adjacency.neighbours(p) {
            if !processed[nbr as usize] {
                continue;
            }
            let root = find_root(&mut zpar, nbr);
            if root != p {
                zpar[root as usize] = p;
                parent[root as usize] = p;
            }
        }
        processed[pu] = true;
    }

    // Canonicalize in reverse processing order: a pixel's parent was
    // processed after it, so the parent's own pointer is already final.
    for &p in order.iter().rev() {
        let q = parent[p as usize];
        let qq = parent[q as usize];
        if weights[qq as usize].total_cmp(&weights[q as usize]) == Ordering::Equal {
            parent[p as usize] = qq;
        }
    }

    Ok(BuilderResult { order, parent })
}

/// Root of `node`'s union-find component, with two-pass path compression
fn find_root(zpar: &mut [u32], node: u32) -> u32 {
    let mut root = node;
    while zpar[root as usize] != root {
        root = zpar[root as usize];
    }
    let mut node = node;
    while zpar[node as usize] != node {
        let next = zpar[node as usize];
        zpar[node as usize] = root;
        node = next;
    }
    root
}
