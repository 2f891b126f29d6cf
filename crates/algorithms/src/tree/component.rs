//! The component tree: an arena of nodes over a canonical pixel partition
//!
//! Nodes live in a flat arena and refer to each other by dense integer id;
//! the tree owns the arena and a canonical map (`cmap`) giving every pixel
//! the id of its owning node. Three invariants hold after every public
//! operation:
//!
//! 1. node 0 is the unique root; every other node has a parent with a
//!    strictly smaller id (reverse-id iteration is a bottom-up traversal);
//! 2. the canonical-pixel lists of all nodes partition the pixel range, and
//!    `cmap` agrees with that partition;
//! 3. `cmap` lookups are O(1): one array read per pixel.

use std::collections::VecDeque;
use std::mem;

use comptree_core::error::{Error, Result};
use comptree_core::grid::UNDEFINED_INDEX;
use comptree_core::{Adjacency, Connectivity, Domain, Image, Weight};

use super::builder::{canonical_parents, BuilderResult};
use super::order::{sort_non_decreasing, sort_non_increasing};

/// One vertex of a [`ComponentTree`]: a maximal connected pixel set at a
/// threshold level.
///
/// `cnps` holds the node's *canonical* pixels: those owned directly rather
/// than through a descendant. Parent and child links are arena ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T: Weight> {
    id: u32,
    level: T,
    cnps: Vec<u32>,
    parent: Option<u32>,
    children: Vec<u32>,
}

impl<T: Weight> Node<T> {
    /// Arena id; doubles as the node's slot index
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Threshold level of the component
    pub fn level(&self) -> T {
        self.level
    }

    /// Canonical pixels, in insertion order
    pub fn cnps(&self) -> &[u32] {
        &self.cnps
    }

    /// Number of canonical pixels
    pub fn cnp_count(&self) -> usize {
        self.cnps.len()
    }

    /// Parent id, `None` only for the root
    pub fn parent(&self) -> Option<u32> {
        self.parent
    }

    /// Child ids, in insertion order
    pub fn children(&self) -> &[u32] {
        &self.children
    }
}

/// A max-tree / min-tree over a scalar image.
///
/// Build one with [`build_max_tree`] / [`build_min_tree`], or from a
/// precomputed [`BuilderResult`] with [`ComponentTree::from_builder`].
#[derive(Debug, Clone)]
pub struct ComponentTree<T: Weight> {
    nodes: Vec<Node<T>>,
    cmap: Vec<u32>,
}

impl<T: Weight> ComponentTree<T> {
    /// Id of the root node, before and after any filtering
    pub const ROOT: u32 = 0;

    /// Compress a canonical parent map into the node arena.
    ///
    /// Scans the processing order once to find the level roots (pixels whose
    /// parent sits at a different level, plus the single self-parented root
    /// pixel), then materializes one node per level root and folds every
    /// remaining pixel into its owning node by a single `cmap` hop. The
    /// one-hop lookups only resolve when `result.parent` is fully
    /// canonicalized, as [`canonical_parents`] guarantees; a map that breaks
    /// that contract is rejected with [`Error::NotCanonical`].
    pub fn from_builder(weights: &[T], result: &BuilderResult) -> Result<Self> {
        let n = weights.len();
        if n == 0 {
            return Err(Error::EmptyDomain);
        }
        if n >= u32::MAX as usize {
            return Err(Error::DomainTooLarge { points: n });
        }
        if result.order.len() != n {
            return Err(Error::SizeMismatch {
                expected: n,
                actual: result.order.len(),
            });
        }
        if result.parent.len() != n {
            return Err(Error::SizeMismatch {
                expected: n,
                actual: result.parent.len(),
            });
        }

        let mut level_roots = Vec::new();
        for &p in &result.order {
            if p as usize >= n {
                return Err(Error::IndexOutOfBounds { index: p, len: n });
            }
            let q = result.parent[p as usize];
            if q as usize >= n {
                return Err(Error::IndexOutOfBounds { index: q, len: n });
            }
            if q == p
                || weights[q as usize].total_cmp(&weights[p as usize]) != std::cmp::Ordering::Equal
            {
                level_roots.push(p);
            }
        }

        // the last level root in processing order is the self-parented
        // extremal pixel: it becomes the root node
        let root_pixel = match level_roots.last() {
            Some(&p) => p,
            None => return Err(Error::NotCanonical { pixel: result.order[0] }),
        };

        let mut cmap = vec![UNDEFINED_INDEX; n];
        let mut nodes = Vec::with_capacity(level_roots.len());
        nodes.push(Node {
            id: Self::ROOT,
            level: weights[root_pixel as usize],
            cnps: vec![root_pixel],
            parent: None,
            children: Vec::new(),
        });
        cmap[root_pixel as usize] = Self::ROOT;

        // walk the remaining level roots from the enclosing components
        // inwards; each parent lookup is already resolved
        for (k, &p) in level_roots.iter().rev().skip(1).enumerate() {
            let id = k as u32 + 1;
            if cmap[p as usize] != UNDEFINED_INDEX {
                return Err(Error::Other(format!(
                    "processing order is not a permutation: pixel {p} occurs twice"
                )));
            }
            let parent_id = cmap[result.parent[p as usize] as usize];
            if parent_id == UNDEFINED_INDEX {
                return Err(Error::NotCanonical { pixel: p });
            }
            nodes.push(Node {
                id,
                level: weights[p as usize],
                cnps: vec![p],
                parent: Some(parent_id),
                children: Vec::new(),
            });
            nodes[parent_id as usize].children.push(id);
            cmap[p as usize] = id;
        }

        for p in 0..n as u32 {
            if cmap[p as usize] != UNDEFINED_INDEX {
                continue;
            }
            let owner = cmap[result.parent[p as usize] as usize];
            if owner == UNDEFINED_INDEX {
                return Err(Error::NotCanonical { pixel: p });
            }
            cmap[p as usize] = owner;
            nodes[owner as usize].cnps.push(p);
        }

        Ok(Self { nodes, cmap })
    }

    /// Number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of pixels in the underlying domain
    pub fn pixel_count(&self) -> usize {
        self.cmap.len()
    }

    /// The root node
    pub fn root(&self) -> &Node<T> {
        &self.nodes[Self::ROOT as usize]
    }

    /// Node by arena id
    pub fn node(&self, id: u32) -> Result<&Node<T>> {
        self.nodes
            .get(id as usize)
            .ok_or(Error::NodeOutOfBounds {
                id,
                count: self.nodes.len(),
            })
    }

    /// The node owning the pixel at linear index `idx`
    pub fn node_of_pixel(&self, idx: u32) -> Result<&Node<T>> {
        let owner = self
            .cmap
            .get(idx as usize)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index: idx,
                len: self.cmap.len(),
            })?;
        Ok(&self.nodes[owner as usize])
    }

    /// Visit all nodes in reverse id order: every descendant strictly before
    /// its ancestor. This is the bottom-up order for aggregating a per-node
    /// statistic towards the root.
    pub fn traverse(&self, mut visit: impl FnMut(&Node<T>)) {
        for node in self.nodes.iter().rev() {
            visit(node);
        }
    }

    /// Visit all nodes breadth-first from the root: every ancestor strictly
    /// before its descendants.
    pub fn traverse_by_level(&self, mut visit: impl FnMut(&Node<T>)) {
        let mut queue = VecDeque::with_capacity(self.nodes.len());
        queue.push_back(Self::ROOT);
        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id as usize];
            visit(node);
            queue.extend(node.children.iter().copied());
        }
    }

    /// All pixels of the component rooted at `id`: the node's canonical
    /// pixels plus, transitively, its descendants'. Iterative, so depth is
    /// bounded regardless of the image's dynamic range.
    pub fn reconstruct_node(&self, id: u32) -> Result<Vec<u32>> {
        self.node(id)?;
        let mut pixels = Vec::new();
        let mut stack = vec![id];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i as usize];
            pixels.extend_from_slice(&node.cnps);
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(pixels)
    }

    /// Component of `id` as a boolean mask over `domain`.
    ///
    /// The domain must have exactly as many points as the tree has pixels.
    pub fn reconstruct_node_mask(&self, id: u32, domain: Domain) -> Result<Vec<bool>> {
        if domain.point_count() != self.cmap.len() {
            return Err(Error::SizeMismatch {
                expected: self.cmap.len(),
                actual: domain.point_count(),
            });
        }
        let mut mask = vec![false; domain.point_count()];
        for p in self.reconstruct_node(id)? {
            mask[p as usize] = true;
        }
        Ok(mask)
    }

    /// Rebuild the image represented by the tree: every pixel takes the
    /// level of its owning node.
    pub fn reconstruct_image(&self) -> Vec<T> {
        let mut weights = vec![T::zero(); self.cmap.len()];
        for node in &self.nodes {
            for &p in &node.cnps {
                weights[p as usize] = node.level;
            }
        }
        weights
    }

    /// Remove every node failing `keep` by merging it into its parent.
    ///
    /// The scan is breadth-first; a removed node's canonical pixels move to
    /// its parent and its children are re-parented there in order. Children
    /// of a removed node are still visited and judged against the same
    /// predicate, now relative to their new parent. The root is exempt:
    /// a tree keeps exactly one root.
    ///
    /// Afterwards the arena is re-canonicalized: nodes are re-numbered in
    /// breadth-first order (restoring parent id < child id) and every
    /// affected `cmap` entry is rewritten.
    pub fn direct_filter_in_place(&mut self, mut keep: impl FnMut(&Node<T>) -> bool) {
        let mut queue = VecDeque::with_capacity(self.nodes.len());
        queue.push_back(Self::ROOT);
        while let Some(id) = queue.pop_front() {
            queue.extend(self.nodes[id as usize].children.iter().copied());
            let parent_id = match self.nodes[id as usize].parent {
                Some(pid) => pid,
                None => continue,
            };
            if keep(&self.nodes[id as usize]) {
                continue;
            }
            let cnps = mem::take(&mut self.nodes[id as usize].cnps);
            let children = mem::take(&mut self.nodes[id as usize].children);
            self.nodes[parent_id as usize].cnps.extend(cnps);
            self.nodes[parent_id as usize].children.retain(|&c| c != id);
            self.nodes[parent_id as usize]
                .children
                .extend_from_slice(&children);
            for c in children {
                self.nodes[c as usize].parent = Some(parent_id);
            }
        }
        self.recanonicalize();
    }

    /// Copy-producing variant of [`direct_filter_in_place`]: the receiver is
    /// left untouched.
    ///
    /// [`direct_filter_in_place`]: ComponentTree::direct_filter_in_place
    pub fn direct_filter(&self, keep: impl FnMut(&Node<T>) -> bool) -> Self {
        let mut tree = self.clone();
        tree.direct_filter_in_place(keep);
        tree
    }

    /// Rebuild the arena with fresh sequential ids in breadth-first order
    /// and rewrite `cmap` to match.
    fn recanonicalize(&mut self) {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::with_capacity(self.nodes.len());
        queue.push_back(Self::ROOT);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.nodes[id as usize].children.iter().copied());
        }

        let mut remap = vec![UNDEFINED_INDEX; self.nodes.len()];
        for (new_id, &old_id) in order.iter().enumerate() {
            remap[old_id as usize] = new_id as u32;
        }

        let mut nodes = Vec::with_capacity(order.len());
        for (new_id, &old_id) in order.iter().enumerate() {
            let new_id = new_id as u32;
            let cnps = mem::take(&mut self.nodes[old_id as usize].cnps);
            let children = mem::take(&mut self.nodes[old_id as usize].children);
            let parent = self.nodes[old_id as usize].parent;
            let level = self.nodes[old_id as usize].level;
            for &p in &cnps {
                self.cmap[p as usize] = new_id;
            }
            nodes.push(Node {
                id: new_id,
                level,
                cnps,
                parent: parent.map(|p| remap[p as usize]),
                children: children.iter().map(|&c| remap[c as usize]).collect(),
            });
        }
        self.nodes = nodes;
    }
}

/// Build the component tree rooted at the global weight maximum.
///
/// Pixels are processed in non-decreasing weight order: components at lower
/// levels nest inside brighter enclosing ones, and the leaves sit at the
/// regional minima.
pub fn build_max_tree<T: Weight>(
    image: &Image<T>,
    connectivity: Connectivity,
) -> Result<ComponentTree<T>> {
    let adjacency = Adjacency::new(image.domain(), connectivity);
    let order = sort_non_decreasing(image.as_slice());
    let result = canonical_parents(image.as_slice(), &adjacency, order)?;
    ComponentTree::from_builder(image.as_slice(), &result)
}

/// Build the component tree rooted at the global weight minimum.
///
/// Pixels are processed in non-increasing weight order: components at higher
/// levels nest inside darker enclosing ones, and the leaves sit at the
/// regional maxima.
pub fn build_min_tree<T: Weight>(
    image: &Image<T>,
    connectivity: Connectivity,
) -> Result<ComponentTree<T>> {
    let adjacency = Adjacency::new(image.domain(), connectivity);
    let order = sort_non_increasing(image.as_slice());
    let result = canonical_parents(image.as_slice(), &adjacency, order)?;
    ComponentTree::from_builder(image.as_slice(), &result)
}
