//! Pixel adjacency: 4- and 8-connectivity neighbour enumeration

use crate::grid::Domain;

/// 4-neighbour offsets: E, N, W, S
const OFFSETS_4: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// 8-neighbour offsets: E, NE, N, NW, W, SW, S, SE
const OFFSETS_8: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Pixel connectivity pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 4 edge-sharing neighbours
    #[default]
    Four,
    /// 8 edge- or corner-sharing neighbours
    Eight,
}

impl Connectivity {
    /// Relative (dx, dy) neighbour offsets, centre excluded
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &OFFSETS_4,
            Connectivity::Eight => &OFFSETS_8,
        }
    }
}

/// Neighbour enumeration for the pixels of a [`Domain`].
///
/// Neighbours are reported as linear indices, in fixed offset-table order,
/// with out-of-domain positions skipped.
#[derive(Debug, Clone, Copy)]
pub struct Adjacency {
    domain: Domain,
    connectivity: Connectivity,
}

impl Adjacency {
    pub fn new(domain: Domain, connectivity: Connectivity) -> Self {
        Self {
            domain,
            connectivity,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// In-domain neighbours of the pixel at linear index `idx`
    pub fn neighbours(&self, idx: u32) -> impl Iterator<Item = u32> + '_ {
        let centre = self.domain.point_of(idx);
        self.connectivity.offsets().iter().filter_map(move |&(dx, dy)| {
            self.domain
                .index_of(crate::grid::Point::new(centre.x + dx, centre.y + dy))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;

    fn collect_sorted(adj: &Adjacency, idx: u32) -> Vec<u32> {
        let mut n: Vec<u32> = adj.neighbours(idx).collect();
        n.sort_unstable();
        n
    }

    #[test]
    fn test_four_connectivity_interior() {
        let adj = Adjacency::new(Domain::from_size(5, 5), Connectivity::Four);
        // centre pixel (2, 2) = index 12
        assert_eq!(collect_sorted(&adj, 12), vec![7, 11, 13, 17]);
    }

    #[test]
    fn test_four_connectivity_corner() {
        let adj = Adjacency::new(Domain::from_size(5, 5), Connectivity::Four);
        assert_eq!(collect_sorted(&adj, 0), vec![1, 5]);
        assert_eq!(collect_sorted(&adj, 24), vec![19, 23]);
    }

    #[test]
    fn test_eight_connectivity_interior() {
        let adj = Adjacency::new(Domain::from_size(5, 5), Connectivity::Eight);
        assert_eq!(collect_sorted(&adj, 12), vec![6, 7, 8, 11, 13, 16, 17, 18]);
    }

    #[test]
    fn test_eight_connectivity_edge() {
        let adj = Adjacency::new(Domain::from_size(5, 5), Connectivity::Eight);
        // top edge pixel (2, 0) = index 2
        assert_eq!(collect_sorted(&adj, 2), vec![1, 3, 6, 7, 8]);
    }

    #[test]
    fn test_offset_domain_neighbours() {
        let domain = Domain::with_top_left(Point::new(-1, -1), 3, 3);
        let adj = Adjacency::new(domain, Connectivity::Four);
        // centre of the shifted domain is (0, 0) = index 4
        assert_eq!(domain.index_of(Point::new(0, 0)), Some(4));
        assert_eq!(collect_sorted(&adj, 4), vec![1, 3, 5, 7]);
    }
}
