//! Node attributes and connected attribute filters
//!
//! An attribute filter prunes a component tree by a measurable per-node
//! attribute and reconstructs the image from what remains. Because pruning
//! merges whole nodes into their parents, the result is a connected filter:
//! it never introduces new edges, it only flattens existing components.

use comptree_core::error::{Error, Result};
use comptree_core::{Algorithm, Connectivity, Image, Weight};

use crate::tree::{build_max_tree, build_min_tree, ComponentTree, Polarity};

/// Subtree pixel count for every node, indexed by node id.
///
/// One reverse-id pass: each node folds its own canonical pixel count into
/// its running total, then folds that total into its parent's. Since every
/// child id is larger than its parent's, a parent's total is complete by the
/// time the pass reaches it.
pub fn node_areas<T: Weight>(tree: &ComponentTree<T>) -> Vec<u32> {
    let mut areas = vec![0u32; tree.node_count()];
    tree.traverse(|node| {
        areas[node.id() as usize] += node.cnp_count() as u32;
        if let Some(parent) = node.parent() {
            areas[parent as usize] += areas[node.id() as usize];
        }
    });
    areas
}

/// Parameters for the connected area filter
#[derive(Debug, Clone)]
pub struct AreaFilterParams {
    /// Minimum component area, in pixels; nodes whose subtree covers fewer
    /// pixels are merged into their parent
    pub min_area: u32,
    /// Pixel connectivity used to build the tree
    pub connectivity: Connectivity,
    /// Tree polarity: `Min` flattens small bright structures, `Max` small
    /// dark ones
    pub polarity: Polarity,
}

impl Default for AreaFilterParams {
    fn default() -> Self {
        Self {
            min_area: 1,
            connectivity: Connectivity::Four,
            polarity: Polarity::Min,
        }
    }
}

/// Connected area filter
#[derive(Debug, Clone, Default)]
pub struct AreaFilter;

impl Algorithm for AreaFilter {
    type Input = Image<u8>;
    type Output = Image<u8>;
    type Params = AreaFilterParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "AreaFilter"
    }

    fn description(&self) -> &'static str {
        "Connected area filter: flattens components smaller than a pixel-count threshold"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        area_filter(&input, &params)
    }
}

/// Flatten every component covering fewer than `params.min_area` pixels.
///
/// Builds the component tree for the requested polarity, measures subtree
/// areas, prunes the undersized nodes and reconstructs the image.
pub fn area_filter<T: Weight>(image: &Image<T>, params: &AreaFilterParams) -> Result<Image<T>> {
    let mut tree = match params.polarity {
        Polarity::Max => build_max_tree(image, params.connectivity)?,
        Polarity::Min => build_min_tree(image, params.connectivity)?,
    };
    let areas = node_areas(&tree);
    tree.direct_filter_in_place(|node| areas[node.id() as usize] >= params.min_area);
    Image::from_vec(tree.reconstruct_image(), image.domain())
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptree_core::Domain;

    #[test]
    fn test_node_areas_on_ramp() {
        let image = Image::from_vec(vec![0u8, 4, 7], Domain::from_size(3, 1)).unwrap();
        let tree = build_min_tree(&image, Connectivity::Four).unwrap();
        assert_eq!(node_areas(&tree), vec![3, 2, 1]);
    }

    #[test]
    fn test_areas_decrease_towards_leaves() {
        let weights = vec![
            0u8, 0, 0, 0, 0, //
            0, 4, 4, 4, 0, //
            0, 4, 7, 4, 0, //
            0, 4, 4, 4, 0, //
            0, 0, 0, 0, 0, //
        ];
        let image = Image::from_vec(weights, Domain::from_size(5, 5)).unwrap();
        let tree = build_min_tree(&image, Connectivity::Four).unwrap();
        let areas = node_areas(&tree);
        assert_eq!(areas[0] as usize, tree.pixel_count());
        tree.traverse(|node| {
            if let Some(parent) = node.parent() {
                assert!(areas[parent as usize] > areas[node.id() as usize]);
            }
        });
    }

    #[test]
    fn test_area_filter_flattens_small_peak() {
        let weights = vec![
            0u8, 0, 0, 0, 0, //
            0, 4, 4, 4, 0, //
            0, 4, 7, 4, 0, //
            0, 4, 4, 4, 0, //
            0, 0, 0, 0, 0, //
        ];
        let image = Image::from_vec(weights.clone(), Domain::from_size(5, 5)).unwrap();

        let params = AreaFilterParams {
            min_area: 2,
            connectivity: Connectivity::Four,
            polarity: Polarity::Min,
        };
        let filtered = area_filter(&image, &params).unwrap();

        // the single-pixel peak is flattened onto its surrounding plateau
        let mut expected = weights;
        expected[12] = 4;
        assert_eq!(filtered.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_area_filter_noop_below_threshold() {
        let weights = vec![5u8, 5, 9, 5, 5, 5];
        let image = Image::from_vec(weights.clone(), Domain::from_size(3, 2)).unwrap();
        let params = AreaFilterParams {
            min_area: 1,
            ..AreaFilterParams::default()
        };
        let filtered = area_filter(&image, &params).unwrap();
        assert_eq!(filtered.as_slice(), weights.as_slice());
    }

    #[test]
    fn test_algorithm_trait_surface() {
        let image = Image::from_vec(vec![5u8, 5, 9, 5, 5, 5], Domain::from_size(3, 2)).unwrap();
        let algorithm = AreaFilter;
        assert_eq!(algorithm.name(), "AreaFilter");
        let output = algorithm
            .execute(
                image,
                AreaFilterParams {
                    min_area: 2,
                    ..AreaFilterParams::default()
                },
            )
            .unwrap();
        // the lone bright pixel covers one pixel only: flattened
        assert_eq!(output.as_slice(), &[5, 5, 5, 5, 5, 5]);
    }
}
