//! Area-filter demo: flatten small bright specks while keeping the large
//! bright structure intact.
//!
//! Run with: cargo run --example area_filter

use comptree_algorithms::attributes::{area_filter, node_areas, AreaFilterParams};
use comptree_algorithms::tree::{build_min_tree, Polarity};
use comptree_core::{Connectivity, Domain, Image};

fn print_image(label: &str, image: &Image<u8>) {
    println!("{label}:");
    let width = image.domain().width() as usize;
    for (i, value) in image.as_slice().iter().enumerate() {
        print!("{value:2} ");
        if (i + 1) % width == 0 {
            println!();
        }
    }
    println!();
}

fn main() -> comptree_core::Result<()> {
    // a wide bright plateau with one large peak and two single-pixel specks
    let weights = vec![
        1u8, 1, 1, 1, 1, 1, 1, 1, //
        1, 9, 1, 5, 5, 5, 1, 1, //
        1, 1, 1, 5, 8, 5, 1, 1, //
        1, 1, 1, 5, 5, 5, 1, 9, //
        1, 1, 1, 1, 1, 1, 1, 1, //
    ];
    let image = Image::from_vec(weights, Domain::from_size(8, 5))?;
    print_image("input", &image);

    let tree = build_min_tree(&image, Connectivity::Four)?;
    let areas = node_areas(&tree);
    println!("tree has {} nodes", tree.node_count());
    tree.traverse_by_level(|node| {
        println!(
            "  node {:2}  level {:2}  area {:3}",
            node.id(),
            node.level(),
            areas[node.id() as usize]
        );
    });
    println!();

    let filtered = area_filter(
        &image,
        &AreaFilterParams {
            min_area: 4,
            connectivity: Connectivity::Four,
            polarity: Polarity::Min,
        },
    )?;
    print_image("filtered (min_area = 4)", &filtered);

    Ok(())
}
