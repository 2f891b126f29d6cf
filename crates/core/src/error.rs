//! Error types for comptree

use thiserror::Error;

/// Main error type for comptree operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty domain: images and trees need at least one pixel")]
    EmptyDomain,

    #[error("Invalid domain dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Pixel index out of bounds: {index} in domain of {len} points")]
    IndexOutOfBounds { index: u32, len: usize },

    #[error("Point ({x}, {y}) lies outside the domain")]
    PointOutOfDomain { x: i32, y: i32 },

    #[error("Node id out of bounds: {id} in tree of {count} nodes")]
    NodeOutOfBounds { id: u32, count: usize },

    #[error("Domain too large: {points} points exceed the u32 index range")]
    DomainTooLarge { points: usize },

    #[error("Parent map is not canonical: pixel {pixel} does not resolve in one hop")]
    NotCanonical { pixel: u32 },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for comptree operations
pub type Result<T> = std::result::Result<T, Error>;
