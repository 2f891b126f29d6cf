//! # Comptree Core
//!
//! Core types for the comptree component-tree library.
//!
//! This crate provides:
//! - `Domain`: rectangular pixel domain with coordinate ↔ linear-index mapping
//! - `Image<T>`: flat row-major image bound to a domain
//! - `Weight`: element trait for totally ordered pixel values
//! - `Adjacency`: 4-/8-connectivity neighbour enumeration
//! - Algorithm traits for a consistent API

pub mod adjacency;
pub mod error;
pub mod grid;

pub use adjacency::{Adjacency, Connectivity};
pub use error::{Error, Result};
pub use grid::{Domain, Image, Point, Weight};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::adjacency::{Adjacency, Connectivity};
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Domain, Image, Point, Weight};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in comptree.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
