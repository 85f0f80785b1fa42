//! Distance matrices.
//!
//! Provides the dense symmetric matrix every fitness evaluation reads from.

mod matrix;

pub use matrix::DistanceMatrix;
