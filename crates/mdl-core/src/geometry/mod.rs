//! Geometry generation and the scratch buffers it fills.

pub mod scratch;
pub mod shapes;

pub use scratch::{EdgeBuffer, Overflow, PolygonBuffer, ScratchBuffer};
