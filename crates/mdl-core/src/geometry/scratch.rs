//! Fixed-capacity column store reused by every draw command.
//!
//! Storage is allocated once; after each render call only the logical length
//! is reset, so a whole script runs without reallocating geometry.

use glam::DVec4;

use crate::math::Transform;

/// Column capacity of the polygon buffer (three columns per triangle).
pub const POLYGON_CAPACITY: usize = 4096;
/// Column capacity of the edge buffer (two columns per edge).
pub const EDGE_CAPACITY: usize = 256;

/// Scratch buffer for triangle lists.
pub type PolygonBuffer = ScratchBuffer<POLYGON_CAPACITY>;
/// Scratch buffer for edge lists.
pub type EdgeBuffer = ScratchBuffer<EDGE_CAPACITY>;

/// Generated geometry does not fit in a scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("scratch buffer overflow: {required} columns needed, capacity is {capacity}")]
pub struct Overflow {
    pub required: usize,
    pub capacity: usize,
}

/// Append-only store of homogeneous columns with a fixed capacity of `N`.
#[derive(Clone, Debug, Default)]
pub struct ScratchBuffer<const N: usize> {
    columns: heapless::Vec<DVec4, N>,
}

impl<const N: usize> ScratchBuffer<N> {
    pub fn new() -> Self {
        Self {
            columns: heapless::Vec::new(),
        }
    }

    /// Logical length in columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Physical capacity in columns.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Check that `additional` more columns fit without appending anything.
    pub fn reserve(&self, additional: usize) -> Result<(), Overflow> {
        let required = self.columns.len().saturating_add(additional);
        if required > N {
            return Err(Overflow {
                required,
                capacity: N,
            });
        }
        Ok(())
    }

    /// Append one column.
    pub fn push(&mut self, column: DVec4) -> Result<(), Overflow> {
        self.columns.push(column).map_err(|_| Overflow {
            required: N + 1,
            capacity: N,
        })
    }

    /// Append a triangle as three consecutive columns.
    pub fn push_triangle(&mut self, a: DVec4, b: DVec4, c: DVec4) -> Result<(), Overflow> {
        self.reserve(3)?;
        self.push(a)?;
        self.push(b)?;
        self.push(c)
    }

    /// Append an edge as two consecutive columns.
    pub fn push_edge(&mut self, a: DVec4, b: DVec4) -> Result<(), Overflow> {
        self.reserve(2)?;
        self.push(a)?;
        self.push(b)
    }

    /// Left-multiply every column by `m`.
    pub fn transform(&mut self, m: &Transform) {
        for column in self.columns.iter_mut() {
            *column = *m * *column;
        }
    }

    /// Reset the logical length to zero, keeping the storage.
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    pub fn as_slice(&self) -> &[DVec4] {
        &self.columns
    }
}
