//! Rendering seam between the interpreter and a frame buffer.
//!
//! The interpreter only talks to a `RenderBackend`. `SoftwareBackend` is the
//! reference backend: a CPU rasterizer with a depth buffer that saves frames
//! through the `image` crate.

pub mod frame;
pub mod lighting;
pub mod raster;
pub mod software;

use std::path::Path;

use glam::{DVec3, DVec4};

use crate::error::BackendError;
use crate::state::{PointLight, Reflectance};

pub use frame::FrameBuffer;
pub use image::Rgb;
pub use software::SoftwareBackend;

/// Everything the lighting model needs to shade one primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    /// Direction toward the viewer.
    pub view: DVec3,
    pub light: PointLight,
    /// Ambient color, 0-255 per channel.
    pub ambient: DVec3,
    /// Constants resolved for this primitive.
    pub reflect: Reflectance,
}

/// Destination for world-space geometry.
pub trait RenderBackend {
    /// Draw a triangle list (three columns per triangle) with lighting.
    fn draw_polygons(&mut self, polygons: &[DVec4], shading: &Shading);

    /// Draw an edge list (two columns per edge) in a flat color.
    fn draw_lines(&mut self, edges: &[DVec4], color: Rgb<u8>);

    /// Present the frame as drawn so far.
    fn display(&mut self) -> Result<(), BackendError>;

    /// Write the frame as drawn so far to `path`.
    fn save(&mut self, path: &Path) -> Result<(), BackendError>;
}
