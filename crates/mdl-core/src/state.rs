//! Lighting and material session state.
//!
//! One `LightingState` lives for a whole script run. LIGHT and AMBIENT
//! overwrite its colors; primitives read it when they are drawn. Material
//! constants are resolved per primitive and never written back here.

use glam::DVec3;

use crate::ops::SymbolTable;

/// Ambient/diffuse/specular reflection coefficients, one per RGB channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reflectance {
    pub ambient: DVec3,
    pub diffuse: DVec3,
    pub specular: DVec3,
}

impl Reflectance {
    /// Same coefficients on every channel.
    pub const fn gray(ambient: f64, diffuse: f64, specular: f64) -> Self {
        Self {
            ambient: DVec3::splat(ambient),
            diffuse: DVec3::splat(diffuse),
            specular: DVec3::splat(specular),
        }
    }

    /// Default constants used when a primitive names no material.
    pub const WHITE: Reflectance = Reflectance::gray(0.1, 0.5, 0.5);
}

impl Default for Reflectance {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Point light source. The location is used as the light direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub location: DVec3,
    /// Channel intensities on a 0-255 scale.
    pub color: DVec3,
}

/// Mutable lighting state for one script run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingState {
    /// Ambient light color on a 0-255 scale.
    pub ambient: DVec3,
    pub light: PointLight,
    /// Direction toward the viewer.
    pub view: DVec3,
    /// Fallback constants for primitives without a material.
    pub default_reflect: Reflectance,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            ambient: DVec3::splat(50.0),
            light: PointLight {
                location: DVec3::new(0.5, 0.75, 1.0),
                color: DVec3::new(0.0, 255.0, 255.0),
            },
            view: DVec3::Z,
            default_reflect: Reflectance::WHITE,
        }
    }
}

impl LightingState {
    /// Overwrite the point-light color.
    pub fn set_light_color(&mut self, color: DVec3) {
        self.light.color = color;
    }

    /// Overwrite the ambient color.
    pub fn set_ambient(&mut self, color: DVec3) {
        self.ambient = color;
    }

    /// Resolve the constants for one primitive.
    ///
    /// A named material that the symbol table defines wins; anything else
    /// falls back to `default_reflect`. Resolution has no side effects.
    pub fn resolve(&self, material: Option<&str>, symbols: &SymbolTable) -> Reflectance {
        match material {
            None => self.default_reflect,
            Some(name) => match symbols.constants(name) {
                Some(reflect) => *reflect,
                None => {
                    log::warn!("constants '{}' are not defined, using defaults", name);
                    self.default_reflect
                }
            },
        }
    }
}
