//! Compiled MDL commands and the symbol table that accompanies them.
//!
//! A script compiles to an ordered `Vec<Operation>` plus a `SymbolTable` of
//! named reflection constants. Both are read-only while the interpreter runs.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use glam::DVec3;

use crate::math::Axis;
use crate::state::Reflectance;

/// One compiled scene command.
///
/// Every MDL opcode has a variant, including the ones the interpreter does
/// not support yet, so dispatch over this enum is always exhaustive.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Duplicate the current coordinate system.
    Push,
    /// Return to the enclosing coordinate system.
    Pop,
    Move {
        offset: DVec3,
    },
    Scale {
        factors: DVec3,
    },
    Rotate {
        axis: Axis,
        degrees: f64,
    },
    /// Axis-aligned box from `corner` extending +x, -y, -z by `size`.
    Box {
        corner: DVec3,
        size: DVec3,
        constants: Option<String>,
    },
    Sphere {
        center: DVec3,
        radius: f64,
        constants: Option<String>,
    },
    /// Torus around the y axis: `tube` is the cross-section radius,
    /// `ring` the distance from the center to the middle of the tube.
    Torus {
        center: DVec3,
        tube: f64,
        ring: f64,
        constants: Option<String>,
    },
    Line {
        p0: DVec3,
        p1: DVec3,
    },
    /// Point-light color, 0-255 per channel.
    Light {
        color: DVec3,
    },
    /// Ambient color, 0-255 per channel.
    Ambient {
        color: DVec3,
    },
    Save {
        filename: PathBuf,
    },
    Display,

    // Recognized but not supported: camera, mesh import, animation and
    // lighting-model commands.
    Camera {
        eye: DVec3,
        aim: DVec3,
    },
    Mesh {
        filename: PathBuf,
        constants: Option<String>,
    },
    Set {
        knob: String,
        value: f64,
    },
    Basename {
        name: String,
    },
    SaveKnobs {
        name: String,
    },
    SetKnobs {
        value: f64,
    },
    Tween {
        start_frame: u32,
        end_frame: u32,
        knobs0: String,
        knobs1: String,
    },
    Frames {
        count: u32,
    },
    Vary {
        knob: String,
        start_frame: u32,
        end_frame: u32,
        start_value: f64,
        end_value: f64,
    },
    Shading {
        model: String,
    },
    GenerateRayfiles,
    Focal {
        value: f64,
    },
    SaveCoords {
        name: String,
    },
}

/// Payload-free opcode tag of an `Operation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Push,
    Pop,
    Move,
    Scale,
    Rotate,
    Box,
    Sphere,
    Torus,
    Line,
    Light,
    Ambient,
    Save,
    Display,
    Camera,
    Mesh,
    Set,
    Basename,
    SaveKnobs,
    SetKnobs,
    Tween,
    Frames,
    Vary,
    Shading,
    GenerateRayfiles,
    Focal,
    SaveCoords,
}

impl Opcode {
    /// MDL keyword for this opcode.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Push => "push",
            Opcode::Pop => "pop",
            Opcode::Move => "move",
            Opcode::Scale => "scale",
            Opcode::Rotate => "rotate",
            Opcode::Box => "box",
            Opcode::Sphere => "sphere",
            Opcode::Torus => "torus",
            Opcode::Line => "line",
            Opcode::Light => "light",
            Opcode::Ambient => "ambient",
            Opcode::Save => "save",
            Opcode::Display => "display",
            Opcode::Camera => "camera",
            Opcode::Mesh => "mesh",
            Opcode::Set => "set",
            Opcode::Basename => "basename",
            Opcode::SaveKnobs => "save_knobs",
            Opcode::SetKnobs => "setknobs",
            Opcode::Tween => "tween",
            Opcode::Frames => "frames",
            Opcode::Vary => "vary",
            Opcode::Shading => "shading",
            Opcode::GenerateRayfiles => "generate_rayfiles",
            Opcode::Focal => "focal",
            Opcode::SaveCoords => "save_coords",
        }
    }

    /// Whether the interpreter gives this opcode an effect.
    pub fn is_supported(self) -> bool {
        !matches!(
            self,
            Opcode::Camera
                | Opcode::Mesh
                | Opcode::Set
                | Opcode::Basename
                | Opcode::SaveKnobs
                | Opcode::SetKnobs
                | Opcode::Tween
                | Opcode::Frames
                | Opcode::Vary
                | Opcode::Shading
                | Opcode::GenerateRayfiles
                | Opcode::Focal
                | Opcode::SaveCoords
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    /// The opcode tag of this command.
    pub fn opcode(&self) -> Opcode {
        match self {
            Operation::Push => Opcode::Push,
            Operation::Pop => Opcode::Pop,
            Operation::Move { .. } => Opcode::Move,
            Operation::Scale { .. } => Opcode::Scale,
            Operation::Rotate { .. } => Opcode::Rotate,
            Operation::Box { .. } => Opcode::Box,
            Operation::Sphere { .. } => Opcode::Sphere,
            Operation::Torus { .. } => Opcode::Torus,
            Operation::Line { .. } => Opcode::Line,
            Operation::Light { .. } => Opcode::Light,
            Operation::Ambient { .. } => Opcode::Ambient,
            Operation::Save { .. } => Opcode::Save,
            Operation::Display => Opcode::Display,
            Operation::Camera { .. } => Opcode::Camera,
            Operation::Mesh { .. } => Opcode::Mesh,
            Operation::Set { .. } => Opcode::Set,
            Operation::Basename { .. } => Opcode::Basename,
            Operation::SaveKnobs { .. } => Opcode::SaveKnobs,
            Operation::SetKnobs { .. } => Opcode::SetKnobs,
            Operation::Tween { .. } => Opcode::Tween,
            Operation::Frames { .. } => Opcode::Frames,
            Operation::Vary { .. } => Opcode::Vary,
            Operation::Shading { .. } => Opcode::Shading,
            Operation::GenerateRayfiles => Opcode::GenerateRayfiles,
            Operation::Focal { .. } => Opcode::Focal,
            Operation::SaveCoords { .. } => Opcode::SaveCoords,
        }
    }

    pub fn translate(dx: f64, dy: f64, dz: f64) -> Self {
        Operation::Move {
            offset: DVec3::new(dx, dy, dz),
        }
    }

    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Operation::Scale {
            factors: DVec3::new(sx, sy, sz),
        }
    }

    pub fn rotate(axis: Axis, degrees: f64) -> Self {
        Operation::Rotate { axis, degrees }
    }

    pub fn line(p0: [f64; 3], p1: [f64; 3]) -> Self {
        Operation::Line {
            p0: DVec3::from_array(p0),
            p1: DVec3::from_array(p1),
        }
    }

    pub fn light(r: f64, g: f64, b: f64) -> Self {
        Operation::Light {
            color: DVec3::new(r, g, b),
        }
    }

    pub fn ambient(r: f64, g: f64, b: f64) -> Self {
        Operation::Ambient {
            color: DVec3::new(r, g, b),
        }
    }
}

/// Named values defined by a script, as produced alongside the command list.
///
/// Only reflection constants matter to the interpreter. Entries are kept
/// sorted by name so that dumps are stable between runs.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    constants: BTreeMap<String, Reflectance>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a named set of reflection constants.
    pub fn define_constants(&mut self, name: impl Into<String>, reflect: Reflectance) {
        self.constants.insert(name.into(), reflect);
    }

    /// Look up named constants.
    pub fn constants(&self, name: &str) -> Option<&Reflectance> {
        self.constants.get(name)
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Log every entry at debug level.
    pub fn log_contents(&self) {
        log::debug!("symbol table: {} constants", self.constants.len());
        for (name, reflect) in &self.constants {
            log::debug!(
                "  {}: ka={:?} kd={:?} ks={:?}",
                name,
                reflect.ambient.to_array(),
                reflect.diffuse.to_array(),
                reflect.specular.to_array()
            );
        }
    }
}
