//! Built-in demo scripts, compiled by hand.

use glam::DVec3;

use super::Script;
use crate::math::Axis;
use crate::ops::{Operation, SymbolTable};
use crate::state::Reflectance;

/// Built-in demo selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Demo {
    #[default]
    Robot,
    Solar,
    Starburst,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Robot, Demo::Solar, Demo::Starburst];

    /// Look a demo up by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|demo| demo.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Demo::Robot => "robot",
            Demo::Solar => "solar",
            Demo::Starburst => "starburst",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Demo::Robot => "boxes, a sphere and a torus in nested coordinate systems",
            Demo::Solar => "orbiting spheres with a ringed planet",
            Demo::Starburst => "rotated line fan inside a wireframe border",
        }
    }

    /// Compile the demo into a command list and symbol table.
    pub fn script(self) -> Script {
        match self {
            Demo::Robot => robot(),
            Demo::Solar => solar(),
            Demo::Starburst => starburst(),
        }
    }
}

fn constants(ambient: [f64; 3], diffuse: [f64; 3], specular: [f64; 3]) -> Reflectance {
    Reflectance {
        ambient: DVec3::from_array(ambient),
        diffuse: DVec3::from_array(diffuse),
        specular: DVec3::from_array(specular),
    }
}

fn cuboid(corner: [f64; 3], size: [f64; 3], material: Option<&str>) -> Operation {
    Operation::Box {
        corner: DVec3::from_array(corner),
        size: DVec3::from_array(size),
        constants: material.map(str::to_string),
    }
}

fn sphere(center: [f64; 3], radius: f64, material: Option<&str>) -> Operation {
    Operation::Sphere {
        center: DVec3::from_array(center),
        radius,
        constants: material.map(str::to_string),
    }
}

fn torus(center: [f64; 3], tube: f64, ring: f64, material: Option<&str>) -> Operation {
    Operation::Torus {
        center: DVec3::from_array(center),
        tube,
        ring,
        constants: material.map(str::to_string),
    }
}

fn robot() -> Script {
    let mut symbols = SymbolTable::new();
    symbols.define_constants(
        "shiny_purple",
        constants([0.3, 0.2, 0.3], [0.8, 0.2, 0.8], [0.6, 0.6, 0.6]),
    );
    symbols.define_constants(
        "shiny_teal",
        constants([0.1, 0.3, 0.3], [0.1, 0.7, 0.7], [0.6, 0.6, 0.6]),
    );
    symbols.define_constants(
        "dull_yellow",
        constants([0.3, 0.3, 0.1], [0.8, 0.8, 0.2], [0.0, 0.0, 0.0]),
    );

    let commands = vec![
        Operation::ambient(60.0, 60.0, 60.0),
        Operation::light(255.0, 255.0, 255.0),
        Operation::Push,
        Operation::translate(250.0, 250.0, 0.0),
        Operation::rotate(Axis::Y, 20.0),
        Operation::rotate(Axis::X, 15.0),
        // body
        cuboid([-75.0, 100.0, 40.0], [150.0, 200.0, 80.0], Some("shiny_purple")),
        // head
        Operation::Push,
        Operation::translate(0.0, 150.0, 0.0),
        sphere([0.0, 0.0, 0.0], 45.0, Some("shiny_teal")),
        Operation::Pop,
        // belt
        Operation::Push,
        Operation::translate(0.0, -40.0, 0.0),
        torus([0.0, 0.0, 0.0], 12.0, 90.0, Some("shiny_teal")),
        Operation::Pop,
        // left arm
        Operation::Push,
        Operation::translate(-75.0, 90.0, 0.0),
        Operation::rotate(Axis::Z, -30.0),
        cuboid([-30.0, 0.0, 25.0], [30.0, 120.0, 50.0], Some("dull_yellow")),
        Operation::Pop,
        // right arm
        Operation::Push,
        Operation::translate(75.0, 90.0, 0.0),
        Operation::rotate(Axis::Z, 30.0),
        cuboid([0.0, 0.0, 25.0], [30.0, 120.0, 50.0], Some("dull_yellow")),
        Operation::Pop,
        // legs
        Operation::Push,
        Operation::translate(0.0, -100.0, 0.0),
        cuboid([-70.0, 0.0, 25.0], [40.0, 120.0, 50.0], None),
        cuboid([30.0, 0.0, 25.0], [40.0, 120.0, 50.0], None),
        Operation::Pop,
        Operation::Pop,
    ];
    Script::new(commands, symbols)
}

fn solar() -> Script {
    let mut symbols = SymbolTable::new();
    symbols.define_constants(
        "sun",
        constants([1.0, 0.9, 0.3], [0.6, 0.5, 0.1], [0.2, 0.2, 0.2]),
    );
    symbols.define_constants(
        "planet",
        constants([0.1, 0.2, 0.4], [0.2, 0.4, 0.9], [0.8, 0.8, 0.8]),
    );
    symbols.define_constants(
        "ring",
        constants([0.3, 0.3, 0.3], [0.6, 0.6, 0.5], [0.3, 0.3, 0.3]),
    );

    let commands = vec![
        Operation::ambient(40.0, 40.0, 60.0),
        Operation::light(255.0, 240.0, 200.0),
        Operation::Push,
        Operation::translate(250.0, 250.0, 0.0),
        sphere([0.0, 0.0, 0.0], 70.0, Some("sun")),
        // ringed planet
        Operation::Push,
        Operation::rotate(Axis::Z, 30.0),
        Operation::translate(160.0, 0.0, 0.0),
        sphere([0.0, 0.0, 0.0], 25.0, Some("planet")),
        Operation::Push,
        Operation::rotate(Axis::X, 70.0),
        torus([0.0, 0.0, 0.0], 4.0, 40.0, Some("ring")),
        Operation::Pop,
        Operation::Pop,
        // inner planet
        Operation::Push,
        Operation::rotate(Axis::Z, 200.0),
        Operation::translate(120.0, 0.0, 0.0),
        sphere([0.0, 0.0, 0.0], 15.0, None),
        Operation::Pop,
        Operation::Pop,
    ];
    Script::new(commands, symbols)
}

fn starburst() -> Script {
    let mut commands = vec![
        // border
        Operation::line([25.0, 25.0, 0.0], [475.0, 25.0, 0.0]),
        Operation::line([475.0, 25.0, 0.0], [475.0, 475.0, 0.0]),
        Operation::line([475.0, 475.0, 0.0], [25.0, 475.0, 0.0]),
        Operation::line([25.0, 475.0, 0.0], [25.0, 25.0, 0.0]),
        Operation::Push,
        Operation::translate(250.0, 250.0, 0.0),
    ];
    for _ in 0..24 {
        commands.push(Operation::rotate(Axis::Z, 15.0));
        commands.push(Operation::line([20.0, 0.0, 0.0], [200.0, 0.0, 0.0]));
    }
    commands.push(Operation::Pop);
    Script::new(commands, SymbolTable::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Opcode;

    #[test]
    fn test_from_name() {
        assert_eq!(Demo::from_name("robot"), Some(Demo::Robot));
        assert_eq!(Demo::from_name("SOLAR"), Some(Demo::Solar));
        assert_eq!(Demo::from_name("teapot"), None);
    }

    #[test]
    fn test_push_pop_balanced() {
        for demo in Demo::ALL {
            let script = demo.script();
            let mut depth = 1i64;
            for op in &script.commands {
                match op.opcode() {
                    Opcode::Push => depth += 1,
                    Opcode::Pop => depth -= 1,
                    _ => {}
                }
                assert!(depth >= 1, "{} pops past the base", demo.name());
            }
            assert_eq!(depth, 1, "{} leaves frames on the stack", demo.name());
        }
    }

    #[test]
    fn test_materials_are_defined() {
        for demo in Demo::ALL {
            let script = demo.script();
            for op in &script.commands {
                let material = match op {
                    Operation::Box { constants, .. }
                    | Operation::Sphere { constants, .. }
                    | Operation::Torus { constants, .. } => constants.as_deref(),
                    _ => None,
                };
                if let Some(name) = material {
                    assert!(script.symbols.constants(name).is_some(), "{name} undefined");
                }
            }
        }
    }
}
