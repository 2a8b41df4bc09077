//! End-to-end tests running scripts through the software backend.

use std::path::PathBuf;

use glam::DVec3;
use mdl_core::math::Axis;
use mdl_core::render::Rgb;
use mdl_core::scene::demos::Demo;
use mdl_core::{
    execute, EngineConfig, ExecError, FrameBuffer, Interpreter, Operation, SoftwareBackend,
    SymbolTable,
};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

fn sphere_at(x: f64, y: f64, radius: f64) -> Operation {
    Operation::Sphere {
        center: DVec3::new(x, y, 0.0),
        radius,
        constants: None,
    }
}

fn render(commands: &[Operation]) -> FrameBuffer {
    let config = EngineConfig::default();
    let (_, backend) = execute(
        commands,
        &SymbolTable::new(),
        SoftwareBackend::new(&config),
        &config,
    )
    .expect("script should render");
    backend.frame().clone()
}

fn lit_pixels(frame: &FrameBuffer) -> usize {
    frame.image().pixels().filter(|px| **px != BLACK).count()
}

mod lighting_changes {
    use super::*;

    #[test]
    fn light_change_only_affects_later_primitives() {
        let config = EngineConfig::default();
        let mut interp = Interpreter::new(SoftwareBackend::new(&config), &config);
        let symbols = SymbolTable::new();

        interp
            .execute(
                &[Operation::light(0.0, 255.0, 0.0), sphere_at(120.0, 250.0, 60.0)],
                &symbols,
            )
            .unwrap();
        let after_first = interp.backend().frame().clone();

        interp
            .execute(
                &[Operation::light(0.0, 0.0, 255.0), sphere_at(380.0, 250.0, 60.0)],
                &symbols,
            )
            .unwrap();
        let frame = interp.backend().frame();

        // The first sphere was not redrawn.
        for y in 190..=310 {
            for x in 60..=180 {
                assert_eq!(frame.pixel(x, y), after_first.pixel(x, y), "({x}, {y})");
            }
        }

        let Rgb([_, g1, b1]) = frame.pixel(120, 250).unwrap();
        let Rgb([_, g2, b2]) = frame.pixel(380, 250).unwrap();
        assert!(g1 > 100 && b1 < 10, "first sphere {g1} {b1}");
        assert!(b2 > 100 && g2 < 10, "second sphere {g2} {b2}");
    }

    #[test]
    fn ambient_only_scene_is_flat() {
        let frame = render(&[
            Operation::light(0.0, 0.0, 0.0),
            Operation::ambient(200.0, 200.0, 200.0),
            sphere_at(250.0, 250.0, 80.0),
        ]);
        // White constants: ka = 0.1, so every lit pixel is 20.
        assert_eq!(frame.pixel(250, 250), Some(Rgb([20, 20, 20])));
        assert_eq!(frame.pixel(250, 300), Some(Rgb([20, 20, 20])));
        assert_eq!(frame.pixel(10, 10), Some(BLACK));
    }
}

mod depth_and_culling {
    use super::*;

    #[test]
    fn nearer_box_wins_regardless_of_order() {
        let near = Operation::Box {
            corner: DVec3::new(200.0, 300.0, 50.0),
            size: DVec3::new(100.0, 100.0, 10.0),
            constants: None,
        };
        let far = Operation::Box {
            corner: DVec3::new(150.0, 350.0, 0.0),
            size: DVec3::new(200.0, 200.0, 10.0),
            constants: None,
        };
        let symbols = {
            let mut s = SymbolTable::new();
            s.define_constants(
                "red",
                mdl_core::Reflectance {
                    ambient: DVec3::new(1.0, 0.0, 0.0),
                    diffuse: DVec3::ZERO,
                    specular: DVec3::ZERO,
                },
            );
            s
        };
        let with_red = |op: &Operation| match op.clone() {
            Operation::Box { corner, size, .. } => Operation::Box {
                corner,
                size,
                constants: Some("red".into()),
            },
            other => other,
        };

        let config = EngineConfig::default();
        let run = |commands: &[Operation]| {
            let (_, backend) = execute(commands, &symbols, SoftwareBackend::new(&config), &config)
                .unwrap();
            backend.frame().pixel(250, 250)
        };

        let near_first = run(&[with_red(&near), far.clone()]);
        let far_first = run(&[far, with_red(&near)]);
        assert_eq!(near_first, far_first);
        assert_eq!(near_first, Some(Rgb([50, 0, 0])));
    }

    #[test]
    fn sphere_covers_its_disc() {
        let frame = render(&[sphere_at(250.0, 250.0, 50.0)]);
        let disc = std::f64::consts::PI * 50.0 * 50.0;
        let covered = lit_pixels(&frame) as f64;
        assert!((covered - disc).abs() < disc * 0.1, "covered {covered}, disc {disc}");
        assert_eq!(frame.pixel(250, 310), Some(BLACK));
    }
}

mod lines {
    use super::*;

    #[test]
    fn lines_draw_in_scene_coordinates() {
        let frame = render(&[Operation::line([10.0, 20.0, 0.0], [60.0, 20.0, 0.0])]);
        let white = Some(Rgb([255, 255, 255]));
        assert_eq!(frame.pixel(10, 20), white);
        assert_eq!(frame.pixel(35, 20), white);
        assert_eq!(frame.pixel(60, 20), white);
        assert_eq!(frame.pixel(35, 21), Some(BLACK));
        // y = 20 is 20 rows above the bottom of the image.
        assert_eq!(*frame.image().get_pixel(35, 479), Rgb([255, 255, 255]));
    }

    #[test]
    fn rotated_line_lands_on_the_y_axis() {
        let frame = render(&[
            Operation::translate(100.0, 100.0, 0.0),
            Operation::rotate(Axis::Z, 90.0),
            Operation::line([50.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ]);
        let white = Some(Rgb([255, 255, 255]));
        assert_eq!(frame.pixel(100, 150), white);
        assert_eq!(frame.pixel(100, 125), white);
        assert_eq!(frame.pixel(150, 100), Some(BLACK));
    }
}

mod off_screen {
    use std::time::{Duration, Instant};

    use super::*;

    /// Generous bound; clipped work is a few frames' worth of pixels.
    const BUDGET: Duration = Duration::from_secs(5);

    #[test]
    fn extreme_line_is_clipped_not_a_panic() {
        let frame = render(&[Operation::line([-1e300, 100.0, 0.0], [1e300, 100.0, 0.0])]);
        let white = Some(Rgb([255, 255, 255]));
        assert_eq!(frame.pixel(0, 100), white);
        assert_eq!(frame.pixel(499, 100), white);
        assert_eq!(lit_pixels(&frame), 500);
    }

    #[test]
    fn extreme_line_on_bottom_row() {
        let frame = render(&[Operation::line([-1e300, 0.0, 0.0], [1e300, 0.0, 0.0])]);
        assert_eq!(lit_pixels(&frame), 500);
    }

    #[test]
    fn long_off_screen_line_finishes_quickly() {
        let start = Instant::now();
        let frame = render(&[
            Operation::line([0.0, -5.0, 0.0], [2e12, -5.0, 0.0]),
            Operation::line([0.0, 0.0, 0.0], [2e12, 3e12, 0.0]),
        ]);
        assert!(start.elapsed() < BUDGET, "took {:?}", start.elapsed());
        // The first line is below the frame; the second starts at the origin.
        assert_eq!(frame.pixel(0, 0), Some(Rgb([255, 255, 255])));
    }

    #[test]
    fn scaled_up_box_fills_the_frame_quickly() {
        let start = Instant::now();
        let frame = render(&[
            Operation::scale(1e9, 1e9, 1.0),
            Operation::Box {
                corner: DVec3::new(-1.0, 1.0, 0.0),
                size: DVec3::new(2.0, 2.0, 1.0),
                constants: None,
            },
        ]);
        assert!(start.elapsed() < BUDGET, "took {:?}", start.elapsed());
        assert_eq!(lit_pixels(&frame), 500 * 500);
    }
}

mod output {
    use super::*;

    #[test]
    fn save_writes_progressive_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.ppm");

        let frame = render(&[
            sphere_at(150.0, 150.0, 40.0),
            Operation::Save {
                filename: first.clone(),
            },
            sphere_at(350.0, 350.0, 40.0),
            Operation::Save {
                filename: second.clone(),
            },
        ]);

        let a = image::open(&first).unwrap().to_rgb8();
        let b = image::open(&second).unwrap().to_rgb8();
        assert_eq!((a.width(), a.height()), (500, 500));
        assert_ne!(a, b);
        assert_eq!(&b, frame.image());
        // The first snapshot has only the first sphere.
        assert_eq!(*a.get_pixel(350, 149), BLACK);
        assert_ne!(*b.get_pixel(350, 149), BLACK);
    }

    #[test]
    fn save_to_unknown_format_is_a_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::default();
        let mut interp = Interpreter::new(SoftwareBackend::new(&config), &config);
        let err = interp
            .execute(
                &[
                    Operation::Push,
                    Operation::Save {
                        filename: dir.path().join("frame.nope"),
                    },
                ],
                &SymbolTable::new(),
            )
            .unwrap_err();
        assert!(matches!(err, ExecError::Backend { index: 1, .. }), "{err:?}");
        assert_eq!(interp.origins().depth(), 2);
    }

    #[test]
    fn display_without_viewer_only_counts() {
        let config = EngineConfig::default();
        let (_, backend) = execute(
            &[Operation::Display, Operation::Display],
            &SymbolTable::new(),
            SoftwareBackend::new(&config),
            &config,
        )
        .unwrap();
        assert_eq!(backend.display_count(), 2);
    }
}

mod demos {
    use super::*;

    #[test]
    fn every_demo_renders_something() {
        for demo in Demo::ALL {
            let script = demo.script();
            let config = EngineConfig::default();
            let (summary, backend) = execute(
                &script.commands,
                &script.symbols,
                SoftwareBackend::new(&config),
                &config,
            )
            .unwrap_or_else(|e| panic!("{}: {e}", demo.name()));
            assert_eq!(summary.executed, script.len());
            assert!(lit_pixels(backend.frame()) > 0, "{} drew nothing", demo.name());
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        for demo in Demo::ALL {
            let script = demo.script();
            let a = render_script(&script.commands, &script.symbols);
            let b = render_script(&script.commands, &script.symbols);
            assert_eq!(a.image(), b.image(), "{}", demo.name());
        }
    }

    #[test]
    fn demo_saves_through_the_script() {
        let dir = tempfile::tempdir().unwrap();
        let out: PathBuf = dir.path().join("robot.png");
        let mut script = Demo::Robot.script();
        script.commands.push(Operation::Save {
            filename: out.clone(),
        });

        let frame = render_script(&script.commands, &script.symbols);
        let saved = image::open(&out).unwrap().to_rgb8();
        assert_eq!(&saved, frame.image());
    }

    fn render_script(commands: &[Operation], symbols: &SymbolTable) -> FrameBuffer {
        let config = EngineConfig::default();
        let (_, backend) =
            execute(commands, symbols, SoftwareBackend::new(&config), &config).unwrap();
        backend.frame().clone()
    }
}
