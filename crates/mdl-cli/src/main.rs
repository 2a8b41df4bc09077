//! MDL demo runner.
//!
//! Runs a built-in demo script through the interpreter with the software
//! backend, then saves (and optionally displays) the final frame.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use mdl_core::config::{DEFAULT_RESOLUTION, DEFAULT_STEP};
use mdl_core::render::Rgb;
use mdl_core::scene::demos::Demo;
use mdl_core::{EngineConfig, Interpreter, Operation, SoftwareBackend};

#[derive(Parser)]
#[command(name = "mdl")]
#[command(about = "Render the built-in MDL demo scenes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in demos
    List,
    /// Run a demo and save the final frame
    Render {
        /// Demo name (see `mdl list`)
        demo: String,

        /// Output image; the format follows the extension (.png or .ppm)
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,

        /// Display the frame after saving it
        #[arg(long)]
        display: bool,

        /// Viewer program to open the frame with on display
        #[arg(long)]
        viewer: Option<String>,

        /// Sampling step for spheres and tori
        #[arg(long, default_value_t = DEFAULT_STEP)]
        step: usize,

        /// Frame width in pixels
        #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
        height: u32,

        /// Line color as R,G,B
        #[arg(long, value_parser = parse_rgb)]
        line_color: Option<Rgb<u8>>,
    },
}

/// Parse "R,G,B" with 0-255 channels.
fn parse_rgb(s: &str) -> Result<Rgb<u8>, String> {
    let channels: Vec<u8> = s
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|e| format!("'{c}': {e}")))
        .collect::<Result<_, _>>()?;
    match channels[..] {
        [r, g, b] => Ok(Rgb([r, g, b])),
        _ => Err(format!("expected R,G,B, got '{s}'")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.quiet {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    }

    match cli.command {
        Commands::List => {
            for demo in Demo::ALL {
                println!("{:<10} {}", demo.name(), demo.description());
            }
        }
        Commands::Render {
            demo,
            output,
            display,
            viewer,
            step,
            width,
            height,
            line_color,
        } => {
            let demo = Demo::from_name(&demo)
                .ok_or_else(|| anyhow!("unknown demo '{demo}' (try `mdl list`)"))?;

            let defaults = EngineConfig::default();
            let config = EngineConfig {
                width,
                height,
                step,
                line_color: line_color.unwrap_or(defaults.line_color),
                display_command: viewer,
                ..defaults
            };

            let mut script = demo.script();
            script.commands.push(Operation::Save {
                filename: output.clone(),
            });
            if display {
                script.commands.push(Operation::Display);
            }

            log::info!("rendering '{}' ({} commands)", demo.name(), script.len());
            let mut interp = Interpreter::new(SoftwareBackend::new(&config), &config);
            let summary = interp
                .execute(&script.commands, &script.symbols)
                .with_context(|| format!("rendering demo '{}'", demo.name()))?;

            if !cli.quiet {
                eprintln!(
                    "Success: {} -> {} ({} solids, {} lines)",
                    demo.name(),
                    output.display(),
                    summary.solids,
                    summary.lines
                );
            }
        }
    }

    Ok(())
}
