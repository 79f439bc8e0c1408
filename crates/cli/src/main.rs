#![deny(unsafe_code)]
//! CLI binary for the field-line generator.
//!
//! Subcommands:
//! - `field-lines`: synthesize, trace and write the field-line outputs
//! - `double-slit`: write the double-slit diagram
//! - `list`: print presets and palettes

mod config;
mod error;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use config::{parse_params, FileConfig};
use error::CliError;
use fieldlines_core::{FieldConfig, Palette, Simulation};

#[derive(Parser)]
#[command(name = "fieldlines", about = "Electric field-line and double-slit diagrams")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trace field lines and write field_lines.svg, streamlines.png and
    /// field_strength.png.
    FieldLines {
        /// JSON config file with optional `field` and `render` sections.
        #[arg(short, long, conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Named starting configuration (clamped, threshold).
        #[arg(long)]
        preset: Option<String>,

        /// Flat JSON object of overrides, e.g. '{"step_size": 0.02}'.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Directory for the output files.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Write double-slit.svg and double-slit.png.
    DoubleSlit {
        /// JSON config file with an optional `double_slit` section.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Flat JSON object of overrides, e.g. '{"spacing": 0.04}'.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Directory for the output files.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// List presets and palettes.
    List,
}

fn ensure_dir(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| CliError::Io(format!("cannot create {}: {e}", dir.display())))
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = FieldConfig::list_presets();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "presets": presets,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::FieldLines {
            config,
            preset,
            params,
            out_dir,
        } => {
            let params = parse_params(&params)?;
            let mut file = FileConfig::resolve(config.as_deref(), preset.as_deref())?;
            file.field.apply_params(&params)?;
            file.render.apply_params(&params)?;

            let sim = Simulation::run(&file.field)?;
            ensure_dir(&out_dir)?;
            let written = fieldlines_render::write_field_lines(&sim, &file.render, &out_dir)?;

            let mut terminations: BTreeMap<String, usize> = BTreeMap::new();
            for line in sim.streamlines() {
                let key = serde_json::to_value(line.termination)?
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                *terminations.entry(key).or_default() += 1;
            }

            if cli.json {
                let info = serde_json::json!({
                    "seeds": sim.seeds().len(),
                    "streamlines": sim.streamlines().len(),
                    "points": sim.point_count(),
                    "terminations": terminations,
                    "outputs": display_paths(&written),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "traced {} streamlines from {} seeds ({} points)",
                    sim.streamlines().len(),
                    sim.seeds().len(),
                    sim.point_count()
                );
                for (reason, count) in &terminations {
                    eprintln!("  {reason}: {count}");
                }
                for path in display_paths(&written) {
                    eprintln!("wrote {path}");
                }
            }
        }
        Command::DoubleSlit {
            config,
            params,
            out_dir,
        } => {
            let params = parse_params(&params)?;
            let mut file = FileConfig::resolve(config.as_deref(), None)?;
            file.double_slit.apply_params(&params)?;

            ensure_dir(&out_dir)?;
            let written = fieldlines_render::write_double_slit(&file.double_slit, &out_dir)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": file.double_slit.width,
                    "height": file.double_slit.height,
                    "outputs": display_paths(&written),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for path in display_paths(&written) {
                    eprintln!("wrote {path}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("exiting with code {}", e.exit_code());
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
