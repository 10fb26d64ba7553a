//! snapview - render and script layout documents without a window.
//!
//! Loads a layout document into a headless editor session, then either
//! writes the preview to a PNG or replays a JSON input script against it.

use anyhow::{bail, Context, Result};
use api::{parse_script, Session};
use clap::{Parser, Subcommand};
use editor::{DevicePreset, EditorSettings, GRID_SIZES};
use layout::LayoutDocument;
use std::path::{Path, PathBuf};
use theme::{Theme, ThemePreset};
use tracing_subscriber::EnvFilter;

/// Headless preview and scripting for layout documents
#[derive(Parser)]
#[command(name = "snapview")]
#[command(about = "Render and script layout documents")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor settings JSON file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a layout document to a PNG
    Render {
        /// Layout document (JSON)
        layout: PathBuf,

        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,

        /// Device preset: pc, phone, tablet, square or WIDTHxHEIGHT
        #[arg(short, long, value_parser = parse_preset)]
        preset: Option<DevicePreset>,

        /// Theme: light or dark
        #[arg(short, long)]
        theme: Option<ThemePreset>,
    },

    /// Replay an input script and print query results as JSON lines
    Run {
        /// Layout document (JSON)
        layout: PathBuf,

        /// Script: a JSON array of {"command": ...} and {"query": ...} steps
        script: PathBuf,

        /// Also write the final preview to a PNG
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the edited layout document back out as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// List device and grid presets
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            layout,
            output,
            preset,
            theme,
        } => {
            let mut settings = load_settings(cli.settings.as_deref())?;
            if let Some(preset) = preset {
                settings.device_preset = preset;
            }
            let mut session = open_session(&layout, settings)?;
            if let Some(theme) = theme {
                session.set_theme(Theme::from_preset(theme));
            }
            save_preview(&session, &output)
        }
        Commands::Run {
            layout,
            script,
            output,
            save,
        } => {
            let settings = load_settings(cli.settings.as_deref())?;
            let mut session = open_session(&layout, settings)?;
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let steps = parse_script(&json)
                .with_context(|| format!("Invalid script {}", script.display()))?;

            for result in session.run_script(steps) {
                println!("{}", serde_json::to_string(&result)?);
            }
            if let Some(output) = output {
                save_preview(&session, &output)?;
            }
            if let Some(save) = save {
                let json = session.editor().tree().to_document().to_json_pretty()?;
                std::fs::write(&save, json)
                    .with_context(|| format!("Failed to write {}", save.display()))?;
            }
            Ok(())
        }
        Commands::Presets => {
            println!("Device presets:");
            for preset in DevicePreset::BUILT_IN {
                println!("  {preset}");
            }
            let grids: Vec<String> = GRID_SIZES.iter().map(|size| size.to_string()).collect();
            println!("Grid sizes: {}", grids.join(", "));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<EditorSettings> {
    match path {
        Some(path) => EditorSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(EditorSettings::default()),
    }
}

fn open_session(layout: &Path, settings: EditorSettings) -> Result<Session> {
    let json = std::fs::read_to_string(layout)
        .with_context(|| format!("Failed to read layout {}", layout.display()))?;
    let document = LayoutDocument::from_json(&json)
        .with_context(|| format!("Invalid layout {}", layout.display()))?;
    tracing::info!(nodes = document.nodes.len(), preset = %settings.device_preset, "layout loaded");
    Ok(Session::from_document(&document, settings)?)
}

fn save_preview(session: &Session, output: &Path) -> Result<()> {
    let mut editor = session.editor_mut();
    editor.render();
    let Some(image) = editor.image() else {
        bail!("The preview surface is not available");
    };
    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote {}x{} preview to {}", image.width(), image.height(), output.display());
    Ok(())
}

/// Parse a preset name or a `WIDTHxHEIGHT` resolution.
fn parse_preset(value: &str) -> Result<DevicePreset, String> {
    let preset = match value.to_ascii_lowercase().as_str() {
        "pc" => DevicePreset::Pc,
        "phone" => DevicePreset::Phone,
        "tablet" => DevicePreset::Tablet,
        "square" => DevicePreset::Square,
        custom => {
            let (width, height) = custom
                .split_once('x')
                .ok_or_else(|| format!("unknown preset {value:?}"))?;
            let width: u32 = width.parse().map_err(|_| format!("bad width in {value:?}"))?;
            let height: u32 = height.parse().map_err(|_| format!("bad height in {value:?}"))?;
            if width == 0 || height == 0 {
                return Err(format!("resolution {value:?} must be non-zero"));
            }
            DevicePreset::Custom { width, height }
        }
    };
    Ok(preset)
}
