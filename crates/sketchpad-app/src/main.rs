//! Main application entry point.

mod script;

use clap::{Parser, Subcommand};
use sketchpad_core::storage::FileStorage;
use sketchpad_core::{
    ConfigError, EditorConfig, Snapshot, Storage, StorageError, Surface, SurfaceError,
};
use sketchpad_render::{RasterSurface, raster_editor};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(version, about = "Freehand and shape drawing canvas with undo history")]
struct Cli {
    /// Directory holding saved drawings (defaults to the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Editor config file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON action script on a fresh canvas
    Run {
        /// Script file: a JSON array of actions
        script: PathBuf,

        /// Write the final canvas to this PNG file
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Write the saved drawing to a PNG file
    Export {
        #[arg(long, short = 'o', value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("No saved drawing found under {0:?}")]
    NothingSaved(String),
}

fn read_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), AppError> {
    std::fs::write(path, data).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn open_storage(store: Option<PathBuf>) -> Result<Arc<dyn Storage>, AppError> {
    let storage = match store {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    log::info!("Using drawing store at {}", storage.base_path().display());
    Ok(Arc::new(storage))
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let storage = open_storage(cli.store)?;

    match cli.command {
        Command::Run { script, output } => {
            let actions = script::parse_script(&read_file(&script)?)?;
            log::info!("Replaying {} actions from {}", actions.len(), script.display());

            let mut editor = raster_editor(storage, config);
            for notice in script::replay(&mut editor, &actions).await {
                println!("{notice}");
            }

            if let Some(output) = output {
                write_file(&output, &editor.surface().to_png()?)?;
                log::info!("Wrote {}", output.display());
            }
        }
        Command::Export { output } => {
            let bytes = storage
                .get(&config.storage_key)
                .await?
                .ok_or_else(|| AppError::NothingSaved(config.storage_key.clone()))?;

            // Restore onto a canvas of the configured size, as load would.
            let mut surface = RasterSurface::new(config.width, config.height, config.background);
            surface.restore(&Snapshot::from(bytes), config.background)?;
            write_file(&output, &surface.to_png()?)?;
            log::info!("Exported {:?} to {}", config.storage_key, output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Sketchpad");

    let cli = Cli::parse();
    match pollster::block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("sketchpad: {e}");
            ExitCode::FAILURE
        }
    }
}
