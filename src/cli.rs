//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::{load_config, MetascreensConfig};
use crate::models::{ScreenId, TilesetName};
use crate::plan::apply_plan;
use crate::registry::Metascreens;
use crate::rom::MemoryRom;
use crate::table::{load_table, LoadError};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// msc - inspect and patch metascreen catalogs
#[derive(Parser)]
#[command(name = "msc")]
#[command(about = "Inspect and patch metascreen catalogs")]
#[command(version)]
pub struct Cli {
    /// Path to metascreens.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report screens that repeat an exit type
    Check {
        /// JSON screen table
        table: PathBuf,
    },
    /// List the screens under an id after applying the configured fixes
    Lookup {
        /// JSON screen table
        table: PathBuf,

        /// Screen id (decimal, 0x-hex, or negative for virtual ids)
        #[arg(long, allow_hyphen_values = true)]
        id: String,

        /// Only list screens placeable in this tileset
        #[arg(long)]
        tileset: Option<String>,
    },
    /// Apply the configured fixes and renumbers and print the resulting catalog as JSON
    Apply {
        /// JSON screen table
        table: PathBuf,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if cli.debug {
        config.catalog.debug = true;
    }

    match cli.command {
        Commands::Check { table } => run_check(&table, &config),
        Commands::Lookup { table, id, tileset } => {
            run_lookup(&table, &config, &id, tileset.as_deref())
        }
        Commands::Apply { table } => run_apply(&table, &config),
    }
}

/// Load the table and build the catalog, reporting failures.
fn build(table: &Path, config: &MetascreensConfig) -> Result<(Metascreens, MemoryRom), ExitCode> {
    let loaded = load_table(table).and_then(|t| t.build(config.catalog.clone()));
    loaded.map_err(|e| {
        eprintln!("Error: {}", e);
        match e {
            LoadError::Io(_) | LoadError::Json(_) => ExitCode::from(EXIT_INVALID_ARGS),
            LoadError::Catalog(_) => ExitCode::from(EXIT_ERROR),
        }
    })
}

fn run_check(table: &Path, config: &MetascreensConfig) -> ExitCode {
    let (catalog, _rom) = match build(table, config) {
        Ok(built) => built,
        Err(code) => return code,
    };

    let warnings = catalog.check_exit_types();
    for warning in &warnings {
        println!("{}", warning);
    }
    println!("{} screen(s), {} warning(s)", catalog.len(), warnings.len());
    ExitCode::from(EXIT_SUCCESS)
}

fn run_lookup(
    table: &Path,
    config: &MetascreensConfig,
    id: &str,
    tileset: Option<&str>,
) -> ExitCode {
    let id: ScreenId = match id.parse() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let tileset = match tileset.map(|name| TilesetName::from_name(name).ok_or(name)) {
        None => None,
        Some(Ok(t)) => Some(t),
        Some(Err(name)) => {
            eprintln!("Error: unknown tileset '{}'", name);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let (mut catalog, mut rom) = match build(table, config) {
        Ok(built) => built,
        Err(code) => return code,
    };
    for step in &config.fixes {
        if let Err(e) = catalog.register_fix(step.name, step.seed, &mut rom) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    for handle in catalog.get_by_id(id, tileset) {
        let screen = catalog.screen(handle);
        let active: Vec<String> = screen.active_tilesets().map(|t| t.to_string()).collect();
        println!("{} {} [{}]", screen.uid(), screen.name(), active.join(", "));
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn run_apply(table: &Path, config: &MetascreensConfig) -> ExitCode {
    let (mut catalog, mut rom) = match build(table, config) {
        Ok(built) => built,
        Err(code) => return code,
    };
    if let Err(e) = apply_plan(&mut catalog, config, &mut rom) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    match serde_json::to_string_pretty(&catalog.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
