/// Sutra Player - terminal host
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use sutra_cli::{CliConfig, Session};
use sutra_core::Catalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "sutra")]
#[command(about = "Sutra Player playlist controller in the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./sutra.toml when present)
    #[arg(short, long, global = true, env = "SUTRA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a catalog from a command session
    Play {
        /// Catalog file (.json or .toml)
        catalog: PathBuf,
        /// Read commands from a file instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
    /// Validate a catalog and list its tracks
    Check {
        /// Catalog file (.json or .toml)
        catalog: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Play { catalog, script } => play(&config, &catalog, script.as_deref()),
        Commands::Check { catalog } => check(&catalog),
    }
}

fn play(config: &CliConfig, catalog_path: &Path, script: Option<&Path>) -> anyhow::Result<()> {
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;
    tracing::info!(tracks = catalog.len(), "Catalog loaded");

    let mut session = Session::new(catalog, config)?;
    let stdout = io::stdout().lock();

    match script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), stdout, true)?;
        }
        None => {
            tracing::info!("Reading commands from stdin (type 'help')");
            session.run(io::stdin().lock(), stdout, false)?;
        }
    }

    Ok(())
}

fn check(catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{}: {} tracks, {} texts",
        catalog_path.display(),
        catalog.len(),
        catalog.texts().len()
    )?;

    for (index, track) in catalog.tracks().iter().enumerate() {
        let text = track.text_key().unwrap_or("-");
        let (title, source) = (&track.title, &track.source_uri);
        writeln!(out, "  #{index} {title} [{source}] text={text}")?;
        if !track.is_playable() {
            writeln!(out, "     warning: no source, track cannot be selected")?;
        }
    }

    for (index, key) in catalog.dangling_text_keys() {
        writeln!(
            out,
            "  warning: #{index} refers to missing text '{key}' (fallback shown)"
        )?;
    }

    if catalog.is_empty() {
        writeln!(out, "  warning: catalog is empty")?;
    }

    Ok(())
}
