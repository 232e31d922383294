//! Studioview CLI
//!
//! Scrape saved listing pages and browse galleries without a browser.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use studio_listing::{parse_listing, DirectoryListingSource, HttpListingSource};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod browse;
mod config;

use browse::{BrowseOptions, Source};

#[derive(Parser)]
#[command(name = "studio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Studioview gallery CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a saved listing page and print its records
    Scrape {
        /// Listing document
        file: PathBuf,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Page through a gallery in a headless document
    Browse {
        /// Container to browse
        container: String,

        /// Configuration file (defaults to ./studio.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Read pages from <DIR>/<container>/<page>.html instead of the network
        #[arg(short, long)]
        fixtures: Option<PathBuf>,

        /// Stop after this many pages
        #[arg(short, long)]
        pages: Option<u32>,

        /// Shuffle each page
        #[arg(short, long)]
        shuffle: bool,

        /// Viewport height in pixels
        #[arg(long, default_value = "600")]
        viewport: f32,
    },

    /// Write a default configuration file
    Init {
        /// Where to write it
        #[arg(short, long, default_value = config::CONFIG_FILE)]
        path: PathBuf,

        /// Container to put in the file
        #[arg(short, long, default_value = "")]
        container: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Scrape { file, json } => cmd_scrape(&file, json),

        Commands::Browse {
            container,
            config,
            fixtures,
            pages,
            shuffle,
            viewport,
        } => cmd_browse(
            &container,
            config.as_deref(),
            fixtures,
            pages,
            shuffle,
            viewport,
        ),

        Commands::Init {
            path,
            container,
            force,
        } => cmd_init(&path, &container, force),
    }
}

fn cmd_scrape(file: &Path, json: bool) -> Result<()> {
    let document =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let page = parse_listing(&document)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    for record in &page.records {
        println!("{}\t{}\t{}", record.id, record.title, record.author);
    }
    println!();
    println!(
        "{} records, {}",
        page.len(),
        if page.has_more {
            "more pages follow"
        } else {
            "last page"
        }
    );

    Ok(())
}

fn cmd_browse(
    container: &str,
    config_path: Option<&Path>,
    fixtures: Option<PathBuf>,
    pages: Option<u32>,
    shuffle: bool,
    viewport: f32,
) -> Result<()> {
    if !(viewport.is_finite() && viewport > 0.0) {
        anyhow::bail!("Invalid viewport height {}", viewport);
    }

    let mut config = config::load(config_path, container)?;
    if shuffle {
        config.shuffle = true;
    }

    let source = match fixtures {
        Some(dir) => {
            info!("Browsing {} from {}", config.container_id, dir.display());
            Source::Directory(DirectoryListingSource::new(dir))
        }
        None => {
            info!("Browsing {} from {}", config.container_id, config.listing_url);
            Source::Http(HttpListingSource::new(config.listing_url.clone()))
        }
    };

    let options = BrowseOptions {
        max_pages: pages,
        viewport,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let report = runtime.block_on(browse::browse(config, &source, &options))?;

    for event in &report.events {
        debug!(?event, "gallery event");
    }

    for (index, card) in report.cards.iter().enumerate() {
        println!(
            "{:>4}  {:<10} {} ({}){}",
            index + 1,
            card.id,
            card.title,
            card.author,
            if card.image_loaded { "" } else { " [image pending]" }
        );
    }
    println!();
    println!(
        "{} cards from {} pages, {} images pending, gallery {}",
        report.cards.len(),
        report.pages,
        report.pending_images,
        report.state
    );

    Ok(())
}

fn cmd_init(path: &Path, container: &str, force: bool) -> Result<()> {
    config::write_default(path, container, force)?;
    info!("Wrote {}", path.display());
    if container.is_empty() {
        info!("Set container_id, or pass a container to `studio browse`");
    }
    Ok(())
}
