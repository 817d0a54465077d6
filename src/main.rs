//! species-atlas - interactive species search over NY biodiversity data
//!
//! Usage:
//!   species-atlas <DATA_FILE> [--quit-word <WORD>] [--no-header] [--log-filter <FILTER>]

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use species_atlas::config::AtlasConfig;
use species_atlas::ingest::load_catalog;
use species_atlas::session::SearchSession;

fn main() -> anyhow::Result<()> {
    let config = AtlasConfig::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    config.validate()?;

    let file = File::open(&config.data_file)
        .with_context(|| format!("opening {}", config.data_file.display()))?;
    let (catalog, report) = load_catalog(BufReader::new(file), &config.ingest_options())
        .with_context(|| format!("loading {}", config.data_file.display()))?;
    tracing::info!(%report, "ready for searches");

    let session = SearchSession::new(&catalog, config.quit_word.as_str());
    let stdin = io::stdin();
    session.run(stdin.lock(), &mut io::stdout().lock(), &mut io::stderr().lock())?;

    Ok(())
}
