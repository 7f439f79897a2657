//! Main entry point for the kpak CLI application.
//!
//! Dispatches to extract, pack or list mode based on the parsed arguments.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kpak::cli::Mode;
use kpak::{Cli, PakArchive, PakExtractor, PakImporter, load_archive, store_archive};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.mode() {
        Mode::Extract => extract(&cli).await,
        Mode::Pack => pack(&cli).await,
        Mode::List => list(&cli).await,
    }
}

/// Extract the input archive into the output folder.
async fn extract(cli: &Cli) -> Result<()> {
    let archive = load_archive(&cli.input)
        .await
        .with_context(|| format!("Couldn't read PAK file {}", cli.input.display()))?;

    let output = cli.output_path();
    let summary = PakExtractor::new(&output).extract(&archive).await?;

    info!(
        "Extracted {} entries to {} ({} skipped)",
        summary.written,
        output.display(),
        summary.skipped
    );
    Ok(())
}

/// Pack every file under the input folder into the output archive.
async fn pack(cli: &Cli) -> Result<()> {
    let mut archive = PakArchive::new();
    PakImporter::new()
        .empty_files(cli.empty_file_policy())
        .import(&cli.input, &mut archive)
        .await?;

    let output = cli.output_path();
    let written = store_archive(&output, &archive)
        .await
        .with_context(|| format!("Couldn't write PAK file {}", output.display()))?;

    info!(
        "Packed {} entries into {} ({} bytes)",
        archive.len(),
        output.display(),
        written
    );
    Ok(())
}

/// Print the entries of the input archive.
async fn list(cli: &Cli) -> Result<()> {
    let archive = load_archive(&cli.input)
        .await
        .with_context(|| format!("Couldn't read PAK file {}", cli.input.display()))?;
    println!("{}", archive);
    Ok(())
}
