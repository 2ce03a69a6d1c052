pub mod cli;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use kanji_core::{build_document, BuildOptions, Document};

use crate::cli::Cli;

/// Read a TSV file and build the document from it.
pub fn build_from_path(path: &Path, options: &BuildOptions) -> anyhow::Result<Document> {
    tracing::info!("Reading {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let document = build_document(&content, options)
        .with_context(|| format!("failed to build document from {}", path.display()))?;

    let fingerprint = document.fingerprint()?;
    tracing::info!(
        entries = document.entries.len(),
        %fingerprint,
        "Built document"
    );
    Ok(document)
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let options = BuildOptions {
        source_url: cli.source_url,
        built_at: Utc::now(),
    };
    let document = build_from_path(&cli.kanjidic, &options)?;
    let json = document.to_json_pretty()?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}
