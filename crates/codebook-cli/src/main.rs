//! Codebook ingestion binary.
//!
//! Reads every workbook in a codebook directory, logs diagnostics through
//! `tracing`, and optionally exports each version as a TSV file.

mod export;

use std::path::{Path, PathBuf};

use codebook_loader::{CodebookError, CodebookManager, RunConfig, TracingSink};
use codebook_types::StatusCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CODEBOOK_DIR: &str = ".";
const DEFAULT_LANGUAGES: &str = "nl";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config_from_env()?;
    let codebook_dir = config
        .codebook_directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CODEBOOK_DIR));

    tracing::info!(
        "Reading codebooks from: {} (languages: {}, status: {})",
        codebook_dir.display(),
        config.languages.join(","),
        config.status_code
    );

    let manager = CodebookManager::ingest_directory(&codebook_dir, &config, &TracingSink)?;

    if manager.is_empty() {
        tracing::warn!("No codebooks found in {}", codebook_dir.display());
        return Ok(());
    }

    for (version, codebook) in manager.iter() {
        let stats = codebook.stats();
        tracing::info!(
            "Version {} ({}): {} concepts ({:.1}% of rows), {} rejected rows, {} code list entries",
            version,
            codebook.effective_date(),
            stats.concepts_accepted,
            stats.acceptance_rate(),
            stats.rows_rejected,
            stats.code_list_entries
        );

        let missing = codebook.missing_columns();
        if !missing.is_empty() {
            tracing::warn!("Version {} is missing columns: {}", version, missing.join(", "));
        }

        let dangling = codebook.dangling_parents().count();
        if dangling > 0 {
            tracing::warn!("Version {} has {} concepts with an unknown parent", version, dangling);
        }
    }

    tracing::info!("Loaded versions: {:?}", manager.version_numbers());

    if let Ok(export_dir) = std::env::var("CODEBOOK_EXPORT_DIR") {
        let written = export::export_all(&manager, &config.languages, Path::new(&export_dir))?;
        tracing::info!("Exported {} codebooks to {}", written.len(), export_dir);
    }

    Ok(())
}

/// Builds the run configuration from `CODEBOOK_*` environment variables.
fn config_from_env() -> Result<RunConfig, CodebookError> {
    let languages = std::env::var("CODEBOOK_LANGUAGES")
        .unwrap_or_else(|_| DEFAULT_LANGUAGES.to_string());

    let status_code = match std::env::var("CODEBOOK_STATUS") {
        Ok(label) => StatusCode::from_label(&label).ok_or_else(|| {
            CodebookError::InvalidConfig(format!("unknown status code: {label}"))
        })?,
        Err(_) => StatusCode::default(),
    };

    let mut config = RunConfig::new(languages.split(','), status_code);
    if let Ok(dir) = std::env::var("CODEBOOK_DIR") {
        config = config.with_directory(dir);
    }

    config.validate()?;
    Ok(config)
}
