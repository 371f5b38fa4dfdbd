//! # Task Converter Module
//!
//! Worker per la conversione di un singolo candidato.
//! Separato dall'orchestratore per poter essere testato senza walk.
//!
//! ## Esiti possibili (tutti terminali, nessun retry):
//! - `DryRun`: nessuna modifica, solo log "would convert"
//! - `Converted`: `.webp` scritto, originale eventualmente rimosso
//! - `Skipped`: target già esistente con `skip_existing` (i `.webp` esistenti vengono esclusi a monte)
//! - `Failed`: errore di decodifica/codifica/I/O, loggato e contato a parte

use crate::{
    config::ConversionSettings,
    converter::path_resolver::CandidateFile,
    image_processor::ImageProcessor,
};
use serde::Serialize;
use std::fs;
use tracing::{debug, error, info};

/// Terminal state of one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    DryRun,
    Converted { deleted_original: bool },
    Skipped,
    Failed { error: String },
}

/// Executes (or simulates) the conversion of single files
#[derive(Debug, Clone)]
pub struct TaskConverter {
    processor: ImageProcessor,
    dry_run: bool,
    delete_originals: bool,
    skip_existing: bool,
}

impl TaskConverter {
    pub fn new(settings: &ConversionSettings) -> Self {
        Self {
            processor: ImageProcessor::new(settings),
            dry_run: settings.dry_run,
            delete_originals: settings.delete_originals,
            skip_existing: settings.skip_existing,
        }
    }

    /// Process one candidate. Per-file errors are logged and reported, never propagated.
    pub fn process(&self, candidate: &CandidateFile) -> FileOutcome {
        let relative = candidate.relative.display().to_string();
        let relative_target = candidate.relative_target().display().to_string();

        if self.skip_existing && candidate.target.exists() {
            debug!("Skipping, output already exists: {}", relative_target);
            return FileOutcome::Skipped;
        }

        if self.dry_run {
            info!("[DRY-RUN] Would convert: {:<50} → {}", relative, relative_target);
            return FileOutcome::DryRun;
        }

        match self.processor.convert(&candidate.source, &candidate.target) {
            Ok((width, height)) => {
                info!("Converted: {:<50} → {} ({}x{})", relative, relative_target, width, height);
                let deleted_original = self.delete_original(candidate, &relative);
                FileOutcome::Converted { deleted_original }
            }
            Err(e) => {
                error!("Error converting {}: {}", relative, e);
                FileOutcome::Failed { error: e.to_string() }
            }
        }
    }

    fn delete_original(&self, candidate: &CandidateFile, relative: &str) -> bool {
        // A WebP source is its own output
        if !self.delete_originals || candidate.is_in_place() {
            return false;
        }

        match fs::remove_file(&candidate.source) {
            Ok(()) => {
                info!("Deleted original: {}", relative);
                true
            }
            Err(e) => {
                error!("Error deleting {}: {}", relative, e);
                false
            }
        }
    }
}
