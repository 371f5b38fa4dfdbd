//! # Run Statistics Module
//!
//! Questo modulo traccia le statistiche di una singola esecuzione.
//!
//! ## Statistiche tracciate:
//! - **converted**: File convertiti (o che sarebbero convertiti in dry-run)
//! - **skipped**: File saltati perché il target `.webp` esiste già (`--skip-existing`)
//! - **failed**: File la cui conversione è fallita
//!
//! I fallimenti non entrano né in `converted` né in `skipped`: sono tracciati
//! a parte in `failed`.

use crate::converter::task_converter::FileOutcome;
use serde::Serialize;

/// Statistics accumulator for one conversion run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::DryRun | FileOutcome::Converted { .. } => self.converted += 1,
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }

    pub fn format_summary(&self) -> String {
        format!(
            "=== Conversion Summary: {} converted, {} skipped, {} failed ===",
            self.converted, self.skipped, self.failed
        )
    }
}
