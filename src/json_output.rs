//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per uso programmatico.
//!
//! ## Responsabilità:
//! - Emette messaggi JSON su stdout (una riga per evento)
//! - I log testuali restano su stderr, quindi stdout resta parsabile
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio conversione, numero di candidati e configurazione
//! - `file_complete`: Esito di un singolo file
//! - `complete`: Fine esecuzione con statistiche finali

use crate::{config::ConversionSettings, converter::task_converter::FileOutcome, stats::RunStatistics};
use serde::Serialize;
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    /// Inizio del processo di conversione
    Start {
        root: PathBuf,
        total_files: usize,
        settings: ConversionSettings,
    },

    /// Fine elaborazione di un file specifico
    FileComplete {
        source: PathBuf,
        target: PathBuf,
        outcome: FileOutcome,
    },

    /// Processo completato
    Complete {
        #[serde(flatten)]
        stats: RunStatistics,
        duration_seconds: f64,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(settings: &ConversionSettings, total_files: usize) -> Self {
        Self::Start {
            root: settings.root.clone(),
            total_files,
            settings: settings.clone(),
        }
    }

    pub fn file_complete(source: PathBuf, target: PathBuf, outcome: FileOutcome) -> Self {
        Self::FileComplete { source, target, outcome }
    }

    pub fn complete(stats: RunStatistics, duration_seconds: f64) -> Self {
        Self::Complete { stats, duration_seconds }
    }
}
