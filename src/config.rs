//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione di una singola esecuzione.
//!
//! ## Responsabilità:
//! - Definisce la struct `ConversionSettings` con tutti i parametri di conversione
//! - Fornisce validazione dei parametri prima dell'avvio della scansione
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `root`: Directory radice da scansionare
//! - `ignore_folders`: Nomi di cartelle da saltare (intero sottoalbero)
//! - `allow_folders`: Nomi di cartelle ammesse (vuoto = tutte)
//! - `quality`: Qualità WebP (1-100, default: 75)
//! - `method`: Sforzo di compressione (0-6, default: 6, 6 = più lento/più piccolo)
//! - `resize`: Bounding box opzionale (mai upscaling)
//! - `delete_originals`: Rimuove gli originali dopo la conversione
//! - `dry_run`: Simulazione senza modifiche al filesystem
//! - `skip_existing`: Non riconverte file il cui `.webp` esiste già
//! - `workers`: Numero di worker paralleli (default: 1 = sequenziale)
//!
//! ## Validazione:
//! - Controlla che quality sia 1-100
//! - Controlla che method sia 0-6
//! - Controlla che il bounding box non abbia dimensioni nulle
//! - Controlla che workers sia > 0
//!
//! ## Esempio:
//! ```rust
//! use webp_converter::ConversionSettings;
//!
//! let settings = ConversionSettings {
//!     quality: 85,
//!     method: 4,
//!     ..Default::default()
//! };
//! settings.validate().unwrap();
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default WebP quality
pub const DEFAULT_QUALITY: u8 = 75;
/// Default compression effort (best)
pub const DEFAULT_METHOD: u8 = 6;
/// Highest compression effort supported by libwebp
pub const MAX_METHOD: u8 = 6;

/// Maximum bounding box for resized output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeBound {
    pub width: u32,
    pub height: u32,
}

impl ResizeBound {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Immutable settings for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Root directory to scan
    pub root: PathBuf,
    /// Folder names whose subtree is skipped (case-insensitive)
    pub ignore_folders: Vec<String>,
    /// Folder names whose files are processed; empty means all
    pub allow_folders: Vec<String>,
    /// WebP quality (1-100)
    pub quality: u8,
    /// Compression effort (0 = fastest, 6 = best)
    pub method: u8,
    /// Optional bounding box, images are only ever shrunk
    pub resize: Option<ResizeBound>,
    /// Delete originals after a successful conversion
    pub delete_originals: bool,
    /// Dry run - log what would happen without touching files
    pub dry_run: bool,
    /// Skip candidates whose `.webp` target already exists
    pub skip_existing: bool,
    /// Number of parallel conversion workers
    pub workers: usize,
    /// Output progress and summary as JSON on stdout
    pub json_output: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore_folders: Vec::new(),
            allow_folders: Vec::new(),
            quality: DEFAULT_QUALITY,
            method: DEFAULT_METHOD,
            resize: None,
            delete_originals: false,
            dry_run: false,
            skip_existing: false,
            workers: 1,
            json_output: false,
        }
    }
}

impl ConversionSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(anyhow::anyhow!("WebP quality must be between 1 and 100"));
        }

        if self.method > MAX_METHOD {
            return Err(anyhow::anyhow!("Compression method must be between 0 and {}", MAX_METHOD));
        }

        if let Some(bound) = self.resize {
            if bound.width == 0 || bound.height == 0 {
                return Err(anyhow::anyhow!(
                    "Resize bound must be positive, got {}x{}",
                    bound.width,
                    bound.height
                ));
            }
        }

        if self.workers == 0 {
            return Err(anyhow::anyhow!("Number of workers must be greater than 0"));
        }

        Ok(())
    }
}
