//! # WebP Converter Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per i test
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione della conversione e validazione parametri
//! - `error`: Tipi di errore per la conversione di un singolo file
//! - `filter`: Filtro directory (ignore/allow)
//! - `file_manager`: Selezione file e discovery lazy dei candidati
//! - `image_processor`: Decodifica, resize e codifica WebP
//! - `converter`: Orchestratore e worker per singoli file
//! - `stats`: Statistiche della singola esecuzione
//! - `logging`: Sink console + file di sessione
//! - `json_output`: Eventi JSON per uso programmatico
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use webp_converter::{BatchConverter, ConversionSettings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = ConversionSettings {
//!     root: "/path/to/images".into(),
//!     dry_run: true,
//!     ..Default::default()
//! };
//! let stats = BatchConverter::new(settings)?.run().await?;
//! println!("{}", stats.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod filter;
pub mod image_processor;
pub mod json_output;
pub mod logging;
pub mod stats;

pub use config::{ConversionSettings, ResizeBound};
pub use converter::{BatchConverter, CandidateFile, FileOutcome};
pub use error::ConvertError;
pub use file_manager::FileManager;
pub use image_processor::ImageProcessor;
pub use stats::RunStatistics;
