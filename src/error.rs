//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore per la conversione di un singolo file.
//!
//! ## Responsabilità:
//! - Definisce `ConvertError` enum per categorizzare gli errori per-file
//! - Integra con `thiserror` per automatic error conversion
//! - Gli errori di configurazione e di avvio restano `anyhow::Error`
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Image`: Errori di decodifica immagini (formati corrotti, etc.)
//! - `Encode`: Il codec WebP ha rifiutato il buffer
//! - `Persist`: Il file temporaneo non può sostituire il target
//!
//! ## Esempio:
//! ```rust
//! use webp_converter::ConvertError;
//!
//! let err = ConvertError::Encode("bad dimensions".to_string());
//! assert_eq!(err.to_string(), "WebP encoding error: bad dimensions");
//! ```

/// Errors raised while converting a single file
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("WebP encoding error: {0}")]
    Encode(String),

    #[error("Cannot write output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
