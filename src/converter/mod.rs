//! # Converter Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `batch_converter`: Orchestratore principale
//! - `task_converter`: Worker per singoli file
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod batch_converter;
pub mod path_resolver;
pub mod task_converter;

pub use batch_converter::BatchConverter;
pub use path_resolver::{CandidateFile, PathResolver};
pub use task_converter::{FileOutcome, TaskConverter};
