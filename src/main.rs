//! # WebP Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging (console + file di sessione)
//! - Validazione della directory radice
//! - Creazione della configurazione e avvio del converter
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (folder, ignore/allow, quality, method, resize, etc.)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag debug)
//! 3. Valida che la directory esista
//! 4. Crea un oggetto ConversionSettings con tutti i parametri
//! 5. Istanzia BatchConverter e avvia la conversione
//!
//! Un errore non gestito viene loggato e produce exit code non zero.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! webp-converter /path/to/images --ignore cache thumbs --quality 80 --resize 1920 1080 --delete
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use webp_converter::config::{DEFAULT_METHOD, DEFAULT_QUALITY};
use webp_converter::logging::{self, LogSettings, DEFAULT_LOG_FILE};
use webp_converter::{BatchConverter, ConversionSettings, ResizeBound};

#[derive(Parser)]
#[command(name = "webp-converter")]
#[command(about = "Convert images to WebP format recursively")]
struct Args {
    /// Root folder to scan for images
    folder: PathBuf,

    /// Folders to ignore anywhere in the tree (space-separated)
    #[arg(long, num_args = 0.., value_name = "FOLDER")]
    ignore: Vec<String>,

    /// Folders to allow (if empty, process all)
    #[arg(long, num_args = 0.., value_name = "FOLDER")]
    allow: Vec<String>,

    /// WebP quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY)]
    quality: u8,

    /// Compression effort (0-6, 0 = fastest, 6 = smallest)
    #[arg(short, long, default_value_t = DEFAULT_METHOD)]
    method: u8,

    /// Shrink images to fit within WIDTH x HEIGHT (never upscales)
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    resize: Option<Vec<u32>>,

    /// Delete original images after conversion
    #[arg(long)]
    delete: bool,

    /// Simulate the process without making changes
    #[arg(long)]
    dry_run: bool,

    /// Leave files alone when their .webp output already exists
    #[arg(long)]
    skip_existing: bool,

    /// Number of parallel workers
    #[arg(short, long, default_value = "1")]
    workers: usize,

    /// Session log file (appended)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Output progress and summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(&LogSettings {
        log_file: args.log_file.clone(),
        debug: args.debug,
    })?;

    // Already logged, exit without a second report
    if let Err(e) = run(args).await {
        error!("An unexpected error occurred: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: Args) -> Result<()> {
    // Validate arguments
    if !args.folder.exists() {
        return Err(anyhow::anyhow!("Folder does not exist: {}", args.folder.display()));
    }
    if !args.folder.is_dir() {
        return Err(anyhow::anyhow!("Path is not a directory: {}", args.folder.display()));
    }

    let resize = match args.resize.as_deref() {
        Some([width, height]) => Some(ResizeBound::new(*width, *height)),
        _ => None,
    };

    let settings = ConversionSettings {
        root: args.folder,
        ignore_folders: args.ignore,
        allow_folders: args.allow,
        quality: args.quality,
        method: args.method,
        resize,
        delete_originals: args.delete,
        dry_run: args.dry_run,
        skip_existing: args.skip_existing,
        workers: args.workers,
        json_output: args.json,
    };

    let converter = BatchConverter::new(settings)?;
    converter.run().await?;

    Ok(())
}
