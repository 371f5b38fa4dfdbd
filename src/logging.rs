//! # Logging Setup Module
//!
//! Configura i due sink di log della sessione.
//!
//! ## Sink:
//! - **Console** (stderr): INFO, oppure DEBUG con `--debug` (`RUST_LOG` ha precedenza)
//! - **File di sessione**: append, sempre DEBUG, senza colori ANSI
//!
//! Prima di installare il subscriber la directory del file viene creata se
//! assente e viene scritto un separatore `NEW SESSION` con timestamp.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default session log location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "logs/session.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logging options taken from the command line
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

/// Open the session log in append mode and write the session separator
pub fn open_session_log(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    writeln!(
        file,
        "\n========== NEW SESSION {} ==========\n",
        Local::now().format(TIMESTAMP_FORMAT)
    )?;

    Ok(file)
}

/// Install the console + file subscriber for the whole process
pub fn init(settings: &LogSettings) -> Result<()> {
    let file = open_session_log(&settings.log_file)?;

    let console_level = if settings.debug { "debug" } else { "info" };
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_filter(console_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install logging subscriber")?;

    Ok(())
}
