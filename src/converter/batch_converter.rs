//! # Batch Converter Main Orchestrator
//!
//! Orchestratore principale: discovery dei candidati, dispatch su un pool di
//! worker limitato da semaforo, aggregazione degli esiti in ordine di
//! attraversamento.

use crate::{
    config::ConversionSettings,
    converter::{
        path_resolver::CandidateFile,
        task_converter::{FileOutcome, TaskConverter},
    },
    file_manager::FileManager,
    filter::DirectoryFilter,
    json_output::JsonMessage,
    stats::RunStatistics,
};
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info};

/// Un lock per ogni path di output: `a.png` e `a.jpg` scrivono entrambi `a.webp`
#[derive(Default)]
struct TargetLocks {
    locks: HashMap<PathBuf, Arc<Mutex<()>>>,
}

impl TargetLocks {
    fn lock_for(&mut self, target: &Path) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.get(target) {
            debug!("Output shared by several sources: {}", target.display());
            return existing.clone();
        }
        let lock = Arc::new(Mutex::new(()));
        self.locks.insert(target.to_path_buf(), lock.clone());
        lock
    }
}

/// Orchestratore di una singola esecuzione
pub struct BatchConverter {
    settings: ConversionSettings,
    filter: DirectoryFilter,
}

impl BatchConverter {
    /// Crea nuova istanza, validando la configurazione
    pub fn new(settings: ConversionSettings) -> Result<Self> {
        settings.validate()?;
        let filter = DirectoryFilter::new(&settings.ignore_folders, &settings.allow_folders);

        Ok(Self { settings, filter })
    }

    /// Esegue la conversione dell'intero albero
    pub async fn run(&self) -> Result<RunStatistics> {
        let start_time = Instant::now();
        let root = self.settings.root.clone();

        info!("Starting image conversion in {}...", root.display());
        self.log_configuration();

        let skip_existing = self.settings.skip_existing;
        let candidates: Vec<CandidateFile> = FileManager::find_candidates(&root, self.filter.clone())
            .filter(|candidate| {
                // Existing WebP files are outputs in skip mode, not sources
                if skip_existing && candidate.is_in_place() {
                    debug!("Leaving existing WebP as is: {}", candidate.relative.display());
                    return false;
                }
                true
            })
            .collect();
        info!("Found {} candidate images", candidates.len());

        if self.settings.json_output {
            JsonMessage::start(&self.settings, candidates.len()).emit();
        }

        let results = self.convert_all(candidates).await?;

        let mut stats = RunStatistics::new();
        for (candidate, outcome) in results {
            stats.record(&outcome);
            if self.settings.json_output {
                JsonMessage::file_complete(candidate.source, candidate.target, outcome).emit();
            }
        }

        let duration = start_time.elapsed().as_secs_f64();
        debug!("Processed {} candidates", stats.total());
        info!("{}", stats.format_summary());
        info!("Completed in {:.2}s", duration);

        if self.settings.json_output {
            JsonMessage::complete(stats, duration).emit();
        }

        Ok(stats)
    }

    /// Logga configurazione
    fn log_configuration(&self) {
        let settings = &self.settings;

        info!("WebP quality: {}, method: {}", settings.quality, settings.method);
        if let Some(bound) = settings.resize {
            info!("Resize: fit within {}x{} (no upscaling)", bound.width, bound.height);
        }
        if !settings.ignore_folders.is_empty() {
            info!("Ignoring folders: {}", settings.ignore_folders.join(", "));
        }
        if !settings.allow_folders.is_empty() {
            info!("Allowed folders: {}", settings.allow_folders.join(", "));
        }
        if settings.delete_originals {
            info!("Originals will be deleted after conversion");
        }
        if settings.skip_existing {
            info!("Skip mode: files with an existing .webp are left alone");
        }
        if settings.dry_run {
            info!("Dry run mode: No files will be modified");
        }
        debug!("Workers: {}", settings.workers);
    }

    /// Converte i candidati con al massimo `workers` job bloccanti in parallelo
    async fn convert_all(
        &self,
        candidates: Vec<CandidateFile>,
    ) -> Result<Vec<(CandidateFile, FileOutcome)>> {
        let semaphore = Arc::new(Semaphore::new(self.settings.workers));
        let converter = Arc::new(TaskConverter::new(&self.settings));
        let mut target_locks = TargetLocks::default();
        let mut tasks = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            // Il permesso viene acquisito prima dello spawn: con 1 worker l'ordine è sequenziale
            let permit = semaphore.clone().acquire_owned().await?;
            let target_lock = target_locks.lock_for(&candidate.target);
            let converter = converter.clone();

            let task = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                let _guard = target_lock.blocking_lock();
                let outcome = converter.process(&candidate);
                (candidate, outcome)
            });

            tasks.push(task);
        }

        let mut results = Vec::with_capacity(tasks.len());
        for joined in futures::future::join_all(tasks).await {
            results.push(joined?);
        }

        Ok(results)
    }
}
