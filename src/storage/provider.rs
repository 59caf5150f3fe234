//! Database providers
//!
//! A provider hands out the process-wide `Database` handle. The handle is
//! built on first request; concurrent first callers wait on the same
//! initialization instead of racing to open their own.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use async_trait::async_trait;
use tokio::sync::OnceCell;
use crate::{Error, Result};
use super::sqlite::Database;

/// Source of the shared database handle
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Get the shared handle, initializing it on first use
    async fn handle(&self) -> Result<Arc<Database>>;
}

/// Opens a working copy of a bundled database file.
///
/// On first use the bundled asset is copied into the data directory (unless
/// a copy is already there) and the copy is opened read-only.
pub struct BundledProvider {
    asset: PathBuf,
    data_dir: PathBuf,
    cell: OnceCell<Arc<Database>>,
}

impl BundledProvider {
    pub fn new(asset: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset: asset.into(),
            data_dir: data_dir.into(),
            cell: OnceCell::new(),
        }
    }

    /// Where the working copy lives
    pub fn database_path(&self) -> PathBuf {
        let file_name = self
            .asset
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "icfinder.db".into());
        self.data_dir.join(file_name)
    }

    fn open_blocking(asset: &Path, target: &Path) -> Result<Database> {
        copy_asset_if_needed(asset, target)?;
        Database::open(target)
    }
}

#[async_trait]
impl DatabaseProvider for BundledProvider {
    async fn handle(&self) -> Result<Arc<Database>> {
        let db = self
            .cell
            .get_or_try_init(|| async {
                let asset = self.asset.clone();
                let target = self.database_path();
                tracing::info!("Opening lookup database at {}", target.display());
                let db = tokio::task::spawn_blocking(move || Self::open_blocking(&asset, &target))
                    .await
                    .map_err(|e| Error::Unavailable(e.to_string()))??;
                Ok::<_, Error>(Arc::new(db))
            })
            .await?;
        Ok(Arc::clone(db))
    }
}

/// Copy `asset` to `target` unless `target` already exists.
///
/// The copy goes through a sibling `.partial` file so an interrupted copy
/// never leaves a truncated database behind.
pub fn copy_asset_if_needed(asset: &Path, target: &Path) -> Result<bool> {
    if target.exists() {
        return Ok(false);
    }
    if !asset.is_file() {
        return Err(Error::AssetNotFound(asset.display().to_string()));
    }
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut partial = target.as_os_str().to_os_string();
    partial.push(".partial");
    let partial = PathBuf::from(partial);
    std::fs::copy(asset, &partial)?;
    std::fs::rename(&partial, target)?;
    tracing::info!("Copied bundled database {} -> {}", asset.display(), target.display());
    Ok(true)
}

/// In-memory database built from an SQL script, for tests and demos
pub struct MemoryProvider {
    script: String,
    cell: OnceCell<Arc<Database>>,
    initializations: AtomicUsize,
    acquisitions: AtomicUsize,
}

impl MemoryProvider {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            cell: OnceCell::new(),
            initializations: AtomicUsize::new(0),
            acquisitions: AtomicUsize::new(0),
        }
    }

    /// How many times the database was actually built
    pub fn initializations(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }

    /// How many times a handle was requested
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseProvider for MemoryProvider {
    async fn handle(&self) -> Result<Arc<Database>> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        let db = self
            .cell
            .get_or_try_init(|| async {
                self.initializations.fetch_add(1, Ordering::SeqCst);
                // Widen the window so racing callers actually overlap
                tokio::task::yield_now().await;
                Database::open_in_memory(&self.script).map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(db))
    }
}
