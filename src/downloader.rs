//! Subtitle downloader
//!
//! Fetches a subtitle body and saves it as `subtis_{id}.srt` in the scratch
//! directory. The body is held in memory and written through a `.part` file,
//! so a failed download never leaves a partial `.srt` behind. Files are never
//! cleaned up here.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::FetchError;
use crate::host::HostCollaborator;
use crate::models::{DownloadedSubtitle, SubtitleId};
use crate::provider::SubtitleProvider;

/// Download failure reasons
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid subtitle id: {0:?}")]
    InvalidId(String),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Saves subtitles from a provider into a scratch directory
pub struct Downloader<'a, P: SubtitleProvider> {
    provider: &'a P,
    scratch_dir: PathBuf,
}

impl<'a, P: SubtitleProvider> Downloader<'a, P> {
    pub fn new(provider: &'a P, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Target path for a subtitle id
    pub fn file_path(&self, id: &SubtitleId) -> PathBuf {
        self.scratch_dir.join(format!("subtis_{}.srt", id))
    }

    /// Download `id`, returning the saved file
    pub async fn try_download<H: HostCollaborator + ?Sized>(
        &self,
        id: &SubtitleId,
        host: &H,
    ) -> Result<DownloadedSubtitle, DownloadError> {
        if !id.is_file_safe() {
            return Err(DownloadError::InvalidId(id.to_string()));
        }

        if !host.file_exists(&self.scratch_dir) {
            debug!(target: "subtis", "Creating scratch dir {}", self.scratch_dir.display());
            host.ensure_dir(&self.scratch_dir)?;
        }

        let content = self.provider.fetch(id).await?;

        let path = self.file_path(id);
        write_whole(&path, content.as_bytes())?;

        info!(target: "subtis", "Subtitle saved to: {}", path.display());
        Ok(DownloadedSubtitle {
            id: id.to_string(),
            path,
            size: content.len() as u64,
        })
    }

    /// Like [`try_download`](Self::try_download), but any failure is `None`
    pub async fn download<H: HostCollaborator + ?Sized>(
        &self,
        id: &SubtitleId,
        host: &H,
    ) -> Option<DownloadedSubtitle> {
        match self.try_download(id, host).await {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(target: "subtis", "Error downloading subtitle {}: {}", id, e);
                None
            }
        }
    }
}

/// Write `data` to `path` via a sibling `.part` file and a rename
fn write_whole(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let result = std::fs::write(&part, data).and_then(|_| std::fs::rename(&part, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&part);
    }
    result
}
