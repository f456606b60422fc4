//! Host collaborator interface
//!
//! Everything the addon needs from the media-center host: playback state,
//! result registration and a little filesystem access. The core only talks
//! to [`HostCollaborator`]; two hosts ship with the crate:
//!
//! - [`ConsoleHost`] - standalone runner, items go out as JSON lines
//! - [`MemoryHost`] - records every call, for tests and embedders

use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::{DownloadedSubtitle, PlaybackContext, PresentationEntry};

// =============================================================================
// Playback Fields
// =============================================================================

/// Playback-state fields the addon reads from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackField {
    Title,
    OriginalTitle,
    Year,
    Season,
    Episode,
    TvShow,
    PlayingFile,
    ImdbId,
    FileSize,
}

impl PlaybackField {
    /// Kodi info label for this field
    pub fn info_label(&self) -> &'static str {
        match self {
            PlaybackField::Title => "VideoPlayer.Title",
            PlaybackField::OriginalTitle => "VideoPlayer.OriginalTitle",
            PlaybackField::Year => "VideoPlayer.Year",
            PlaybackField::Season => "VideoPlayer.Season",
            PlaybackField::Episode => "VideoPlayer.Episode",
            PlaybackField::TvShow => "VideoPlayer.TVshowtitle",
            PlaybackField::PlayingFile => "Player.Filenameandpath",
            PlaybackField::ImdbId => "VideoPlayer.IMDBNumber",
            PlaybackField::FileSize => "Player.FileSize",
        }
    }
}

// =============================================================================
// Host Items
// =============================================================================

/// An item registered with the host for the current handle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostItem {
    /// A selectable search result
    Subtitle(PresentationEntry),
    /// A downloaded file, label and URL are both the path
    File { path: PathBuf },
}

impl From<PresentationEntry> for HostItem {
    fn from(entry: PresentationEntry) -> Self {
        HostItem::Subtitle(entry)
    }
}

impl From<&DownloadedSubtitle> for HostItem {
    fn from(file: &DownloadedSubtitle) -> Self {
        HostItem::File {
            path: file.path.clone(),
        }
    }
}

// =============================================================================
// Collaborator Trait
// =============================================================================

pub trait HostCollaborator {
    /// Register one item with the host
    fn report_entry(&mut self, item: HostItem);

    /// Signal the end of the result set
    fn end_results(&mut self);

    /// Raw info-label value; empty when the host has nothing
    fn query_playback_field(&self, field: PlaybackField) -> String;

    /// Create `path` and its parents if missing
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    fn file_exists(&self, path: &Path) -> bool;
}

/// Snapshot the host's playback state
///
/// Prefers the original title and falls back to the display title.
pub fn playback_context<H: HostCollaborator + ?Sized>(host: &H) -> PlaybackContext {
    let field = |f: PlaybackField| host.query_playback_field(f).trim().to_string();
    let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };

    let mut title = field(PlaybackField::OriginalTitle);
    if title.is_empty() {
        title = field(PlaybackField::Title);
    }

    let playing = field(PlaybackField::PlayingFile);
    let file_original_path = urlencoding::decode(&playing)
        .map(|p| p.into_owned())
        .unwrap_or(playing);

    PlaybackContext {
        title,
        year: field(PlaybackField::Year).parse().ok(),
        season: field(PlaybackField::Season).parse().ok(),
        episode: field(PlaybackField::Episode).parse().ok(),
        tvshow: non_empty(field(PlaybackField::TvShow)),
        file_original_path,
        imdb_id: non_empty(field(PlaybackField::ImdbId)),
        file_size: field(PlaybackField::FileSize).parse().ok(),
    }
}

// =============================================================================
// Console Host
// =============================================================================

/// Host for the standalone runner
///
/// Playback fields are supplied up front; every registered item is written
/// to `out` as one JSON line tagged with the handle.
pub struct ConsoleHost<W: Write> {
    handle: i32,
    fields: HashMap<PlaybackField, String>,
    out: W,
}

impl ConsoleHost<io::Stdout> {
    pub fn stdout(handle: i32) -> Self {
        Self::new(handle, io::stdout())
    }
}

impl<W: Write> ConsoleHost<W> {
    pub fn new(handle: i32, out: W) -> Self {
        Self {
            handle,
            fields: HashMap::new(),
            out,
        }
    }

    /// Set a playback field; `None` leaves it unset
    pub fn with_field(mut self, field: PlaybackField, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.fields.insert(field, value.to_string());
        }
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: serde_json::Value) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::warn!(target: "subtis", "Failed to write host output: {}", e);
        }
    }
}

impl<W: Write> HostCollaborator for ConsoleHost<W> {
    fn report_entry(&mut self, item: HostItem) {
        let line = serde_json::json!({ "handle": self.handle, "item": item });
        self.emit(line);
    }

    fn end_results(&mut self) {
        let line = serde_json::json!({ "handle": self.handle, "end_of_directory": true });
        self.emit(line);
        let _ = self.out.flush();
    }

    fn query_playback_field(&self, field: PlaybackField) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

// =============================================================================
// Memory Host
// =============================================================================

/// Host that records every call
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub fields: HashMap<PlaybackField, String>,
    pub items: Vec<HostItem>,
    pub end_calls: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: PlaybackField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// Registered search results, in order
    pub fn entries(&self) -> Vec<&PresentationEntry> {
        self.items
            .iter()
            .filter_map(|item| match item {
                HostItem::Subtitle(entry) => Some(entry),
                HostItem::File { .. } => None,
            })
            .collect()
    }

    /// Registered file paths, in order
    pub fn files(&self) -> Vec<&Path> {
        self.items
            .iter()
            .filter_map(|item| match item {
                HostItem::File { path } => Some(path.as_path()),
                HostItem::Subtitle(_) => None,
            })
            .collect()
    }
}

impl HostCollaborator for MemoryHost {
    fn report_entry(&mut self, item: HostItem) {
        self.items.push(item);
    }

    fn end_results(&mut self) {
        self.end_calls += 1;
    }

    fn query_playback_field(&self, field: PlaybackField) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
