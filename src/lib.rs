//! Subtis - Spanish subtitles from subt.is
//!
//! Searches the subt.is API for the title a media-center host is playing,
//! turns hits into host list entries and downloads the chosen subtitle into
//! a scratch directory.
//!
//! # Modules
//!
//! - `config` - Addon metadata, endpoints and timeouts
//! - `models` - Playback context, candidates, entries, downloaded files
//! - `api` - HTTP client and subt.is endpoints
//! - `provider` - Subtitle provider trait
//! - `mapper` - Candidate to host entry conversion
//! - `downloader` - Saves subtitle bodies to disk
//! - `host` - Host collaborator interface and bundled hosts
//! - `dispatcher` - Query-string parsing and action dispatch

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod downloader;
pub mod host;
pub mod mapper;
pub mod models;
pub mod provider;

// Re-export commonly used types
pub use models::{
    DownloadedSubtitle, PlaybackContext, PresentationEntry, SubtitleCandidate, SubtitleId,
    TitleType,
};

pub use api::{FetchError, SubtisClient};
pub use config::AddonConfig;
pub use dispatcher::{Action, Dispatcher, Params};
pub use downloader::{DownloadError, Downloader};
pub use host::{HostCollaborator, HostItem, MemoryHost, PlaybackField};
pub use provider::SubtitleProvider;
