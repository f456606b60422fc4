//! Entry point dispatch
//!
//! Parses the host query string (`action=search|download|manualsearch&...`),
//! runs the matching branch and always finishes with end-of-results.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::config::AddonConfig;
use crate::downloader::Downloader;
use crate::host::{playback_context, HostCollaborator, HostItem};
use crate::mapper;
use crate::models::SubtitleId;
use crate::provider::SubtitleProvider;

// =============================================================================
// Query Parameters
// =============================================================================

/// Decoded query-string parameters
///
/// Pairs with blank values are dropped; on repeated keys the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(HashMap<String, String>);

impl Params {
    /// Parse `?a=1&b=two+words`; the leading '?' is optional
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                let key = decode_component(key);
                let value = decode_component(value);
                if key.is_empty() || value.is_empty() {
                    None
                } else {
                    Some((key, value))
                }
            })
            .collect();

        Params(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn action(&self) -> Action {
        Action::from_param(self.get("action"))
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

// =============================================================================
// Actions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search,
    Download,
    ManualSearch,
    /// Missing or unrecognized action
    Unknown(Option<String>),
}

impl Action {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("search") => Action::Search,
            Some("download") => Action::Download,
            Some("manualsearch") => Action::ManualSearch,
            other => Action::Unknown(other.map(str::to_string)),
        }
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Runs one host invocation
pub struct Dispatcher<'a, P: SubtitleProvider> {
    config: &'a AddonConfig,
    provider: &'a P,
}

impl<'a, P: SubtitleProvider> Dispatcher<'a, P> {
    pub fn new(config: &'a AddonConfig, provider: &'a P) -> Self {
        Self { config, provider }
    }

    /// Handle one invocation and return how many items were registered
    ///
    /// End-of-results is signalled exactly once, whatever the outcome.
    pub async fn run<H: HostCollaborator + ?Sized>(&self, query: &str, host: &mut H) -> usize {
        let params = Params::parse(query);
        debug!(target: "subtis", "Parsed params: {:?}", params);

        let reported = match params.action() {
            Action::Search => self.search(host).await,
            Action::Download => self.download(&params, host).await,
            Action::ManualSearch => {
                info!(
                    target: "subtis",
                    "Manual search for: {:?}",
                    params.get("searchstring")
                );
                0
            }
            Action::Unknown(action) => {
                warn!(target: "subtis", "Unknown action {:?}", action);
                0
            }
        };

        host.end_results();
        info!(target: "subtis", "Invocation complete, {} items", reported);
        reported
    }

    async fn search<H: HostCollaborator + ?Sized>(&self, host: &mut H) -> usize {
        let context = playback_context(&*host);
        info!(
            target: "subtis",
            title = %context.title,
            year = ?context.year,
            season = ?context.season,
            episode = ?context.episode,
            tvshow = ?context.tvshow,
            file = %context.file_original_path,
            "Searching subtitles"
        );

        let candidates = self.provider.search(&context).await.unwrap_or_else(|e| {
            warn!(target: "subtis", "Search failed: {}", e);
            Vec::new()
        });

        let count = candidates.len();
        for candidate in &candidates {
            let entry = mapper::to_entry(candidate, self.config);
            debug!(target: "subtis", "Adding subtitle {}", entry.action_url);
            host.report_entry(HostItem::Subtitle(entry));
        }
        count
    }

    async fn download<H: HostCollaborator + ?Sized>(&self, params: &Params, host: &mut H) -> usize {
        let Some(id) = params.get("id").map(SubtitleId::new) else {
            info!(target: "subtis", "No subtitle ID provided for download");
            return 0;
        };

        let downloader = Downloader::new(self.provider, self.config.scratch_dir());
        match downloader.download(&id, &*host).await {
            Some(file) => {
                host.report_entry(HostItem::from(&file));
                1
            }
            None => 0,
        }
    }
}
