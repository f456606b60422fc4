//! Dispatcher tests
//!
//! Drives full invocations against an in-memory host and a canned provider.

use std::cell::Cell;
use std::path::PathBuf;

use subtis::{
    AddonConfig, Dispatcher, FetchError, HostItem, MemoryHost, PlaybackContext, PlaybackField,
    SubtitleCandidate, SubtitleId, SubtitleProvider, TitleType,
};

// =============================================================================
// Canned Provider
// =============================================================================

/// Provider with fixed answers that counts calls
#[derive(Default)]
struct CannedProvider {
    candidates: Vec<SubtitleCandidate>,
    body: Option<String>,
    searches: Cell<usize>,
    fetches: Cell<usize>,
    last_title: std::cell::RefCell<Option<String>>,
}

impl SubtitleProvider for CannedProvider {
    async fn search(
        &self,
        context: &PlaybackContext,
    ) -> Result<Vec<SubtitleCandidate>, FetchError> {
        self.searches.set(self.searches.get() + 1);
        *self.last_title.borrow_mut() = Some(context.title.clone());
        Ok(self.candidates.clone())
    }

    async fn fetch(&self, _id: &SubtitleId) -> Result<String, FetchError> {
        self.fetches.set(self.fetches.get() + 1);
        self.body.clone().ok_or(FetchError::Status(404))
    }
}

fn candidate(id: u64, spa: &str, year: u16, rating: f64) -> SubtitleCandidate {
    SubtitleCandidate {
        id: SubtitleId::from(id),
        title_name: "Original".to_string(),
        title_name_spa: spa.to_string(),
        year: Some(year),
        rating,
        title_type: TitleType::Movie,
    }
}

fn config_in(profile: &std::path::Path) -> AddonConfig {
    AddonConfig {
        profile_dir: profile.to_path_buf(),
        ..AddonConfig::default()
    }
}

// =============================================================================
// Search Action
// =============================================================================

#[tokio::test]
async fn test_search_reports_every_candidate_in_order() {
    let config = AddonConfig::default();
    let provider = CannedProvider {
        candidates: vec![
            candidate(42, "Origen", 2010, 8.0),
            candidate(7, "Memento", 2000, 10.0),
            candidate(42, "Origen", 2010, 8.0),
        ],
        ..CannedProvider::default()
    };
    let mut host = MemoryHost::new().with_field(PlaybackField::Title, "Inception");

    let reported = Dispatcher::new(&config, &provider)
        .run("?action=search", &mut host)
        .await;

    assert_eq!(reported, 3);
    assert_eq!(host.end_calls, 1);

    let entries = host.entries();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].action_url.ends_with("action=download&id=42"));
    assert_eq!(entries[1].label2, "Memento (2000)");
    assert_eq!(entries[1].rating, 5);
    assert!(entries[2].action_url.ends_with("action=download&id=42"));
}

#[tokio::test]
async fn test_search_uses_original_title_from_host() {
    let config = AddonConfig::default();
    let provider = CannedProvider::default();
    let mut host = MemoryHost::new()
        .with_field(PlaybackField::OriginalTitle, "Inception")
        .with_field(PlaybackField::Title, "Origen");

    Dispatcher::new(&config, &provider)
        .run("?action=search", &mut host)
        .await;

    assert_eq!(provider.last_title.borrow().as_deref(), Some("Inception"));
}

#[tokio::test]
async fn test_search_with_no_results_still_ends() {
    let config = AddonConfig::default();
    let provider = CannedProvider::default();
    let mut host = MemoryHost::new().with_field(PlaybackField::Title, "Nothing");

    let reported = Dispatcher::new(&config, &provider)
        .run("?action=search", &mut host)
        .await;

    assert_eq!(reported, 0);
    assert!(host.items.is_empty());
    assert_eq!(host.end_calls, 1);
}

// =============================================================================
// Download Action
// =============================================================================

#[tokio::test]
async fn test_download_reports_saved_path() {
    let profile = tempfile::tempdir().unwrap();
    let config = config_in(profile.path());
    let provider = CannedProvider {
        body: Some("1\n00:00:01,000 --> 00:00:02,000\nHola\n".to_string()),
        ..CannedProvider::default()
    };
    let mut host = MemoryHost::new();

    let reported = Dispatcher::new(&config, &provider)
        .run("?action=download&id=42", &mut host)
        .await;

    let expected: PathBuf = profile.path().join("temp").join("subtis_42.srt");
    assert_eq!(reported, 1);
    assert_eq!(host.items, vec![HostItem::File { path: expected.clone() }]);
    assert_eq!(host.end_calls, 1);
    assert!(expected.exists());
}

#[tokio::test]
async fn test_download_without_id_does_nothing() {
    let profile = tempfile::tempdir().unwrap();
    let config = config_in(profile.path());
    let provider = CannedProvider::default();
    let mut host = MemoryHost::new();

    let reported = Dispatcher::new(&config, &provider)
        .run("?action=download", &mut host)
        .await;

    assert_eq!(reported, 0);
    assert_eq!(provider.fetches.get(), 0);
    assert!(host.items.is_empty());
    assert_eq!(host.end_calls, 1);
}

#[tokio::test]
async fn test_failed_download_reports_nothing() {
    let profile = tempfile::tempdir().unwrap();
    let config = config_in(profile.path());
    let provider = CannedProvider::default();
    let mut host = MemoryHost::new();

    let reported = Dispatcher::new(&config, &provider)
        .run("?action=download&id=42", &mut host)
        .await;

    assert_eq!(reported, 0);
    assert_eq!(provider.fetches.get(), 1);
    assert!(host.files().is_empty());
    assert_eq!(host.end_calls, 1);
    assert!(!config.scratch_dir().join("subtis_42.srt").exists());
}

// =============================================================================
// Other Actions
// =============================================================================

#[tokio::test]
async fn test_manual_search_is_log_only() {
    let config = AddonConfig::default();
    let provider = CannedProvider::default();
    let mut host = MemoryHost::new();

    let reported = Dispatcher::new(&config, &provider)
        .run("?action=manualsearch&searchstring=la+casa+de+papel", &mut host)
        .await;

    assert_eq!(reported, 0);
    assert_eq!(provider.searches.get(), 0);
    assert_eq!(host.end_calls, 1);
}

#[tokio::test]
async fn test_unknown_action_ends_once_with_no_items() {
    let config = AddonConfig::default();
    let provider = CannedProvider::default();

    for query in ["?action=play", "", "?", "?foo=bar"] {
        let mut host = MemoryHost::new();
        let reported = Dispatcher::new(&config, &provider)
            .run(query, &mut host)
            .await;

        assert_eq!(reported, 0, "query {:?}", query);
        assert!(host.items.is_empty(), "query {:?}", query);
        assert_eq!(host.end_calls, 1, "query {:?}", query);
    }

    assert_eq!(provider.searches.get(), 0);
    assert_eq!(provider.fetches.get(), 0);
}
