//! Data models for Subtis
//!
//! Core types for playback snapshots, search candidates, host entries,
//! and downloaded subtitle files.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Playback Context
// =============================================================================

/// Snapshot of what the host is currently playing
///
/// Taken once per search invocation. `imdb_id` and `file_size` are captured
/// for logging but not used to filter results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackContext {
    pub title: String,
    pub year: Option<u16>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub tvshow: Option<String>,
    pub file_original_path: String,
    pub imdb_id: Option<String>,
    pub file_size: Option<u64>,
}

impl PlaybackContext {
    /// Context for a plain title search
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Title with surrounding whitespace removed; empty means "nothing to search"
    pub fn search_title(&self) -> &str {
        self.title.trim()
    }

    /// Is this an episode of a TV show?
    pub fn is_episode(&self) -> bool {
        self.season.is_some() && self.episode.is_some()
    }
}

// =============================================================================
// Subtitle Identifier
// =============================================================================

/// Opaque subtitle identifier
///
/// The API sends numbers, but the id round-trips through query strings,
/// so it is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SubtitleId(String);

impl SubtitleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Safe to use as a path component: ASCII alphanumerics, '-' and '_'
    pub fn is_file_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl fmt::Display for SubtitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubtitleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for SubtitleId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for SubtitleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            UInt(u64),
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::UInt(n) => SubtitleId(n.to_string()),
            RawId::Int(n) => SubtitleId(n.to_string()),
            // 42.0 -> "42"; fractional ids keep their '.' and fail is_file_safe
            RawId::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                SubtitleId(format!("{}", n as i64))
            }
            RawId::Float(n) => SubtitleId(n.to_string()),
            RawId::Text(s) => SubtitleId::new(s),
        })
    }
}

// =============================================================================
// Subtitle Candidate
// =============================================================================

/// Kind of title a candidate belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    #[default]
    Movie,
    #[serde(alias = "tv", alias = "series")]
    Show,
    #[serde(other)]
    Other,
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleType::Movie => write!(f, "movie"),
            TitleType::Show => write!(f, "show"),
            TitleType::Other => write!(f, "other"),
        }
    }
}

/// One hit from the title search endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleCandidate {
    pub id: SubtitleId,
    /// Original title
    pub title_name: String,
    /// Spanish (localized) title, falls back to `title_name`
    pub title_name_spa: String,
    pub year: Option<u16>,
    /// Source rating on a 0-10 scale
    pub rating: f64,
    pub title_type: TitleType,
}

impl SubtitleCandidate {
    /// Localized name if present, original otherwise
    pub fn display_name(&self) -> &str {
        if self.title_name_spa.trim().is_empty() {
            &self.title_name
        } else {
            &self.title_name_spa
        }
    }
}

// =============================================================================
// Presentation Entry
// =============================================================================

/// Host-ready record for one selectable subtitle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationEntry {
    /// plugin:// action URL that triggers the download
    pub action_url: String,
    /// Language name
    pub label: String,
    /// "{title} ({year})"
    pub label2: String,
    /// 0-5 stars
    pub rating: i32,
    pub synced: bool,
    pub hearing_impaired: bool,
}

impl fmt::Display for PresentationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}★", self.label, self.label2, self.rating)
    }
}

// =============================================================================
// Downloaded Subtitle
// =============================================================================

/// Subtitle file saved to the scratch directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedSubtitle {
    pub id: String,
    pub path: PathBuf,
    /// Bytes written
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_id_from_number_and_text() {
        let numeric: SubtitleId = serde_json::from_str("42").unwrap();
        let text: SubtitleId = serde_json::from_str(r#"" abc-1 ""#).unwrap();
        assert_eq!(numeric.as_str(), "42");
        assert_eq!(text.as_str(), "abc-1");
    }

    #[test]
    fn test_subtitle_id_numeric_variants() {
        let big: SubtitleId = serde_json::from_str("18446744073709551615").unwrap();
        let integral: SubtitleId = serde_json::from_str("42.0").unwrap();
        let fractional: SubtitleId = serde_json::from_str("42.5").unwrap();
        assert_eq!(big.as_str(), "18446744073709551615");
        assert_eq!(integral.as_str(), "42");
        assert_eq!(fractional.as_str(), "42.5");
        assert!(!fractional.is_file_safe());
    }

    #[test]
    fn test_subtitle_id_file_safety() {
        assert!(SubtitleId::from("42").is_file_safe());
        assert!(SubtitleId::from("a_b-C9").is_file_safe());
        assert!(!SubtitleId::from("").is_file_safe());
        assert!(!SubtitleId::from("../etc/passwd").is_file_safe());
        assert!(!SubtitleId::from("a b").is_file_safe());
    }

    #[test]
    fn test_title_type_parsing() {
        let movie: TitleType = serde_json::from_str(r#""movie""#).unwrap();
        let show: TitleType = serde_json::from_str(r#""tv""#).unwrap();
        let other: TitleType = serde_json::from_str(r#""documentary""#).unwrap();
        assert_eq!(movie, TitleType::Movie);
        assert_eq!(show, TitleType::Show);
        assert_eq!(other, TitleType::Other);
    }

    #[test]
    fn test_display_name_prefers_spanish() {
        let mut candidate = SubtitleCandidate {
            id: SubtitleId::from(1u64),
            title_name: "Inception".to_string(),
            title_name_spa: "Origen".to_string(),
            year: Some(2010),
            rating: 8.0,
            title_type: TitleType::Movie,
        };
        assert_eq!(candidate.display_name(), "Origen");

        candidate.title_name_spa = "  ".to_string();
        assert_eq!(candidate.display_name(), "Inception");
    }

    #[test]
    fn test_context_search_title_trims() {
        assert_eq!(PlaybackContext::new("  Inception ").search_title(), "Inception");
        assert_eq!(PlaybackContext::new("   ").search_title(), "");
    }

    #[test]
    fn test_context_is_episode() {
        let mut ctx = PlaybackContext::new("Pilot");
        assert!(!ctx.is_episode());
        ctx.season = Some(1);
        ctx.episode = Some(1);
        assert!(ctx.is_episode());
    }
}
