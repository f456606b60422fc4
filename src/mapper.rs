//! Candidate to host entry mapping
//!
//! Pure functions, no I/O.

use crate::config::AddonConfig;
use crate::models::{PresentationEntry, SubtitleCandidate, SubtitleId};

/// Convert a 0-10 source rating to 0-5 stars: `floor(min(5, rating / 2))`
///
/// Negative ratings are passed through, not clamped.
pub fn rating_stars(rating: f64) -> i32 {
    (rating / 2.0).min(5.0).floor() as i32
}

/// plugin://{addon-id}/?action=download&id={id}
pub fn download_action_url(addon_id: &str, id: &SubtitleId) -> String {
    format!(
        "plugin://{}/?action=download&id={}",
        addon_id,
        urlencoding::encode(id.as_str())
    )
}

/// "{title} ({year})", or just the title when the year is unknown
pub fn secondary_label(candidate: &SubtitleCandidate) -> String {
    match candidate.year {
        Some(year) => format!("{} ({})", candidate.display_name(), year),
        None => candidate.display_name().to_string(),
    }
}

/// Convert 2-letter language code to full name
pub fn language_name(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "es" => "Spanish".to_string(),
        "en" => "English".to_string(),
        "fr" => "French".to_string(),
        "de" => "German".to_string(),
        "it" => "Italian".to_string(),
        "pt" => "Portuguese".to_string(),
        _ => code.to_uppercase(),
    }
}

/// Build the host entry for one candidate
///
/// The API carries no sync or hearing-impaired information, so both flags
/// are always false.
pub fn to_entry(candidate: &SubtitleCandidate, config: &AddonConfig) -> PresentationEntry {
    PresentationEntry {
        action_url: download_action_url(&config.id, &candidate.id),
        label: language_name(&config.language),
        label2: secondary_label(candidate),
        rating: rating_stars(candidate.rating),
        synced: false,
        hearing_impaired: false,
    }
}
