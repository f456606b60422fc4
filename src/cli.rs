//! CLI - standalone host runner
//!
//! Emulates the media-center plugin invocation: a numeric handle plus the
//! query string the host would pass, with playback state supplied as flags.
//!
//! # Examples
//!
//! ```bash
//! subtis 1 "?action=search" --title "Inception" --year 2010
//! subtis 1 "?action=download&id=42"
//! ```

use clap::Parser;
use std::path::PathBuf;

use subtis::host::{ConsoleHost, PlaybackField};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Subtis - Spanish subtitles from subt.is
///
/// Runs one addon invocation. Registered items are printed to stdout as
/// JSON lines, logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "subtis",
    version,
    about = "Search and download Spanish subtitles from subt.is",
    after_help = "EXAMPLES:\n\
                  subtis 1 \"?action=search\" --title Inception --year 2010\n\
                  subtis 1 \"?action=download&id=42\""
)]
pub struct Cli {
    /// Host handle that results are registered against
    #[arg(allow_negative_numbers = true)]
    pub handle: i32,

    /// Query string, e.g. "?action=search" or "?action=download&id=42"
    #[arg(default_value = "")]
    pub query: String,

    /// Path to addon config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    #[command(flatten)]
    pub playback: PlaybackArgs,
}

/// What the host reports as "now playing"
#[derive(clap::Args, Debug, Default)]
pub struct PlaybackArgs {
    /// Display title
    #[arg(long)]
    pub title: Option<String>,

    /// Original title (preferred for search)
    #[arg(long)]
    pub original_title: Option<String>,

    /// Release year
    #[arg(long, short = 'y')]
    pub year: Option<u16>,

    /// Season number (for TV shows)
    #[arg(long, short = 's')]
    pub season: Option<u32>,

    /// Episode number (for TV shows)
    #[arg(long, short = 'e')]
    pub episode: Option<u32>,

    /// TV show name
    #[arg(long)]
    pub tvshow: Option<String>,

    /// Path of the playing file (may be percent-encoded)
    #[arg(long)]
    pub file: Option<String>,

    /// External id (e.g. tt1375666)
    #[arg(long)]
    pub imdb_id: Option<String>,

    /// Size of the playing file in bytes
    #[arg(long)]
    pub file_size: Option<u64>,
}

impl Cli {
    /// Console host preloaded with the playback flags
    pub fn console_host(&self) -> ConsoleHost<std::io::Stdout> {
        let p = &self.playback;
        ConsoleHost::stdout(self.handle)
            .with_field(PlaybackField::Title, p.title.as_ref())
            .with_field(PlaybackField::OriginalTitle, p.original_title.as_ref())
            .with_field(PlaybackField::Year, p.year)
            .with_field(PlaybackField::Season, p.season)
            .with_field(PlaybackField::Episode, p.episode)
            .with_field(PlaybackField::TvShow, p.tvshow.as_ref())
            .with_field(PlaybackField::PlayingFile, p.file.as_ref())
            .with_field(PlaybackField::ImdbId, p.imdb_id.as_ref())
            .with_field(PlaybackField::FileSize, p.file_size)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use subtis::host::HostCollaborator;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_invocation() {
        let cli = Cli::parse_from([
            "subtis",
            "1",
            "?action=search",
            "--title",
            "Inception",
            "-y",
            "2010",
        ]);
        assert_eq!(cli.handle, 1);
        assert_eq!(cli.query, "?action=search");
        assert_eq!(cli.playback.title.as_deref(), Some("Inception"));
        assert_eq!(cli.playback.year, Some(2010));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_query_defaults_to_empty() {
        let cli = Cli::parse_from(["subtis", "-1"]);
        assert_eq!(cli.handle, -1);
        assert_eq!(cli.query, "");
    }

    #[test]
    fn test_console_host_gets_flags() {
        let cli = Cli::parse_from([
            "subtis",
            "3",
            "?action=search",
            "--original-title",
            "Breaking Bad",
            "-s",
            "1",
            "-e",
            "2",
            "--file-size",
            "1024",
        ]);
        let host = cli.console_host();
        assert_eq!(
            host.query_playback_field(PlaybackField::OriginalTitle),
            "Breaking Bad"
        );
        assert_eq!(host.query_playback_field(PlaybackField::Season), "1");
        assert_eq!(host.query_playback_field(PlaybackField::Episode), "2");
        assert_eq!(host.query_playback_field(PlaybackField::FileSize), "1024");
        assert_eq!(host.query_playback_field(PlaybackField::Title), "");
    }

    #[test]
    fn test_missing_handle_is_error() {
        assert!(Cli::try_parse_from(["subtis"]).is_err());
    }
}
