//! YouTube URL parsing.

use regex::Regex;
use std::sync::OnceLock;

/// Matches the common YouTube URL shapes:
/// `youtube.com/watch?v=ID`, `youtu.be/ID`, `youtube.com/embed/ID`.
fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .expect("video id regex is valid")
    })
}

/// Extract a video identifier from a YouTube URL, if one is present.
pub fn extract_video_id(url: &str) -> Option<&str> {
    video_id_regex()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
}
