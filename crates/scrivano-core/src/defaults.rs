//! Default values and environment variable names shared across crates.

// ─── Environment variable names ────────────────────────────────────────────

/// Gemini API key. Unset means guest mode: deterministic canned analysis.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Override the Generative Language API base URL (tests, proxies).
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
/// Gemini model slug.
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
/// Natural language analysis results are written in.
pub const ENV_ANALYSIS_LANGUAGE: &str = "ANALYSIS_LANGUAGE";
/// OpenAI-compatible Whisper server base URL. Unset means the audio
/// transcription capability is a visible stub.
pub const ENV_WHISPER_BASE_URL: &str = "WHISPER_BASE_URL";
/// Whisper model slug.
pub const ENV_WHISPER_MODEL: &str = "WHISPER_MODEL";

// ─── Defaults ──────────────────────────────────────────────────────────────

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const ANALYSIS_LANGUAGE: &str = "English";
pub const DEFAULT_WHISPER_MODEL: &str = "whisper-1";

// ─── Upload policy ─────────────────────────────────────────────────────────

/// Single-file upload ceiling: 50 MB.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// MIME types accepted on the image analysis route.
pub const ALLOWED_IMAGE_MIMES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// MIME types accepted on the PDF analysis route.
pub const ALLOWED_PDF_MIMES: &[&str] = &["application/pdf"];

/// MIME types accepted on the audio analysis route.
pub const ALLOWED_AUDIO_MIMES: &[&str] =
    &["audio/wav", "audio/mp3", "audio/mpeg", "audio/ogg"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_ceiling_is_50_mb() {
        assert_eq!(MAX_UPLOAD_BYTES, 52_428_800);
    }

    #[test]
    fn mime_allow_lists_are_disjoint_per_kind() {
        for mime in ALLOWED_IMAGE_MIMES {
            assert!(!ALLOWED_PDF_MIMES.contains(mime));
            assert!(!ALLOWED_AUDIO_MIMES.contains(mime));
        }
    }
}
