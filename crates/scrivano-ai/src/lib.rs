//! # scrivano-ai
//!
//! AI content analysis adapter for scrivano.
//!
//! This crate provides:
//! - The [`AnalysisBackend`] trait with one operation per content kind
//! - [`GeminiBackend`]: live Generative Language API implementation
//! - [`GuestBackend`]: deterministic degraded mode when no credential is set
//! - Pluggable capabilities for PDF text extraction, audio transcription
//!   (live Whisper or visible stub), and video metadata
//! - [`AnalysisService`]: orchestration with in-band failure recovery
//! - YouTube URL parsing
//!
//! # Feature Flags
//!
//! - `mock`: expose the mock backend to downstream test suites

pub mod backend;
pub mod capability;
pub mod gemini;
pub mod guest;
pub mod service;
pub mod youtube;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use backend::AnalysisBackend;
pub use capability::{
    StubTextExtractor, StubTranscriber, StubVideoMetadata, TextExtractor, Transcriber, Transcript,
    VideoMetadata, VideoMetadataFetcher, WhisperTranscriber,
};
pub use gemini::GeminiBackend;
pub use guest::GuestBackend;
pub use service::AnalysisService;
pub use youtube::extract_video_id;
