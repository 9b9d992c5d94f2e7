//! yt-transcripts - A Rust CLI tool for downloading YouTube closed-caption transcripts
//!
//! This library provides functionality to fetch caption transcripts for single videos,
//! newline-delimited URL lists, or every video on a channel, and export them to disk
//! as JSON, plain text, or SRT subtitle files.

pub mod cli;
pub mod config;
pub mod download;
pub mod output;
pub mod utils;
pub mod youtube;

pub use cli::{Cli, OutputFormat};
pub use config::Config;
pub use download::{Downloader, RunSummary};
pub use youtube::transcript::TranscriptError;
pub use youtube::TranscriptSegment;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
