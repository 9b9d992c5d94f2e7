use serde::{Deserialize, Serialize};

pub mod api;
pub mod resolver;
pub mod transcript;
pub mod url;

/// One timed caption unit as returned by the caption endpoint.
///
/// Segments arrive ordered by `start` ascending and are never mutated after
/// retrieval; they only live for the duration of a single export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Display duration in seconds
    pub duration: f64,
}
