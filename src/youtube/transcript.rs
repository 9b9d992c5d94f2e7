use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::youtube::TranscriptSegment;

const WATCH_URL: &str = "https://www.youtube.com/watch";
const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";

/// Failure classes for transcript retrieval.
///
/// Callers must distinguish `NoCaptions` (tallied separately, not a download
/// failure) from everything else; both are non-fatal to a batch loop.
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The video exists but carries no caption data
    #[error("no captions available for this video")]
    NoCaptions,

    #[error("transcript request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("unexpected transcript payload: {0}")]
    Parse(String),
}

/// Fetches caption transcripts straight from the watch page.
///
/// The watch page embeds the player response JSON, whose `captionTracks`
/// array points at the timedtext endpoint for every available track; the
/// track payload is requested in `json3` form and mapped onto segments.
pub struct TranscriptClient {
    http: reqwest::Client,
    language: String,
}

impl TranscriptClient {
    pub fn new(http: reqwest::Client, language: impl Into<String>) -> Self {
        Self {
            http,
            language: language.into(),
        }
    }

    /// Retrieve the ordered segment sequence for a video.
    pub async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        tracing::debug!("fetching watch page for {}", video_id);
        let html = self
            .http
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let tracks = caption_tracks(&html)?;
        let track = pick_track(&tracks, &self.language).ok_or(TranscriptError::NoCaptions)?;
        tracing::debug!(
            "using caption track lang={:?} kind={:?}",
            track.language_code,
            track.kind
        );

        let payload: Json3Payload = self
            .http
            .get(&track.base_url)
            .query(&[("fmt", "json3")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let segments = segments_from_events(payload.events);
        if segments.is_empty() {
            return Err(TranscriptError::NoCaptions);
        }
        Ok(segments)
    }
}

/// Anything that can produce a transcript for a video ID.
///
/// Lets batch loops run against mocks; `TranscriptClient` is the only
/// production implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError>;
}

#[async_trait]
impl TranscriptSource for TranscriptClient {
    async fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        self.fetch(video_id).await
    }
}

/// Locate and parse the `captionTracks` array embedded in the watch page.
fn caption_tracks(html: &str) -> Result<Vec<CaptionTrack>, TranscriptError> {
    let start = match html.find(CAPTION_TRACKS_MARKER) {
        Some(idx) => idx + CAPTION_TRACKS_MARKER.len(),
        // Videos without captions simply lack the key
        None => return Err(TranscriptError::NoCaptions),
    };

    let mut de = serde_json::Deserializer::from_str(&html[start..]);
    let tracks = <Vec<CaptionTrack> as Deserialize>::deserialize(&mut de)
        .map_err(|err| TranscriptError::Parse(format!("caption track list: {}", err)))?;

    if tracks.is_empty() {
        return Err(TranscriptError::NoCaptions);
    }
    Ok(tracks)
}

/// Choose the track to download: a manually authored track in the preferred
/// language beats an auto-generated one, which beats the first track listed.
fn pick_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    let in_language = |track: &&CaptionTrack| {
        track
            .language_code
            .as_deref()
            .is_some_and(|code| code == language || code.starts_with(&format!("{}-", language)))
    };

    tracks
        .iter()
        .filter(in_language)
        .find(|track| track.kind.as_deref() != Some("asr"))
        .or_else(|| tracks.iter().find(in_language))
        .or_else(|| tracks.first())
}

/// Map json3 events onto transcript segments.
///
/// Events without renderable text (window markers, bare newlines) are
/// skipped; a missing duration becomes 0.
fn segments_from_events(events: Vec<Json3Event>) -> Vec<TranscriptSegment> {
    events
        .into_iter()
        .filter_map(|event| {
            let segs = event.segs?;
            let text = segs
                .iter()
                .flat_map(|seg| seg.utf8.split_whitespace())
                .collect::<Vec<_>>()
                .join(" ");
            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment {
                text,
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms.unwrap_or(0) as f64 / 1000.0,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode", default)]
    language_code: Option<String>,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Json3Payload {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    t_start_ms: i64,
    #[serde(rename = "dDurationMs", default)]
    d_duration_ms: Option<i64>,
    #[serde(default)]
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}
