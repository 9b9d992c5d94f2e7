use anyhow::Result;
use std::fmt::Write as _;

use crate::youtube::TranscriptSegment;

/// Full segment list as a pretty-printed JSON array.
///
/// No derived fields; non-ASCII text is preserved literally.
pub fn format_as_json(segments: &[TranscriptSegment]) -> Result<String> {
    Ok(serde_json::to_string_pretty(segments)?)
}

/// One line of caption text per segment, in order, newline-terminated.
pub fn format_as_txt(segments: &[TranscriptSegment]) -> String {
    let mut output = String::new();
    for segment in segments {
        output.push_str(&segment.text);
        output.push('\n');
    }
    output
}

/// Standard SRT: sequential 1-based cue numbers, `HH:MM:SS,mmm` timestamps
/// with end = start + duration, and a blank line between cues.
pub fn format_as_srt(segments: &[TranscriptSegment]) -> String {
    let mut output = String::new();
    for (index, segment) in segments.iter().enumerate() {
        let end = segment.start + segment.duration;
        let _ = writeln!(
            output,
            "{}\n{} --> {}\n{}\n",
            index + 1,
            srt_timestamp(segment.start),
            srt_timestamp(end),
            segment.text
        );
    }
    output
}

/// Render seconds as an SRT timestamp, millisecond precision.
pub fn srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str, start: f64, duration: f64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            start,
            duration,
        }
    }

    #[test]
    fn test_srt_timestamp() {
        assert_eq!(srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(srt_timestamp(61.5), "00:01:01,500");
        assert_eq!(srt_timestamp(63.75), "00:01:03,750");
        assert_eq!(srt_timestamp(3661.042), "01:01:01,042");
    }

    #[test]
    fn test_srt_end_is_start_plus_duration() {
        let srt = format_as_srt(&[segment("hello", 61.5, 2.25)]);
        assert_eq!(srt, "1\n00:01:01,500 --> 00:01:03,750\nhello\n\n");
    }

    #[test]
    fn test_srt_cues_are_numbered_and_separated() {
        let srt = format_as_srt(&[segment("one", 0.0, 1.0), segment("two", 1.0, 0.0)]);
        let cues: Vec<&str> = srt.trim_end().split("\n\n").collect();
        assert_eq!(cues.len(), 2);
        assert!(cues[0].starts_with("1\n00:00:00,000 --> 00:00:01,000"));
        // Zero duration collapses the cue to a point in time
        assert!(cues[1].starts_with("2\n00:00:01,000 --> 00:00:01,000"));
    }

    #[test]
    fn test_txt_is_one_line_per_segment() {
        let txt = format_as_txt(&[segment("hello", 61.5, 2.25)]);
        assert_eq!(txt, "hello\n");
        assert_eq!(txt.lines().count(), 1);
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let segments = vec![
            segment("hello", 61.5, 2.25),
            segment("héllo wörld ∆", 63.75, 0.0),
        ];
        let json = format_as_json(&segments).unwrap();
        let parsed: Vec<TranscriptSegment> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, segments);
    }

    #[test]
    fn test_json_preserves_non_ascii_literally() {
        let json = format_as_json(&[segment("héllo", 0.0, 1.0)]).unwrap();
        assert!(json.contains("héllo"));
        assert!(!json.contains("\\u"));
    }
}
