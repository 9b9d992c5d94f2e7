use once_cell::sync::Lazy;
use regex::Regex;

/// What a channel-ish input turned out to be after pattern matching.
///
/// The variants carry the captured fragment, not the whole URL; `Unmatched`
/// keeps the original input so direct IDs and free-text queries pass through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// `/channel/<id>` - a direct channel ID
    Id(String),
    /// `/c/<name>` - a legacy custom path
    Custom(String),
    /// `/@<handle>` - a channel handle
    Handle(String),
    /// `/user/<name>` - a legacy username
    Username(String),
    /// No channel pattern matched; the original input, unchanged
    Unmatched(String),
}

static VIDEO_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"youtube\.com/watch\?.*?v=([A-Za-z0-9_-]{11})",
        r"youtu\.be/([A-Za-z0-9_-]{11})",
        r"youtube\.com/v/([A-Za-z0-9_-]{11})",
        r"youtube\.com/embed/([A-Za-z0-9_-]{11})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("video pattern"))
    .collect()
});

static CHANNEL_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtube\.com/channel/([A-Za-z0-9_-]+)").expect("channel pattern"));
static CUSTOM_PATH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtube\.com/c/([^/?&#\s]+)").expect("custom path pattern"));
static HANDLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtube\.com/@([^/?&#\s]+)").expect("handle pattern"));
static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"youtube\.com/user/([^/?&#\s]+)").expect("username pattern"));

static CANONICAL_CHANNEL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^UC[A-Za-z0-9_-]{22}$").expect("canonical id pattern"));

/// Extract a video ID from any of the supported watch URL shapes.
///
/// First matching pattern wins. An unrecognized shape returns the trimmed
/// input unchanged so a bare video ID can be passed straight through; this
/// step never fails.
pub fn video_id(input: &str) -> String {
    let input = input.trim();
    for pattern in VIDEO_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(input) {
            return caps[1].to_string();
        }
    }
    input.to_string()
}

/// Classify a channel URL into the identifier fragment it carries.
///
/// Patterns are tried in a fixed order (direct ID, custom path, handle,
/// username); the first match wins. Anything else is `Unmatched`.
pub fn channel_ref(input: &str) -> ChannelRef {
    let input = input.trim();
    if let Some(caps) = CHANNEL_ID_PATTERN.captures(input) {
        return ChannelRef::Id(caps[1].to_string());
    }
    if let Some(caps) = CUSTOM_PATH_PATTERN.captures(input) {
        return ChannelRef::Custom(caps[1].to_string());
    }
    if let Some(caps) = HANDLE_PATTERN.captures(input) {
        return ChannelRef::Handle(caps[1].to_string());
    }
    if let Some(caps) = USERNAME_PATTERN.captures(input) {
        return ChannelRef::Username(caps[1].to_string());
    }
    ChannelRef::Unmatched(input.to_string())
}

/// Check whether an identifier already has the canonical `UC…` channel form.
pub fn is_canonical_channel_id(id: &str) -> bool {
    CANONICAL_CHANNEL_ID.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ&t=120"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(video_id("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_v_url() {
        assert_eq!(
            video_id("https://www.youtube.com/v/dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_video_passthrough() {
        // Unrecognized shapes fall through unchanged, and idempotently
        assert_eq!(video_id("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(video_id("  not-a-url  "), "not-a-url");
        assert_eq!(video_id(&video_id("not-a-url")), "not-a-url");
    }

    #[test]
    fn test_channel_id_url() {
        assert_eq!(
            channel_ref("https://www.youtube.com/channel/UC1234567890abcdefghijkl"),
            ChannelRef::Id("UC1234567890abcdefghijkl".to_string())
        );
    }

    #[test]
    fn test_custom_path_url() {
        assert_eq!(
            channel_ref("https://www.youtube.com/c/SomeCreator/videos"),
            ChannelRef::Custom("SomeCreator".to_string())
        );
    }

    #[test]
    fn test_handle_url() {
        assert_eq!(
            channel_ref("https://www.youtube.com/@somehandle"),
            ChannelRef::Handle("somehandle".to_string())
        );
    }

    #[test]
    fn test_username_url() {
        assert_eq!(
            channel_ref("https://www.youtube.com/user/legacyname"),
            ChannelRef::Username("legacyname".to_string())
        );
    }

    #[test]
    fn test_channel_first_match_wins() {
        // /channel/ is tried before /user/, so a URL carrying both resolves as a direct ID
        assert_eq!(
            channel_ref("https://www.youtube.com/channel/UC1234567890abcdefghijkl/user/x"),
            ChannelRef::Id("UC1234567890abcdefghijkl".to_string())
        );
    }

    #[test]
    fn test_channel_passthrough() {
        assert_eq!(
            channel_ref("The Best Cooking Channel"),
            ChannelRef::Unmatched("The Best Cooking Channel".to_string())
        );
    }

    #[test]
    fn test_canonical_channel_id() {
        assert!(is_canonical_channel_id("UC1234567890abcdefghijkl"));
        assert!(!is_canonical_channel_id("UCshort"));
        assert!(!is_canonical_channel_id("XX1234567890abcdefghijkl"));
        assert!(!is_canonical_channel_id("somehandle"));
    }
}
