//! Content-kind detection and media decodability probing.

/// Generic kind used when neither the transport nor the extension tells more.
pub const UNKNOWN_KIND: &str = "application/octet-stream";

/// Extension → content kind table used when no usable `Content-Type` exists.
const EXTENSION_KINDS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("bmp", "image/bmp"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("oga", "audio/ogg"),
    ("flac", "audio/flac"),
    ("aac", "audio/aac"),
    ("m4a", "audio/mp4"),
    ("opus", "audio/opus"),
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("ogg", "video/ogg"),
    ("mov", "video/quicktime"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("json", "application/json"),
    ("html", "text/html"),
    ("txt", "text/plain"),
];

/// Kinds the host surface decodes with confidence, per family.
const IMAGE_KINDS: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/avif",
    "image/bmp",
    "image/x-icon",
    "image/svg+xml",
];
const AUDIO_KINDS: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/wave",
    "audio/x-wav",
    "audio/ogg",
    "audio/opus",
    "audio/flac",
    "audio/aac",
    "audio/mp4",
    "audio/webm",
];
const VIDEO_KINDS: &[&str] = &["video/mp4", "video/webm", "video/ogg"];

/// Normalize a transport content type, falling back to the URL extension.
pub fn content_kind(url: &str, content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty() && value != UNKNOWN_KIND);
    declared
        .or_else(|| sniff_extension(url).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_KIND.to_string())
}

fn sniff_extension(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;
    EXTENSION_KINDS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, kind)| *kind)
}

/// Media element families that probe decodability before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFamily {
    Image,
    Audio,
    Video,
}

impl MediaFamily {
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

/// Tri-state answer to "can this content kind be decoded?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playability {
    /// Supported.
    Probably,
    /// Uncertain; rendering is attempted with a warning.
    Maybe,
    /// Unsupported; rendering fails.
    No,
}

/// Decodability probe of the host rendering surface.
pub trait MediaSupport: Send + Sync {
    fn can_play(&self, family: MediaFamily, content_kind: &str) -> Playability;
}

/// Table-driven probe matching what common browsers decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMediaSupport;

impl MediaSupport for StaticMediaSupport {
    fn can_play(&self, family: MediaFamily, content_kind: &str) -> Playability {
        let kind = content_kind.trim().to_ascii_lowercase();
        let (known, prefix) = match family {
            MediaFamily::Image => (IMAGE_KINDS, "image/"),
            MediaFamily::Audio => (AUDIO_KINDS, "audio/"),
            MediaFamily::Video => (VIDEO_KINDS, "video/"),
        };
        if known.contains(&kind.as_str()) {
            return Playability::Probably;
        }
        if kind.starts_with(prefix) {
            return Playability::Maybe;
        }
        // Video containers frequently carry audio-only streams.
        if family == MediaFamily::Audio && VIDEO_KINDS.contains(&kind.as_str()) {
            return Playability::Maybe;
        }
        Playability::No
    }
}
