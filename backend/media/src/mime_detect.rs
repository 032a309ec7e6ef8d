//! MIME detection for downloaded outputs and the choice of how to deliver them.

use std::path::Path;

use linkgrab_core::MediaKind;

/// MIME type from the file extension; yt-dlp names outputs by container.
pub fn detect_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "opus" => "audio/opus",
        "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}

/// How a finished download is posted to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    /// Inline, streamable video message.
    Video,
    /// Generic file attachment.
    Document,
}

/// Audio selections always go out as documents. Video selections play inline
/// only when the container is one chat clients stream natively.
pub fn delivery_kind(path: &Path, requested: MediaKind) -> DeliveryKind {
    if requested == MediaKind::Audio {
        return DeliveryKind::Document;
    }
    match detect_mime_type(path) {
        "video/mp4" | "video/quicktime" => DeliveryKind::Video,
        _ => DeliveryKind::Document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_mp4() {
        assert_eq!(detect_mime_type(&PathBuf::from("tiktok_1.mp4")), "video/mp4");
    }

    #[test]
    fn detects_m4a() {
        assert_eq!(detect_mime_type(&PathBuf::from("youtube_1.M4A")), "audio/mp4");
    }

    #[test]
    fn unknown_extension_fallback() {
        assert_eq!(detect_mime_type(&PathBuf::from("file.xyz")), "application/octet-stream");
    }

    #[test]
    fn audio_requests_are_documents() {
        assert_eq!(
            delivery_kind(&PathBuf::from("a.mp4"), MediaKind::Audio),
            DeliveryKind::Document
        );
    }

    #[test]
    fn non_streamable_video_is_document() {
        assert_eq!(delivery_kind(&PathBuf::from("a.mp4"), MediaKind::Video), DeliveryKind::Video);
        assert_eq!(
            delivery_kind(&PathBuf::from("a.webm"), MediaKind::Video),
            DeliveryKind::Document
        );
    }
}
