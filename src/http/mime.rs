//! MIME type lookup
//!
//! Returns the Content-Type registered for a file extension, if any.

/// Look up the MIME type for an extension (without the leading dot)
///
/// # Examples
/// ```
/// use ssrf_sheriff::http::mime::lookup;
/// assert_eq!(lookup("json"), Some("application/json"));
/// assert_eq!(lookup("mp3"), Some("audio/mpeg"));
/// assert_eq!(lookup("unknown"), None);
/// ```
pub fn lookup(extension: &str) -> Option<&'static str> {
    let mime = match extension {
        // Text and structured data
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "css" => "text/css",
        "xml" => "application/xml",
        "json" => "application/json",
        "js" => "application/javascript",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",

        // Audio and video
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",

        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}
