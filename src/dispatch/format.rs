//! Response format selection
//!
//! Maps a request path's extension onto one of a fixed set of formats.

use crate::http::mime;

/// Content type used for unmatched extensions and failed lookups
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// Output format chosen from the request extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Xml,
    Html,
    Csv,
    Text,
    Png,
    Jpeg,
    Gif,
    Mp3,
    Mp4,
    /// Anything not in the table, including no extension at all
    Fallback,
}

/// Extension table, exact and case-sensitive
const FORMAT_TABLE: &[(&str, ResponseFormat)] = &[
    ("json", ResponseFormat::Json),
    ("xml", ResponseFormat::Xml),
    ("html", ResponseFormat::Html),
    ("csv", ResponseFormat::Csv),
    ("txt", ResponseFormat::Text),
    ("png", ResponseFormat::Png),
    ("jpg", ResponseFormat::Jpeg),
    ("jpeg", ResponseFormat::Jpeg),
    ("gif", ResponseFormat::Gif),
    ("mp3", ResponseFormat::Mp3),
    ("mp4", ResponseFormat::Mp4),
];

impl ResponseFormat {
    pub fn from_extension(extension: &str) -> Self {
        FORMAT_TABLE
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map_or(Self::Fallback, |(_, format)| *format)
    }

    /// Template or asset backing this format, if any
    pub const fn template_name(self) -> Option<&'static str> {
        match self {
            Self::Html => Some("html.html"),
            Self::Csv => Some("csv.csv"),
            Self::Png => Some("png.png"),
            Self::Jpeg => Some("jpeg.jpg"),
            Self::Gif => Some("gif.gif"),
            Self::Mp3 => Some("mp3.mp3"),
            Self::Mp4 => Some("mp4.mp4"),
            Self::Json | Self::Xml | Self::Text | Self::Fallback => None,
        }
    }

    /// Every template name the dispatcher can ask for
    pub fn all_template_names() -> impl Iterator<Item = &'static str> {
        FORMAT_TABLE
            .iter()
            .filter_map(|(_, format)| format.template_name())
            .fold(Vec::new(), |mut names, name| {
                if !names.contains(&name) {
                    names.push(name);
                }
                names
            })
            .into_iter()
    }
}

/// Extension of the final path segment, without the dot
///
/// `/a/b.json` gives `json`, `/a.d/file` and `/file.` give an empty string.
pub fn extract_extension(path: &str) -> &str {
    let segment = path.rsplit('/').next().unwrap_or(path);
    segment.rfind('.').map_or("", |idx| &segment[idx + 1..])
}

/// Content type for the matched extension
pub fn content_type_for(format: ResponseFormat, extension: &str) -> &'static str {
    if format == ResponseFormat::Fallback {
        return FALLBACK_CONTENT_TYPE;
    }
    mime::lookup(extension).unwrap_or(FALLBACK_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_extension() {
        assert_eq!(extract_extension("/exfil.json"), "json");
        assert_eq!(extract_extension("/a/b/c.tar.gz"), "gz");
        assert_eq!(extract_extension("/dir.json/file"), "");
        assert_eq!(extract_extension("/file."), "");
        assert_eq!(extract_extension("/"), "");
        assert_eq!(extract_extension(""), "");
        assert_eq!(extract_extension("/.json"), "json");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(ResponseFormat::from_extension("json"), ResponseFormat::Json);
        assert_eq!(
            ResponseFormat::from_extension("JSON"),
            ResponseFormat::Fallback
        );
        assert_eq!(ResponseFormat::from_extension(""), ResponseFormat::Fallback);
    }

    #[test]
    fn test_jpeg_aliases() {
        assert_eq!(ResponseFormat::from_extension("jpg"), ResponseFormat::Jpeg);
        assert_eq!(ResponseFormat::from_extension("jpeg"), ResponseFormat::Jpeg);
    }

    #[test]
    fn test_content_types() {
        let cases = [
            ("json", "application/json"),
            ("xml", "application/xml"),
            ("html", "text/html"),
            ("csv", "text/csv"),
            ("txt", "text/plain"),
            ("png", "image/png"),
            ("jpg", "image/jpeg"),
            ("jpeg", "image/jpeg"),
            ("gif", "image/gif"),
            ("mp3", "audio/mpeg"),
            ("mp4", "video/mp4"),
            ("css", "text/plain"),
            ("", "text/plain"),
        ];
        for (ext, expected) in cases {
            let format = ResponseFormat::from_extension(ext);
            assert_eq!(content_type_for(format, ext), expected, "extension {ext:?}");
        }
    }

    #[test]
    fn test_template_names_are_unique() {
        let names: Vec<_> = ResponseFormat::all_template_names().collect();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"jpeg.jpg"));
    }
}
