use serde::{Deserialize, Serialize};
use url::Url;

use crate::job::{Format, OneOrMany};

/// Identifies one artifact and where to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotDescriptor {
    pub id: String,
    pub href: String,
}

/// Artifact ids produced by one capture job.
///
/// A delay list with more than one entry yields `<id>-1.<ext>`, `<id>-2.<ext>`, ...;
/// anything else (no delay, a single delay, a one-element list) yields `<id>.<ext>`.
pub fn artifact_ids(id: &str, format: Format, delay: Option<&OneOrMany<u64>>) -> Vec<String> {
    let ext = format.extension();
    match delay {
        Some(delay) if delay.is_multiple() => (1..=delay.as_slice().len())
            .map(|n| format!("{id}-{n}.{ext}"))
            .collect(),
        _ => vec![format!("{id}.{ext}")],
    }
}

/// Content type served for an artifact id, chosen by its extension.
pub fn content_type_for(id: &str) -> &'static str {
    match id.rsplit_once('.').map(|(_, ext)| ext) {
        Some("jpg") => Format::Jpg.mime_type(),
        Some("png") => Format::Png.mime_type(),
        _ => Format::Pdf.mime_type(),
    }
}

/// Scheme, host and path of the request that produced or listed artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

impl RequestOrigin {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
        }
    }

    /// Resolve `<path><id>` against `<scheme>://<host>`.
    pub fn href(&self, id: &str) -> String {
        let relative = format!("{}{}", self.path, id);
        Url::parse(&format!("{}://{}", self.scheme, self.host))
            .and_then(|base| base.join(&relative))
            .map(|url| url.to_string())
            .unwrap_or(relative)
    }

    pub fn descriptor(&self, id: impl Into<String>) -> ScreenshotDescriptor {
        let id = id.into();
        ScreenshotDescriptor {
            href: self.href(&id),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_falls_back_to_pdf() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.pdf"), "application/pdf");
        assert_eq!(content_type_for("noext"), "application/pdf");
    }

    #[test]
    fn href_joins_request_path_and_id() {
        let origin = RequestOrigin::new("http", "localhost:8000", "/");
        assert_eq!(origin.href("abc.png"), "http://localhost:8000/abc.png");

        let nested = RequestOrigin::new("https", "shots.example.com", "/captures/");
        assert_eq!(
            nested.href("abc-1.jpg"),
            "https://shots.example.com/captures/abc-1.jpg"
        );
    }

    #[test]
    fn href_falls_back_to_relative_on_bad_host() {
        let origin = RequestOrigin::new("http", "", "/");
        assert_eq!(origin.href("abc.png"), "/abc.png");
    }
}
