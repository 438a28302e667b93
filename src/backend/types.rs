use serde::{Deserialize, Serialize};

/// One download submission. Constructed fresh per session, immutable once sent.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    pub audio_only: bool,
    pub download_playlist: bool,
}

impl DownloadRequest {
    /// A plain video download with server-side defaults for everything else.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            download_dir: None,
            quality: None,
            audio_only: false,
            download_playlist: false,
        }
    }
}

/// Terminal response of the download endpoint.
///
/// `filename` and `full_path` are only present on the success path; a
/// cancelled job carries just its status.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadResponse {
    pub status: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub full_path: Option<String>,
}

/// Job phase as reported by the progress endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Idle,
    Starting,
    Downloading,
    Merging,
    Done,
    Cancelled,
    Error,
    /// Any status string this client does not know. Ticks ignore it.
    #[serde(other)]
    Unknown,
}

/// One poll of the progress endpoint. Transient — rendered and discarded.
///
/// `percent` is a pre-formatted string (e.g. "42%"), consumed verbatim for
/// both the progress text and the proportional bar width.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressSnapshot {
    pub status: ProgressStatus,
    #[serde(default)]
    pub percent: String,
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub size_info: String,
    #[serde(default)]
    pub playlist_info: Option<String>,
}

/// Server-side defaults fetched at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub default_dir: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}
