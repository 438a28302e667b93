use crate::backend::types::{ProgressSnapshot, ProgressStatus};

pub const MSG_EMPTY_URL: &str = "Lütfen geçerli bir URL girin";
pub const MSG_SUCCESS: &str = "İndirme başarılı!";
pub const MSG_CANCELLED: &str = "İndirme iptal edildi";
pub const MSG_DOWNLOAD_FAILED: &str = "İndirme başarısız";
pub const MSG_CONNECTING: &str = "Bağlanılıyor...";
pub const MSG_MERGING: &str = "Birleştiriliyor...";
pub const MSG_MERGING_INFO: &str = "Dosya birleştiriliyor (FFmpeg)...";

const INITIAL_PERCENT: &str = "0%";
const INITIAL_SIZE_INFO: &str = "0.0MB / 0.0MB";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// The status line under the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: MessageKind,
}

/// Everything a front-end needs to render the client, as one snapshot.
///
/// Published over a watch channel; consumers always see the latest state
/// and never a backlog of intermediate ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Whether the url/directory/option inputs accept interaction.
    pub controls_enabled: bool,
    /// Whether the cancel control accepts interaction.
    pub cancel_enabled: bool,
    pub progress_visible: bool,
    /// Progress text, verbatim from the server (e.g. "42%").
    pub percent: String,
    /// Proportional width of the progress indicator. Usually tracks
    /// `percent`, except while merging, when it is pinned to 100%.
    pub bar_width: String,
    pub speed: String,
    pub size_info: String,
    /// Playlist position counter. `None` means hidden — the counter only
    /// shows when the current tick carried one.
    pub playlist_counter: Option<String>,
    pub status_line: Option<StatusLine>,
    /// Filename of the last successful download, for the result card.
    pub saved_filename: Option<String>,
    pub download_dir: String,
    pub quality: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            controls_enabled: true,
            cancel_enabled: true,
            progress_visible: false,
            percent: INITIAL_PERCENT.to_string(),
            bar_width: INITIAL_PERCENT.to_string(),
            speed: String::new(),
            size_info: String::new(),
            playlist_counter: None,
            status_line: None,
            saved_filename: None,
            download_dir: String::new(),
            quality: None,
        }
    }

    /// Reset for a fresh submission: clear the previous outcome, disable the
    /// inputs, show the progress area with its placeholders.
    pub fn begin_session(&mut self, download_playlist: bool) {
        self.status_line = None;
        self.saved_filename = None;
        self.controls_enabled = false;
        self.progress_visible = true;
        self.percent = INITIAL_PERCENT.to_string();
        self.bar_width = INITIAL_PERCENT.to_string();
        self.speed = MSG_CONNECTING.to_string();
        self.size_info = INITIAL_SIZE_INFO.to_string();
        // An empty counter is only worth showing when a playlist was asked for.
        self.playlist_counter = if download_playlist {
            Some(String::new())
        } else {
            None
        };
    }

    /// Fold one poll snapshot into the progress fields.
    ///
    /// Only `downloading` and `merging` render; every other status is left to
    /// the submission response. The playlist counter is taken from this tick
    /// alone, so it hides again the moment the server stops reporting one.
    pub fn apply_snapshot(&mut self, snapshot: &ProgressSnapshot) {
        match snapshot.status {
            ProgressStatus::Downloading => {
                self.percent = snapshot.percent.clone();
                self.bar_width = snapshot.percent.clone();
                self.speed = snapshot.speed.clone();
                self.size_info = snapshot.size_info.clone();
                self.playlist_counter = snapshot.playlist_info.clone();
            }
            ProgressStatus::Merging => {
                self.speed = MSG_MERGING.to_string();
                self.size_info = MSG_MERGING_INFO.to_string();
                self.bar_width = "100%".to_string();
            }
            _ => {}
        }
    }

    pub fn finish_success(&mut self, filename: &str) {
        self.status_line = Some(StatusLine {
            text: MSG_SUCCESS.to_string(),
            kind: MessageKind::Success,
        });
        self.saved_filename = Some(filename.to_string());
    }

    pub fn finish_cancelled(&mut self) {
        self.status_line = Some(StatusLine {
            text: MSG_CANCELLED.to_string(),
            kind: MessageKind::Error,
        });
    }

    pub fn finish_error(&mut self, detail: &str) {
        self.status_line = Some(StatusLine {
            text: detail.to_string(),
            kind: MessageKind::Error,
        });
    }

    /// The guaranteed-cleanup leg: hide progress, hand the controls back.
    pub fn end_session(&mut self) {
        self.progress_visible = false;
        self.controls_enabled = true;
        self.cancel_enabled = true;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downloading(percent: &str, playlist_info: Option<&str>) -> ProgressSnapshot {
        ProgressSnapshot {
            status: ProgressStatus::Downloading,
            percent: percent.to_string(),
            speed: "1.2MB/s".to_string(),
            size_info: "3.1MB / 8.0MB".to_string(),
            playlist_info: playlist_info.map(str::to_string),
        }
    }

    #[test]
    fn test_downloading_tick_renders_fields() {
        let mut view = ViewState::new();
        view.begin_session(false);
        view.apply_snapshot(&downloading("42%", None));

        assert_eq!(view.percent, "42%");
        assert_eq!(view.bar_width, "42%");
        assert_eq!(view.speed, "1.2MB/s");
        assert_eq!(view.size_info, "3.1MB / 8.0MB");
    }

    #[test]
    fn test_merging_forces_bar_to_full() {
        let mut view = ViewState::new();
        view.begin_session(false);
        view.apply_snapshot(&downloading("42%", None));

        view.apply_snapshot(&ProgressSnapshot {
            status: ProgressStatus::Merging,
            percent: String::new(),
            speed: String::new(),
            size_info: String::new(),
            playlist_info: None,
        });

        assert_eq!(view.bar_width, "100%");
        // The text keeps the last downloaded percent.
        assert_eq!(view.percent, "42%");
        assert_eq!(view.speed, MSG_MERGING);
        assert_eq!(view.size_info, MSG_MERGING_INFO);
    }

    #[test]
    fn test_playlist_counter_never_goes_stale() {
        let mut view = ViewState::new();
        view.begin_session(true);
        assert_eq!(view.playlist_counter.as_deref(), Some(""));

        view.apply_snapshot(&downloading("10%", Some("2 / 7")));
        assert_eq!(view.playlist_counter.as_deref(), Some("2 / 7"));

        // Next tick without playlist info hides the counter again.
        view.apply_snapshot(&downloading("11%", None));
        assert_eq!(view.playlist_counter, None);
    }

    #[test]
    fn test_non_progress_statuses_are_ignored() {
        let mut view = ViewState::new();
        view.begin_session(false);
        view.apply_snapshot(&downloading("77%", None));
        let before = view.clone();

        for status in [
            ProgressStatus::Idle,
            ProgressStatus::Done,
            ProgressStatus::Cancelled,
            ProgressStatus::Error,
            ProgressStatus::Unknown,
        ] {
            view.apply_snapshot(&ProgressSnapshot {
                status,
                percent: "99%".to_string(),
                speed: "9MB/s".to_string(),
                size_info: "x".to_string(),
                playlist_info: Some("5 / 5".to_string()),
            });
        }

        assert_eq!(view, before);
    }

    #[test]
    fn test_session_lifecycle_toggles_controls() {
        let mut view = ViewState::new();
        view.begin_session(false);
        assert!(!view.controls_enabled);
        assert!(view.progress_visible);
        assert_eq!(view.speed, MSG_CONNECTING);

        view.finish_success("video.mp4");
        view.end_session();
        assert!(view.controls_enabled);
        assert!(!view.progress_visible);
        assert_eq!(view.saved_filename.as_deref(), Some("video.mp4"));
        let line = view.status_line.expect("status line set");
        assert_eq!(line.text, MSG_SUCCESS);
        assert_eq!(line.kind, MessageKind::Success);
    }
}
