// Client engine for a media-download backend — session control, progress
// polling, and keep-alive over a small HTTP/JSON contract.

pub mod api;
pub mod backend;
pub mod config;
pub mod session;

pub use api::client::DownloadClient;
pub use backend::types::DownloadRequest;
pub use config::ClientConfig;
pub use session::controller::{SessionError, SessionOutcome, SessionResult};
pub use session::view::ViewState;
