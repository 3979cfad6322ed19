//! Reelgrab engine: HTTP calls, timers and download persistence behind a command channel.
mod download;
mod engine;
mod filename;
mod metadata;
mod persist;
mod timer;
mod types;
mod wire;

pub use download::{extension_for_content_type, DownloadRequest, DownloadSettings, ProxyDownloader};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use filename::download_filename;
pub use metadata::{ClientSettings, MetadataClient, ReqwestMetadataClient};
pub use persist::{ensure_output_dir, PersistError, StagedFile};
pub use timer::{ChannelEventSink, EventSink, ResetTimer, Timer, TokioTimer};
pub use types::{EngineEvent, FailureKind, FetchError, MetadataResponse, RequestId, SavedDownload};
pub use wire::MetadataBody;
