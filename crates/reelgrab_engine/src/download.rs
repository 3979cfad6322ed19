use std::path::PathBuf;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::metadata::map_reqwest_error;
use crate::{
    download_filename, EngineEvent, EventSink, FailureKind, FetchError, PersistError, RequestId,
    SavedDownload, StagedFile,
};

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub connect_timeout: Duration,
    /// Gap allowed between two received chunks.
    pub read_timeout: Duration,
    pub max_bytes: Option<u64>,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(60),
            max_bytes: None,
        }
    }
}

/// Everything needed to save what the proxy endpoint streams back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub target: String,
    pub title: String,
    pub source_url: String,
    pub output_dir: PathBuf,
}

/// Streams the proxy-download response to disk, the way a browser would.
#[derive(Debug, Clone)]
pub struct ProxyDownloader {
    settings: DownloadSettings,
    client: reqwest::Client,
}

impl ProxyDownloader {
    pub fn new(settings: DownloadSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub async fn download(
        &self,
        request_id: RequestId,
        request: &DownloadRequest,
        sink: &dyn EventSink,
    ) -> Result<SavedDownload, FetchError> {
        let target = reqwest::Url::parse(&request.target)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let (Some(max_bytes), Some(content_len)) =
            (self.settings.max_bytes, response.content_length())
        {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "download too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut staged = StagedFile::new_in(&request.output_dir).map_err(persist_error)?;
        sink.emit(EngineEvent::DownloadProgress {
            request_id,
            bytes: 0,
        });

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = staged.written() + chunk.len() as u64;
            if let Some(max_bytes) = self.settings.max_bytes {
                if next_len > max_bytes {
                    return Err(FetchError::new(
                        FailureKind::TooLarge {
                            max_bytes,
                            actual: Some(next_len),
                        },
                        "download too large",
                    ));
                }
            }
            staged.write_chunk(&chunk).map_err(persist_error)?;
            sink.emit(EngineEvent::DownloadProgress {
                request_id,
                bytes: staged.written(),
            });
        }

        let extension = extension_for_content_type(content_type.as_deref());
        let filename = download_filename(&request.title, &request.source_url, extension);
        let bytes = staged.written();
        engine_debug!("Committing {} bytes as {}", bytes, filename);
        let path = staged.commit(&filename).map_err(persist_error)?;
        engine_info!("Saved download request_id={} to {:?}", request_id, path);

        Ok(SavedDownload {
            path,
            bytes,
            content_type,
        })
    }
}

/// File extension for a media content type, `mp4` when unknown.
pub fn extension_for_content_type(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());
    match essence.as_deref() {
        Some("video/webm") => "webm",
        Some("video/quicktime") => "mov",
        Some("video/x-matroska") => "mkv",
        Some("audio/mpeg") => "mp3",
        Some("audio/mp4") => "m4a",
        Some("audio/webm") => "weba",
        _ => "mp4",
    }
}

fn persist_error(err: PersistError) -> FetchError {
    FetchError::new(FailureKind::Io, err.to_string())
}
