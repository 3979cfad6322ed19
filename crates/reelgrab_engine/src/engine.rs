use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;

use crate::timer::{ChannelEventSink, EventSink, ResetTimer, TokioTimer};
use crate::{
    ClientSettings, DownloadRequest, DownloadSettings, EngineEvent, FetchError, MetadataClient,
    ProxyDownloader, ReqwestMetadataClient, RequestId,
};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub metadata: ClientSettings,
    pub download: DownloadSettings,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(#[source] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    FetchMetadata {
        request_id: RequestId,
        endpoint: String,
        source_url: String,
    },
    StartTimer {
        request_id: RequestId,
        delay: Duration,
    },
    Download {
        request_id: RequestId,
        request: DownloadRequest,
    },
}

struct EngineParts {
    metadata: Arc<dyn MetadataClient>,
    downloader: Arc<ProxyDownloader>,
    timer: Arc<ResetTimer<TokioTimer>>,
}

/// Handle to the engine thread. Commands go in, `EngineEvent`s come out.
///
/// The thread and its runtime stop once every clone of the handle is dropped;
/// work still in flight at that point is abandoned.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let parts = EngineParts {
            metadata: Arc::new(ReqwestMetadataClient::new(config.metadata)?),
            downloader: Arc::new(ProxyDownloader::new(config.download)?),
            timer: Arc::new(ResetTimer::new(TokioTimer)),
        };
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("reelgrab-io")
            .enable_all()
            .build()
            .map_err(EngineError::Runtime)?;

        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("reelgrab-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event_tx = event_tx.clone();
                    let metadata = parts.metadata.clone();
                    let downloader = parts.downloader.clone();
                    let timer = parts.timer.clone();
                    runtime.spawn(async move {
                        let sink = ChannelEventSink::new(event_tx);
                        match command {
                            EngineCommand::FetchMetadata {
                                request_id,
                                endpoint,
                                source_url,
                            } => {
                                let result = metadata.fetch_metadata(&endpoint, &source_url).await;
                                if let Err(err) = &result {
                                    engine_warn!("Metadata request {} failed: {}", request_id, err);
                                }
                                sink.emit(EngineEvent::MetadataCompleted { request_id, result });
                            }
                            EngineCommand::StartTimer { request_id, delay } => {
                                timer.run(request_id, delay, &sink).await;
                            }
                            EngineCommand::Download {
                                request_id,
                                request,
                            } => {
                                let result = downloader.download(request_id, &request, &sink).await;
                                sink.emit(EngineEvent::DownloadCompleted { request_id, result });
                            }
                        }
                    });
                }
                engine_debug!("Engine command channel closed; shutting down");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch_metadata(
        &self,
        request_id: RequestId,
        endpoint: impl Into<String>,
        source_url: impl Into<String>,
    ) {
        self.send(EngineCommand::FetchMetadata {
            request_id,
            endpoint: endpoint.into(),
            source_url: source_url.into(),
        });
    }

    pub fn start_timer(&self, request_id: RequestId, delay: Duration) {
        self.send(EngineCommand::StartTimer { request_id, delay });
    }

    pub fn download(&self, request_id: RequestId, request: DownloadRequest) {
        self.send(EngineCommand::Download {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine thread is gone; command dropped");
        }
    }
}
