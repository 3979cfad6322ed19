use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use reelgrab_core::{BackendEndpoints, Effect, MetadataOutcome, MetadataReply, Msg, ReplyBody};
use reelgrab_engine::{EngineEvent, EngineHandle, FetchError, MetadataResponse};

use super::app::AppEvent;
use super::navigator::{Dispatch, Navigation, Navigator};

/// Carries out core effects on the engine and the navigator.
pub struct EffectRunner {
    engine: EngineHandle,
    endpoints: BackendEndpoints,
    navigator: Box<dyn Navigator>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        endpoints: BackendEndpoints,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        Self {
            engine,
            endpoints,
            navigator,
        }
    }

    /// Runs effects in order; returns how many background downloads were started.
    pub fn run(&mut self, effects: Vec<Effect>) -> usize {
        let mut started = 0;
        for effect in effects {
            match effect {
                Effect::FetchMetadata { submission, url } => {
                    engine_info!(
                        "FetchMetadata submission={} url_len={} url={}",
                        submission,
                        url.len(),
                        url
                    );
                    self.engine
                        .fetch_metadata(submission, self.endpoints.metadata_url(), url);
                }
                Effect::Navigate {
                    submission,
                    title,
                    source_url,
                    target,
                } => {
                    engine_info!("Navigate submission={} target={}", submission, target);
                    let navigation = Navigation {
                        submission,
                        title,
                        source_url,
                        target,
                    };
                    if self.navigator.navigate(&navigation) == Dispatch::Background {
                        started += 1;
                    }
                }
                Effect::ScheduleReset { submission, delay } => {
                    engine_debug!(
                        "ScheduleReset submission={} delay_ms={}",
                        submission,
                        delay.as_millis()
                    );
                    self.engine.start_timer(submission, delay);
                }
            }
        }
        started
    }

    /// Forwards engine events into the app channel until the app goes away.
    pub fn spawn_event_forwarder(&self, tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                // Poll the app side so the thread ends with it.
                if tx.send(AppEvent::Idle).is_err() {
                    return;
                }
                continue;
            };
            if tx.send(map_event(event)).is_err() {
                return;
            }
        });
    }
}

fn map_event(event: EngineEvent) -> AppEvent {
    match event {
        EngineEvent::MetadataCompleted { request_id, result } => {
            AppEvent::Msg(Msg::MetadataReceived {
                submission: request_id,
                outcome: map_metadata(result),
            })
        }
        EngineEvent::TimerElapsed { request_id } => AppEvent::Msg(Msg::ResetElapsed {
            submission: request_id,
        }),
        EngineEvent::DownloadProgress { request_id, bytes } => AppEvent::DownloadProgress {
            submission: request_id,
            bytes,
        },
        EngineEvent::DownloadCompleted { request_id, result } => {
            if let Err(err) = &result {
                engine_warn!("Download for submission {} failed: {}", request_id, err);
            }
            AppEvent::DownloadFinished {
                submission: request_id,
                result,
            }
        }
    }
}

fn map_metadata(result: Result<MetadataResponse, FetchError>) -> MetadataOutcome {
    match result {
        Ok(MetadataResponse { status, body }) => MetadataOutcome::Replied {
            status,
            body: match body {
                Ok(body) => ReplyBody::Parsed(MetadataReply {
                    success: body.success,
                    title: body.title,
                    download_url: body.download_url,
                    error: body.error,
                }),
                Err(reason) => ReplyBody::Malformed { reason },
            },
        },
        Err(err) => MetadataOutcome::Unreachable {
            reason: err.to_string(),
        },
    }
}
