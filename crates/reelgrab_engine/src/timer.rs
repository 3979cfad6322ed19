use std::sync::mpsc;
use std::time::Duration;

use crate::{EngineEvent, RequestId};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Source of delays, so the reset schedule can run against a controlled clock.
#[async_trait::async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

#[async_trait::async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Emits `EngineEvent::TimerElapsed` once a delay has fully passed.
pub struct ResetTimer<T> {
    timer: T,
}

impl<T: Timer> ResetTimer<T> {
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    pub async fn run(&self, request_id: RequestId, delay: Duration, sink: &dyn EventSink) {
        self.timer.sleep(delay).await;
        sink.emit(EngineEvent::TimerElapsed { request_id });
    }
}
