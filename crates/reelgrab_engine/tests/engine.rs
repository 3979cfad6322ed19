use std::time::Duration;

use reelgrab_engine::{EngineConfig, EngineEvent, EngineHandle};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn next_event(engine: &EngineHandle) -> EngineEvent {
    for _ in 0..500 {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no engine event within 5s");
}

#[tokio::test(flavor = "multi_thread")]
async fn metadata_result_comes_back_tagged() {
    engine_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "title": "t",
            "downloadUrl": "https://host/v.mp4"
        })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(EngineConfig::default()).expect("engine starts");
    engine.fetch_metadata(
        3,
        format!("{}/download-info", server.uri()),
        "https://youtu.be/abc123",
    );

    match next_event(&engine).await {
        EngineEvent::MetadataCompleted {
            request_id,
            result: Ok(response),
        } => {
            assert_eq!(request_id, 3);
            assert_eq!(response.status, 200);
            assert!(response.body.unwrap().success);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn timer_event_arrives_after_delay() {
    let engine = EngineHandle::new(EngineConfig::default()).expect("engine starts");
    engine.start_timer(5, Duration::from_millis(300));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(engine.try_recv().is_none());

    assert_eq!(
        next_event(&engine).await,
        EngineEvent::TimerElapsed { request_id: 5 }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn clones_share_the_event_stream() {
    let engine = EngineHandle::new(EngineConfig::default()).expect("engine starts");
    let other = engine.clone();
    other.start_timer(8, Duration::ZERO);

    assert_eq!(
        next_event(&engine).await,
        EngineEvent::TimerElapsed { request_id: 8 }
    );
}
