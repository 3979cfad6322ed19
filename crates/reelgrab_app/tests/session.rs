use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use reelgrab_app::ui::{Renderer, StatusDisplay};
use reelgrab_app::{
    App, AppEvent, Dispatch, EffectRunner, Navigation, Navigator, SaveNavigator, SessionSummary,
};
use reelgrab_core::{BackendEndpoints, FormSettings, StatusKind};
use reelgrab_engine::{EngineConfig, EngineHandle};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct RecordingNavigator {
    seen: Arc<Mutex<Vec<Navigation>>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, navigation: &Navigation) -> Dispatch {
        self.seen.lock().unwrap().push(navigation.clone());
        Dispatch::Done
    }
}

#[derive(Clone, Default)]
struct RecordingStatus {
    shown: Arc<Mutex<Vec<(StatusKind, String)>>>,
}

impl StatusDisplay for RecordingStatus {
    fn show(&mut self, text: &str, kind: StatusKind) {
        self.shown.lock().unwrap().push((kind, text.to_string()));
    }
}

struct Session {
    summary: SessionSummary,
    navigations: Vec<Navigation>,
    statuses: Vec<(StatusKind, String)>,
}

async fn run_session(backend: String, lines: &[&str]) -> Session {
    let navigator = RecordingNavigator::default();
    let seen = navigator.seen.clone();
    let mut session = run_session_with(backend, lines, move |_| Box::new(navigator)).await;
    session.navigations = seen.lock().unwrap().clone();
    session
}

/// Runs lines through a full app whose navigator is built from the live engine.
async fn run_session_with<F>(backend: String, lines: &[&str], make_navigator: F) -> Session
where
    F: FnOnce(EngineHandle) -> Box<dyn Navigator> + Send + 'static,
{
    engine_logging::initialize_for_tests();
    let lines: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
    let status = RecordingStatus::default();
    let shown = status.shown.clone();

    let summary = tokio::task::spawn_blocking(move || {
        let settings = FormSettings {
            endpoints: BackendEndpoints::parse(&backend).unwrap(),
            reset_delay: Duration::ZERO,
        };
        let engine = EngineHandle::new(EngineConfig::default()).unwrap();
        let navigator = make_navigator(engine.clone());
        let runner = EffectRunner::new(engine, settings.endpoints.clone(), navigator);
        let renderer = Renderer::new(Box::new(status), None);

        let (tx, rx) = mpsc::channel();
        runner.spawn_event_forwarder(tx.clone());
        for line in lines {
            tx.send(AppEvent::Line(line)).unwrap();
        }
        tx.send(AppEvent::InputClosed).unwrap();

        App::new(settings, renderer, runner).run(rx)
    })
    .await
    .unwrap();

    let statuses = shown.lock().unwrap().clone();
    Session {
        summary,
        navigations: Vec::new(),
        statuses,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn successful_submission_navigates_to_proxy_download() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download-info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "title": "My Video",
            "downloadUrl": "https://host/v.mp4"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = run_session(server.uri(), &["https://www.youtube.com/watch?v=abc123"]).await;

    assert_eq!(session.summary.succeeded, 1);
    assert!(session.summary.all_succeeded());
    assert_eq!(session.navigations.len(), 1);
    assert_eq!(
        session.navigations[0].target,
        format!(
            "{}/proxy-download?title=My%20Video&url=https%3A%2F%2Fhost%2Fv.mp4",
            server.uri()
        )
    );
    assert_eq!(
        session.statuses,
        vec![
            (
                StatusKind::Loading,
                "Detected YouTube link. Processing...".to_string()
            ),
            (
                StatusKind::Success,
                "Success! Your download will begin now.".to_string()
            ),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_page_shows_error_and_never_navigates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download-info"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("<h1>oops</h1>", "text/html"))
        .mount(&server)
        .await;

    let session = run_session(server.uri(), &["https://instagram.com/reel/xyz"]).await;

    assert!(session.navigations.is_empty());
    assert_eq!(session.summary.failed, 1);
    assert_eq!(
        session.statuses.last(),
        Some(&(
            StatusKind::Error,
            "The server sent a response that could not be read.".to_string()
        ))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_message_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "error": "This video is private."
        })))
        .mount(&server)
        .await;

    let session = run_session(server.uri(), &["https://vm.tiktok.com/ZMabc/"]).await;

    assert!(session.navigations.is_empty());
    assert_eq!(
        session.statuses.last(),
        Some(&(StatusKind::Error, "This video is private.".to_string()))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_shows_connectivity_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let session = run_session(format!("http://127.0.0.1:{port}"), &["https://youtu.be/abc123"]).await;

    assert!(session.navigations.is_empty());
    assert_eq!(
        session.statuses.last(),
        Some(&(
            StatusKind::Error,
            "Could not connect to the server. Please ensure it is running.".to_string()
        ))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_input_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = run_session(server.uri(), &["   ", "https://example.com/video"]).await;

    assert_eq!(session.summary.failed, 2);
    assert_eq!(
        session.statuses,
        vec![
            (
                StatusKind::Error,
                "Please paste a video link first.".to_string()
            ),
            (
                StatusKind::Error,
                "This link is not supported. Please use a valid YouTube, Instagram Reels, or TikTok link."
                    .to_string()
            ),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn same_input_error_twice_is_shown_twice() {
    let server = MockServer::start().await;
    let session = run_session(server.uri(), &["", ""]).await;
    assert_eq!(session.statuses.len(), 2);
}

async fn mount_reply(server: &MockServer, source: &str, title: &str, download_url: &str) {
    Mock::given(method("POST"))
        .and(path("/download-info"))
        .and(body_partial_json(serde_json::json!({ "url": source })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "title": title,
            "downloadUrl": download_url
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn lines_arriving_while_busy_are_submitted_in_order() {
    let server = MockServer::start().await;
    mount_reply(&server, "https://youtu.be/first", "first", "https://host/1.mp4").await;
    mount_reply(&server, "https://vm.tiktok.com/second/", "second", "https://host/2.mp4").await;
    mount_reply(&server, "https://instagram.com/reel/third/", "third", "https://host/3.mp4").await;

    let session = run_session(
        server.uri(),
        &[
            "https://youtu.be/first",
            "https://vm.tiktok.com/second/",
            "https://instagram.com/reel/third/",
        ],
    )
    .await;

    let titles: Vec<&str> = session
        .navigations
        .iter()
        .map(|navigation| navigation.title.as_str())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert_eq!(session.summary.succeeded, 3);
    assert!(session.summary.all_succeeded());
}

#[tokio::test(flavor = "multi_thread")]
async fn queued_unsupported_line_fails_the_session() {
    let server = MockServer::start().await;
    mount_reply(&server, "https://youtu.be/first", "first", "https://host/1.mp4").await;

    let session = run_session(
        server.uri(),
        &["https://youtu.be/first", "https://example.com/video"],
    )
    .await;

    assert_eq!(session.navigations.len(), 1);
    assert_eq!(session.summary.succeeded, 1);
    assert_eq!(session.summary.failed, 1);
    assert!(!session.summary.all_succeeded());
}

#[tokio::test(flavor = "multi_thread")]
async fn save_dir_session_waits_for_downloads_and_reports_failures() {
    let server = MockServer::start().await;
    mount_reply(&server, "https://youtu.be/good", "Good clip", "https://host/good.mp4").await;
    mount_reply(&server, "https://youtu.be/bad", "Bad clip", "https://host/bad.mp4").await;
    Mock::given(method("GET"))
        .and(path("/proxy-download"))
        .and(query_param("url", "https://host/good.mp4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"video-bytes".to_vec(), "video/mp4"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/proxy-download"))
        .and(query_param("url", "https://host/bad.mp4"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().to_path_buf();
    let session = run_session_with(
        server.uri(),
        &["https://youtu.be/good", "https://youtu.be/bad"],
        move |engine| Box::new(SaveNavigator::new(engine, output_dir)),
    )
    .await;

    assert_eq!(session.summary.succeeded, 2);
    assert_eq!(session.summary.downloads_saved, 1);
    assert_eq!(session.summary.downloads_failed, 1);
    assert!(!session.summary.all_succeeded());

    let saved: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].extension().and_then(|ext| ext.to_str()), Some("mp4"));
    assert_eq!(std::fs::read(&saved[0]).unwrap(), b"video-bytes");
}
