use std::sync::Once;

use pretty_assertions::assert_eq;
use reelgrab_core::{
    update, Effect, FormState, Msg, Phase, Platform, StatusKind, StatusView, SubmitLabel,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn submit_url(state: FormState, input: &str) -> (FormState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

#[test]
fn empty_input_shows_input_error_without_request() {
    init_logging();
    for input in ["", "   ", "\t\n"] {
        let (mut next, effects) = submit_url(FormState::default(), input);
        let view = next.view();

        assert!(effects.is_empty(), "{input:?}");
        assert_eq!(
            view.status,
            Some(StatusView {
                kind: StatusKind::Error,
                text: "Please paste a video link first.".to_string(),
            })
        );
        assert_eq!(view.phase, Phase::Idle);
        assert!(view.submit_enabled);
        assert!(next.consume_dirty());
    }
}

#[test]
fn unsupported_url_never_reaches_the_network() {
    init_logging();
    let (next, effects) = submit_url(FormState::default(), "https://example.com/video");
    let view = next.view();

    assert!(effects.is_empty());
    assert_eq!(view.status.unwrap().kind, StatusKind::Error);
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SubmitLabel::Idle);
    // The field keeps its text so the user can fix it.
    assert_eq!(view.input, "https://example.com/video");
}

#[test]
fn supported_url_disables_form_and_requests_metadata() {
    init_logging();
    let (next, effects) = submit_url(FormState::default(), "  https://youtu.be/abc123  ");
    let view = next.view();

    assert_eq!(
        effects,
        vec![Effect::FetchMetadata {
            submission: 1,
            url: "https://youtu.be/abc123".to_string(),
        }]
    );
    assert_eq!(
        view.status,
        Some(StatusView {
            kind: StatusKind::Loading,
            text: "Detected YouTube link. Processing...".to_string(),
        })
    );
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SubmitLabel::Working);
    assert_eq!(view.submit_label.caption(), "Working...");
    assert_eq!(
        view.phase,
        Phase::AwaitingMetadata {
            submission: 1,
            platform: Platform::YouTube,
        }
    );
}

#[test]
fn loading_message_names_detected_platform() {
    init_logging();
    let cases = [
        ("https://youtube.com/shorts/a", "YouTube Shorts"),
        ("https://instagram.com/reel/xyz", "Instagram Reels"),
        ("https://vm.tiktok.com/ZMabc/", "TikTok"),
    ];
    for (url, name) in cases {
        let (next, _) = submit_url(FormState::default(), url);
        assert_eq!(
            next.view().status.unwrap().text,
            format!("Detected {name} link. Processing...")
        );
    }
}

#[test]
fn submit_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = submit_url(FormState::default(), "https://youtu.be/abc123");
    let (mut state, _) = update(state, Msg::Submitted);
    assert!(state.consume_dirty());

    let (mut next, effects) = submit_url(state, "https://vm.tiktok.com/ZMabc/");

    assert!(effects.is_empty());
    assert_eq!(next.phase().submission(), Some(1));
    // Only the edited text is recorded; nothing else moves.
    assert!(next.consume_dirty());
    let (mut next, effects) = update(next, Msg::Submitted);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn input_error_does_not_consume_a_submission_id() {
    init_logging();
    let (state, _) = submit_url(FormState::default(), "");
    let (_, effects) = submit_url(state, "https://youtu.be/abc123");
    assert_eq!(
        effects,
        vec![Effect::FetchMetadata {
            submission: 1,
            url: "https://youtu.be/abc123".to_string(),
        }]
    );
}
