use reelgrab_app::ui::{StatusDisplay, TerminalStatus};
use reelgrab_core::StatusKind;

#[test]
fn plain_mode_tags_each_line_with_its_kind() {
    let mut status = TerminalStatus::new(Vec::new(), false);
    assert!(!status.is_visible());

    status.show("Detected TikTok link. Processing...", StatusKind::Loading);
    status.show("Success! Your download will begin now.", StatusKind::Success);

    assert!(status.is_visible());
    assert_eq!(status.applied(), Some(StatusKind::Success));
    let text = String::from_utf8(status.into_inner()).unwrap();
    assert_eq!(
        text,
        "[loading] Detected TikTok link. Processing...\n[success] Success! Your download will begin now.\n"
    );
}

#[test]
fn colour_mode_resets_before_applying_one_style() {
    let mut status = TerminalStatus::new(Vec::new(), true);
    status.show("boom", StatusKind::Error);

    let text = String::from_utf8(status.into_inner()).unwrap();
    assert_eq!(text, "\x1b[0m\x1b[31mboom\x1b[0m\n");
}

#[test]
fn each_kind_has_a_distinct_style() {
    let render = |kind| {
        let mut status = TerminalStatus::new(Vec::new(), true);
        status.show("x", kind);
        String::from_utf8(status.into_inner()).unwrap()
    };
    let error = render(StatusKind::Error);
    let loading = render(StatusKind::Loading);
    let success = render(StatusKind::Success);
    assert_ne!(error, loading);
    assert_ne!(loading, success);
    assert_ne!(error, success);
}
