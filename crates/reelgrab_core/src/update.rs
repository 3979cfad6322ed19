use crate::{
    detect_platform, Effect, FormState, MetadataOutcome, Msg, Phase, Platform, ReplyBody,
    StatusKind, SubmissionError,
};

pub const SUCCESS_MESSAGE: &str = "Success! Your download will begin now.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => submit(&mut state),
        Msg::MetadataReceived {
            submission,
            outcome,
        } => {
            // Late replies for a submission that is no longer in flight are dropped.
            if !state.is_awaiting(submission) {
                return (state, Vec::new());
            }
            let delay = state.settings().reset_delay;
            match resolve(outcome) {
                Ok(ResolvedDownload {
                    title,
                    download_url,
                }) => {
                    let target = state
                        .settings()
                        .endpoints
                        .proxy_download_url(&title, &download_url)
                        .to_string();
                    state.show_status(StatusKind::Success, SUCCESS_MESSAGE);
                    state.finish(Phase::Succeeded { submission });
                    vec![
                        Effect::Navigate {
                            submission,
                            title,
                            source_url: download_url,
                            target,
                        },
                        Effect::ScheduleReset { submission, delay },
                    ]
                }
                Err(error) => {
                    state.show_status(StatusKind::Error, error.to_string());
                    state.finish(Phase::Failed { submission, error });
                    vec![Effect::ScheduleReset { submission, delay }]
                }
            }
        }
        Msg::ResetElapsed { submission } => {
            if state.is_settling(submission) {
                state.reset_form();
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut FormState) -> Vec<Effect> {
    // The control is disabled while a submission is in flight or settling.
    if !state.submit_enabled() {
        return Vec::new();
    }

    let url = state.input().trim().to_string();
    match validate(&url) {
        Err(error) => {
            state.show_status(StatusKind::Error, error.to_string());
            Vec::new()
        }
        Ok(platform) => {
            state.show_status(
                StatusKind::Loading,
                format!("Detected {platform} link. Processing..."),
            );
            let submission = state.begin_submission(platform);
            vec![Effect::FetchMetadata { submission, url }]
        }
    }
}

fn validate(url: &str) -> Result<Platform, SubmissionError> {
    if url.is_empty() {
        return Err(SubmissionError::InputEmpty);
    }
    match detect_platform(url) {
        Platform::Unsupported => Err(SubmissionError::InputUnsupported),
        platform => Ok(platform),
    }
}

struct ResolvedDownload {
    title: String,
    download_url: String,
}

fn resolve(outcome: MetadataOutcome) -> Result<ResolvedDownload, SubmissionError> {
    let (status, reply) = match outcome {
        MetadataOutcome::Unreachable { .. } => return Err(SubmissionError::Unreachable),
        MetadataOutcome::Replied {
            body: ReplyBody::Malformed { .. },
            ..
        } => return Err(SubmissionError::UnreadableResponse),
        MetadataOutcome::Replied {
            status,
            body: ReplyBody::Parsed(reply),
        } => (status, reply),
    };

    if !(200..300).contains(&status) || !reply.success {
        return Err(SubmissionError::from_server_message(reply.error));
    }

    match (reply.title, reply.download_url) {
        (Some(title), Some(download_url)) if !download_url.trim().is_empty() => {
            Ok(ResolvedDownload {
                title,
                download_url,
            })
        }
        _ => Err(SubmissionError::UnreadableResponse),
    }
}
