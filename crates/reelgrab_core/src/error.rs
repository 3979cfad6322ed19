use thiserror::Error;

/// Everything that can end a submission without a download.
///
/// `Display` yields the text shown in the status area.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Please paste a video link first.")]
    InputEmpty,
    #[error("This link is not supported. Please use a valid YouTube, Instagram Reels, or TikTok link.")]
    InputUnsupported,
    #[error("{0}")]
    ServerReported(String),
    #[error("An unknown error occurred on the server.")]
    ServerUnspecified,
    #[error("The server sent a response that could not be read.")]
    UnreadableResponse,
    #[error("Could not connect to the server. Please ensure it is running.")]
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Detected locally; nothing was sent.
    Input,
    /// Backend answered and reported a failure.
    Application,
    /// Backend answered with something that is not a metadata document.
    Parse,
    /// No response at all.
    Connectivity,
}

impl SubmissionError {
    /// Blank server messages fall back to the generic text.
    pub fn from_server_message(message: Option<String>) -> Self {
        match message {
            Some(text) if !text.trim().is_empty() => SubmissionError::ServerReported(text),
            _ => SubmissionError::ServerUnspecified,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SubmissionError::InputEmpty | SubmissionError::InputUnsupported => {
                ErrorCategory::Input
            }
            SubmissionError::ServerReported(_) | SubmissionError::ServerUnspecified => {
                ErrorCategory::Application
            }
            SubmissionError::UnreadableResponse => ErrorCategory::Parse,
            SubmissionError::Unreachable => ErrorCategory::Connectivity,
        }
    }
}
