use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the trimmed URL to the metadata endpoint.
    FetchMetadata {
        submission: crate::SubmissionId,
        url: String,
    },
    /// Hand the proxy-download URL to whatever plays the browser's role.
    Navigate {
        submission: crate::SubmissionId,
        title: String,
        source_url: String,
        target: String,
    },
    /// Deliver `Msg::ResetElapsed` for this submission after `delay`.
    ScheduleReset {
        submission: crate::SubmissionId,
        delay: Duration,
    },
}
