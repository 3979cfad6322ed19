#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input field.
    InputChanged(String),
    /// User submitted the form.
    Submitted,
    /// The metadata request for a submission finished, one way or another.
    MetadataReceived {
        submission: crate::SubmissionId,
        outcome: MetadataOutcome,
    },
    /// The post-outcome delay for a submission has elapsed.
    ResetElapsed { submission: crate::SubmissionId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    /// An HTTP response arrived, whatever its status.
    Replied { status: u16, body: ReplyBody },
    /// The request could not be sent or no response came back.
    Unreachable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    Parsed(MetadataReply),
    Malformed { reason: String },
}

/// Metadata document as the handler sees it. Missing fields stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataReply {
    pub success: bool,
    pub title: Option<String>,
    pub download_url: Option<String>,
    pub error: Option<String>,
}
