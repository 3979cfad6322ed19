use std::time::Duration;

use crate::view_model::{FormView, StatusKind, StatusView, SubmitLabel};
use crate::{BackendEndpoints, Platform, SubmissionError};

pub type SubmissionId = u64;

/// How long a finished submission stays on screen before the form resets.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub endpoints: BackendEndpoints,
    pub reset_delay: Duration,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            endpoints: BackendEndpoints::default(),
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

/// Where the current submission stands.
///
/// Validation happens synchronously inside `update`, so it never shows up here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingMetadata {
        submission: SubmissionId,
        platform: Platform,
    },
    Succeeded {
        submission: SubmissionId,
    },
    Failed {
        submission: SubmissionId,
        error: SubmissionError,
    },
}

impl Phase {
    pub fn submission(&self) -> Option<SubmissionId> {
        match self {
            Phase::Idle => None,
            Phase::AwaitingMetadata { submission, .. }
            | Phase::Succeeded { submission }
            | Phase::Failed { submission, .. } => Some(*submission),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Succeeded { .. } | Phase::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    settings: FormSettings,
    input: String,
    phase: Phase,
    submit_enabled: bool,
    status: Option<StatusView>,
    last_submission: SubmissionId,
    dirty: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(FormSettings::default())
    }
}

impl FormState {
    pub fn new(settings: FormSettings) -> Self {
        Self {
            settings,
            input: String::new(),
            phase: Phase::Idle,
            submit_enabled: true,
            status: None,
            last_submission: 0,
            dirty: false,
        }
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Idle with the submit control usable.
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Idle && self.submit_enabled
    }

    pub fn view(&self) -> FormView {
        FormView {
            input: self.input.clone(),
            submit_enabled: self.submit_enabled,
            submit_label: if self.submit_enabled {
                SubmitLabel::Idle
            } else {
                SubmitLabel::Working
            },
            status: self.status.clone(),
            phase: self.phase.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn show_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusView {
            kind,
            text: text.into(),
        });
        self.dirty = true;
    }

    /// Disables the submit control and allocates the next submission id.
    pub(crate) fn begin_submission(&mut self, platform: Platform) -> SubmissionId {
        self.last_submission += 1;
        let submission = self.last_submission;
        self.submit_enabled = false;
        self.phase = Phase::AwaitingMetadata {
            submission,
            platform,
        };
        self.dirty = true;
        submission
    }

    pub(crate) fn is_awaiting(&self, submission: SubmissionId) -> bool {
        matches!(self.phase, Phase::AwaitingMetadata { submission: current, .. } if current == submission)
    }

    pub(crate) fn is_settling(&self, submission: SubmissionId) -> bool {
        self.phase.is_terminal() && self.phase.submission() == Some(submission)
    }

    pub(crate) fn finish(&mut self, phase: Phase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        self.dirty = true;
    }

    /// Back to a fresh, resubmittable form. The status text stays visible.
    pub(crate) fn reset_form(&mut self) {
        self.phase = Phase::Idle;
        self.submit_enabled = true;
        self.input.clear();
        self.dirty = true;
    }
}
