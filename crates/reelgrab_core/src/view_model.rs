use crate::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Error,
    Loading,
    Success,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Error => "error",
            StatusKind::Loading => "loading",
            StatusKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitLabel {
    #[default]
    Idle,
    Working,
}

impl SubmitLabel {
    pub fn caption(self) -> &'static str {
        match self {
            SubmitLabel::Idle => "Download",
            SubmitLabel::Working => "Working...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub input: String,
    pub submit_enabled: bool,
    pub submit_label: SubmitLabel,
    pub status: Option<StatusView>,
    pub phase: Phase,
    pub dirty: bool,
}
