//! Reelgrab core: pure submission state machine, platform classifier and view-model helpers.
mod effect;
mod endpoints;
mod error;
mod msg;
mod platform;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use endpoints::{BackendEndpoints, EndpointError, DEFAULT_BACKEND_URL};
pub use error::{ErrorCategory, SubmissionError};
pub use msg::{MetadataOutcome, MetadataReply, Msg, ReplyBody};
pub use platform::{detect_platform, Platform};
pub use state::{FormSettings, FormState, Phase, SubmissionId, DEFAULT_RESET_DELAY};
pub use update::{update, SUCCESS_MESSAGE};
pub use view_model::{FormView, StatusKind, StatusView, SubmitLabel};
