//! Terminal platform layer: event loop, effect runner, configuration,
//! navigators and the status line.
mod app;
mod config;
mod effects;
mod input;
mod navigator;
pub mod ui;

pub use app::{run, App, AppEvent, SessionSummary};
pub use config::{AppConfig, LogConfig};
pub use effects::EffectRunner;
pub use input::forward_lines;
pub use navigator::{Dispatch, Navigation, Navigator, PrintNavigator, SaveNavigator};
