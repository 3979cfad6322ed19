//! Reelgrab terminal front end: wires the core state machine to the engine,
//! the terminal and the chosen navigator.
mod cli;
pub mod platform;

pub use cli::Cli;
pub use platform::{
    forward_lines, run, ui, App, AppConfig, AppEvent, Dispatch, EffectRunner, LogConfig,
    Navigation, Navigator, PrintNavigator, SaveNavigator, SessionSummary,
};
