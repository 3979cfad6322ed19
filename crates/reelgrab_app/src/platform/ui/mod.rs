pub mod render;
pub mod status;

pub use render::Renderer;
pub use status::{StatusDisplay, TerminalStatus};
