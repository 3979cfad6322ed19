use std::io::Write;

use engine_logging::{engine_debug, engine_warn};
use reelgrab_core::{FormView, StatusView};

use super::StatusDisplay;

/// Pushes view-model changes to the terminal.
pub struct Renderer {
    status: Box<dyn StatusDisplay>,
    prompt: Option<Box<dyn Write + Send>>,
    last_status: Option<StatusView>,
    last_enabled: Option<bool>,
}

impl Renderer {
    /// `prompt` receives the submit caption whenever the form becomes usable.
    pub fn new(status: Box<dyn StatusDisplay>, prompt: Option<Box<dyn Write + Send>>) -> Self {
        Self {
            status,
            prompt,
            last_status: None,
            last_enabled: None,
        }
    }

    /// `repeat_status` re-shows an unchanged status, e.g. the same input error twice.
    pub fn render(&mut self, view: &FormView, repeat_status: bool) {
        if view.status != self.last_status || repeat_status {
            if let Some(status) = &view.status {
                self.status.show(&status.text, status.kind);
            }
            self.last_status = view.status.clone();
        }

        if self.last_enabled != Some(view.submit_enabled) {
            engine_debug!(
                "Submit control enabled={} label={:?}",
                view.submit_enabled,
                view.submit_label.caption()
            );
            self.last_enabled = Some(view.submit_enabled);
            if view.submit_enabled {
                self.show_prompt(view.submit_label.caption());
            }
        }
    }

    fn show_prompt(&mut self, caption: &str) {
        if let Some(out) = self.prompt.as_mut() {
            if let Err(err) = write!(out, "{caption}> ").and_then(|()| out.flush()) {
                engine_warn!("Could not write prompt: {}", err);
            }
        }
    }
}
