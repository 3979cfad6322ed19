use std::io::Write;

use engine_logging::engine_warn;
use reelgrab_core::StatusKind;

const RESET: &str = "\x1b[0m";

/// Write-only status area.
pub trait StatusDisplay: Send {
    /// Shows `text` with the style for `kind`, replacing any previous style.
    fn show(&mut self, text: &str, kind: StatusKind);
}

/// Status line on a terminal stream, styled with ANSI colours or a plain tag.
pub struct TerminalStatus<W> {
    out: W,
    color: bool,
    applied: Option<StatusKind>,
}

impl<W: Write + Send> TerminalStatus<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            applied: None,
        }
    }

    /// Style currently applied; `None` until the first message.
    pub fn applied(&self) -> Option<StatusKind> {
        self.applied
    }

    pub fn is_visible(&self) -> bool {
        self.applied.is_some()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_line(&self, text: &str, kind: StatusKind) -> String {
        if self.color {
            format!("{RESET}{}{text}{RESET}", style(kind))
        } else {
            format!("[{}] {text}", kind.as_str())
        }
    }
}

impl<W: Write + Send> StatusDisplay for TerminalStatus<W> {
    fn show(&mut self, text: &str, kind: StatusKind) {
        let line = self.format_line(text, kind);
        self.applied = Some(kind);
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            engine_warn!("Could not write status line: {}", err);
        }
    }
}

fn style(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Error => "\x1b[31m",
        StatusKind::Loading => "\x1b[33m",
        StatusKind::Success => "\x1b[32m",
    }
}
