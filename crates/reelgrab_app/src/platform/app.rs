use std::collections::VecDeque;
use std::io::{self, BufReader};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, engine_info, engine_warn};
use reelgrab_core::{update, FormSettings, FormState, Msg, Phase, SubmissionId};
use reelgrab_engine::{EngineHandle, FetchError, SavedDownload};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::forward_lines;
use super::navigator::{Navigator, PrintNavigator, SaveNavigator};
use super::ui::{Renderer, TerminalStatus};
use crate::cli::Cli;

#[derive(Debug)]
pub enum AppEvent {
    /// Message for the state machine.
    Msg(Msg),
    /// A line typed into the form and submitted.
    Line(String),
    /// No more input will arrive.
    InputClosed,
    DownloadProgress {
        submission: SubmissionId,
        bytes: u64,
    },
    DownloadFinished {
        submission: SubmissionId,
        result: Result<SavedDownload, FetchError>,
    },
    /// Nothing happened for a while.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub downloads_saved: usize,
    pub downloads_failed: usize,
}

impl SessionSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.downloads_failed == 0
    }
}

/// Owns the form state and feeds it every event, one at a time.
pub struct App {
    state: FormState,
    renderer: Renderer,
    runner: EffectRunner,
    /// Lines typed while the form was busy, submitted in order once it is ready.
    queued_lines: VecDeque<String>,
    pending_downloads: usize,
    input_closed: bool,
    summary: SessionSummary,
}

impl App {
    pub fn new(settings: FormSettings, renderer: Renderer, runner: EffectRunner) -> Self {
        let mut app = Self {
            state: FormState::new(settings),
            renderer,
            runner,
            queued_lines: VecDeque::new(),
            pending_downloads: 0,
            input_closed: false,
            summary: SessionSummary::default(),
        };
        let view = app.state.view();
        app.renderer.render(&view, false);
        app
    }

    /// Processes events until input is closed, the form is idle and no
    /// download is still running.
    pub fn run(mut self, events: mpsc::Receiver<AppEvent>) -> SessionSummary {
        while !self.is_finished() {
            match events.recv() {
                Ok(event) => self.handle(event),
                Err(_) => {
                    engine_warn!("Event channel closed before the session finished");
                    break;
                }
            }
        }
        self.summary
    }

    fn is_finished(&self) -> bool {
        self.input_closed
            && self.state.is_ready()
            && self.queued_lines.is_empty()
            && self.pending_downloads == 0
    }

    fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Msg(msg) => {
                self.dispatch_msg(msg);
                self.submit_queued();
            }
            AppEvent::Line(line) => {
                if !self.state.is_ready() {
                    engine_debug!(
                        "Form busy; queueing line ({} waiting)",
                        self.queued_lines.len() + 1
                    );
                }
                self.queued_lines.push_back(line);
                self.submit_queued();
            }
            AppEvent::InputClosed => {
                engine_debug!("Input closed");
                self.input_closed = true;
            }
            AppEvent::DownloadProgress { submission, bytes } => {
                engine_debug!("Download {} at {} bytes", submission, bytes);
            }
            AppEvent::DownloadFinished { submission, result } => {
                self.pending_downloads = self.pending_downloads.saturating_sub(1);
                match result {
                    Ok(saved) => {
                        self.summary.downloads_saved += 1;
                        eprintln!("Saved {} ({} bytes)", saved.path.display(), saved.bytes);
                    }
                    Err(err) => {
                        self.summary.downloads_failed += 1;
                        eprintln!("Download {submission} failed: {err}");
                    }
                }
            }
            AppEvent::Idle => {}
        }
    }

    /// Types and submits waiting lines while the form accepts them.
    fn submit_queued(&mut self) {
        while self.state.is_ready() {
            let Some(line) = self.queued_lines.pop_front() else {
                break;
            };
            self.dispatch_msg(Msg::InputChanged(line));
            self.dispatch_msg(Msg::Submitted);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let was_ready = self.state.is_ready();
        let is_submit = matches!(msg, Msg::Submitted);
        let before = self.state.phase().clone();

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        if is_submit && !was_ready {
            engine_warn!("Still working on the previous link; submission ignored");
        }
        if is_submit && was_ready && effects.is_empty() {
            // Rejected locally: empty or unsupported input.
            self.summary.failed += 1;
        }
        if view.phase != before {
            match &view.phase {
                Phase::Succeeded { submission } => {
                    engine_info!("Submission {} succeeded", submission);
                    self.summary.succeeded += 1;
                }
                Phase::Failed { submission, error } => {
                    engine_info!(
                        "Submission {} failed ({:?}): {}",
                        submission,
                        error.category(),
                        error
                    );
                    self.summary.failed += 1;
                }
                _ => {}
            }
        }

        // Render first so the form is visibly disabled before any request goes out.
        if was_dirty {
            self.renderer.render(&view, is_submit && was_ready);
        }
        self.pending_downloads += self.runner.run(effects);
    }
}

/// Builds everything from the command line and runs one session.
pub fn run(cli: Cli) -> Result<SessionSummary> {
    let config = AppConfig::resolve(&cli)?;
    let level = config.log_level()?;
    if let Some(destination) = config.log_destination() {
        engine_logging::initialize(destination, level);
    }

    let settings = config.form_settings()?;
    let engine = EngineHandle::new(config.engine_config()).context("failed to start engine")?;
    let navigator: Box<dyn Navigator> = match &config.save_dir {
        Some(dir) => Box::new(SaveNavigator::new(engine.clone(), dir.clone())),
        None => Box::new(PrintNavigator::new(io::stdout())),
    };
    let runner = EffectRunner::new(engine, settings.endpoints.clone(), navigator);

    let interactive = cli.url.is_none();
    let status = TerminalStatus::new(io::stderr(), config.color);
    let prompt: Option<Box<dyn io::Write + Send>> = if interactive {
        Some(Box::new(io::stderr()))
    } else {
        None
    };
    let renderer = Renderer::new(Box::new(status), prompt);

    let (tx, rx) = mpsc::channel();
    runner.spawn_event_forwarder(tx.clone());
    match cli.url {
        Some(url) => {
            let _ = tx.send(AppEvent::Line(url));
            let _ = tx.send(AppEvent::InputClosed);
        }
        None => {
            thread::Builder::new()
                .name("reelgrab-input".to_string())
                .spawn(move || forward_lines(BufReader::new(io::stdin()), tx))
                .context("failed to start input reader")?;
        }
    }

    engine_info!("Using backend {}", settings.endpoints.base());
    let app = App::new(settings, renderer, runner);
    Ok(app.run(rx))
}
