use std::io::Write;
use std::path::PathBuf;

use engine_logging::{engine_info, engine_warn};
use reelgrab_core::SubmissionId;
use reelgrab_engine::{DownloadRequest, EngineHandle};

/// A download the handler decided to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub submission: SubmissionId,
    pub title: String,
    pub source_url: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing more will be reported.
    Done,
    /// Work continues on the engine and ends with a `DownloadFinished` event.
    Background,
}

/// Plays the browser's part: takes over once the handler has a download URL.
pub trait Navigator: Send {
    fn navigate(&mut self, navigation: &Navigation) -> Dispatch;
}

/// Writes each download URL on its own line.
pub struct PrintNavigator<W> {
    out: W,
}

impl<W: Write + Send> PrintNavigator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Navigator for PrintNavigator<W> {
    fn navigate(&mut self, navigation: &Navigation) -> Dispatch {
        if let Err(err) = writeln!(self.out, "{}", navigation.target).and_then(|()| self.out.flush())
        {
            engine_warn!("Could not write download URL: {}", err);
        }
        Dispatch::Done
    }
}

/// Streams the download into a directory through the engine.
pub struct SaveNavigator {
    engine: EngineHandle,
    output_dir: PathBuf,
}

impl SaveNavigator {
    pub fn new(engine: EngineHandle, output_dir: PathBuf) -> Self {
        Self { engine, output_dir }
    }
}

impl Navigator for SaveNavigator {
    fn navigate(&mut self, navigation: &Navigation) -> Dispatch {
        engine_info!(
            "Saving submission {} into {:?}",
            navigation.submission,
            self.output_dir
        );
        self.engine.download(
            navigation.submission,
            DownloadRequest {
                target: navigation.target.clone(),
                title: navigation.title.clone(),
                source_url: navigation.source_url.clone(),
                output_dir: self.output_dir.clone(),
            },
        );
        Dispatch::Background
    }
}
