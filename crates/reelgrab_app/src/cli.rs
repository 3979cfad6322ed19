use std::path::PathBuf;

use clap::Parser;

/// Resolve a YouTube, Instagram Reels or TikTok link through a download backend.
#[derive(Debug, Parser)]
#[command(name = "reelgrab", version)]
#[command(about = "Resolve video links through a download backend", long_about = None)]
pub struct Cli {
    /// Video link to submit once. Without it, links are read from stdin, one per line.
    pub url: Option<String>,

    /// Backend base URL serving /download-info and /proxy-download.
    #[arg(long, value_name = "URL")]
    pub backend: Option<String>,

    /// RON configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save downloads into DIR instead of printing the download URL.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Delay before the form resets after an outcome.
    #[arg(long, value_name = "MS")]
    pub reset_delay_ms: Option<u64>,

    /// Plain status lines without ANSI colours.
    #[arg(long)]
    pub no_color: bool,

    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also write logs to FILE.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
