use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Video platform a submitted URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    YouTube,
    YouTubeShorts,
    InstagramReels,
    TikTok,
    Unsupported,
}

impl Platform {
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::YouTubeShorts => "YouTube Shorts",
            Platform::InstagramReels => "Instagram Reels",
            Platform::TikTok => "TikTok",
            Platform::Unsupported => "Unsupported",
        }
    }

    pub fn is_supported(self) -> bool {
        self != Platform::Unsupported
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// First match wins. Shorts links also satisfy the general YouTube pattern.
static PATTERNS: LazyLock<Vec<(Platform, Regex)>> = LazyLock::new(|| {
    [
        (Platform::YouTubeShorts, r"(?i)youtube\.com/shorts"),
        (
            Platform::YouTube,
            r"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)",
        ),
        (Platform::InstagramReels, r"(?i)instagram\.com/(?:p|reels?)/"),
        (Platform::TikTok, r"(?i)tiktok\.com"),
    ]
    .into_iter()
    .map(|(platform, pattern)| {
        let regex = Regex::new(pattern).expect("platform pattern compiles");
        (platform, regex)
    })
    .collect()
});

/// Classifies a raw URL string. Only surrounding whitespace is trimmed; no I/O.
pub fn detect_platform(url: &str) -> Platform {
    let url = url.trim();
    PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(url))
        .map(|(platform, _)| *platform)
        .unwrap_or(Platform::Unsupported)
}
