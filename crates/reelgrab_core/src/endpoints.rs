use thiserror::Error;
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid backend url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("backend url must use http or https, got {0}")]
    UnsupportedScheme(String),
}

/// Backend base URL and the two endpoints derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoints {
    base: Url,
}

impl BackendEndpoints {
    pub fn new(mut base: Url) -> Result<Self, EndpointError> {
        if !matches!(base.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(base.scheme().to_string()));
        }
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self, EndpointError> {
        Self::new(Url::parse(base.trim())?)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `POST` target resolving a source URL to a title and media URL.
    pub fn metadata_url(&self) -> Url {
        self.endpoint("download-info")
    }

    /// Download target with `title` and `source_url` percent-encoded as query values.
    pub fn proxy_download_url(&self, title: &str, source_url: &str) -> Url {
        let mut url = self.endpoint("proxy-download");
        let query = format!(
            "title={}&url={}",
            urlencoding::encode(title),
            urlencoding::encode(source_url)
        );
        url.set_query(Some(&query));
        url
    }

    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}{}", self.base.path(), segment));
        url
    }
}

impl Default for BackendEndpoints {
    fn default() -> Self {
        let base = Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid");
        Self { base }
    }
}
