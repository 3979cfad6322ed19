use serde::Deserialize;

/// JSON document returned by `POST /download-info`.
///
/// Every field tolerates absence; deciding what a missing field means is up to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Diagnostic text from the backend. Logged, never shown.
    #[serde(default)]
    pub details: Option<String>,
}
