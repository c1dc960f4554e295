use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection failure, timeout, or non-success status for one URL.
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    /// A course block lacks one of its required markers.
    #[error("malformed course block: missing {field}{}", block_context(.context))]
    MalformedBlock {
        field: &'static str,
        context: Option<String>,
    },

    /// The database sink rejected a record.
    #[error("insert of {course_code} failed: {reason}")]
    Insert { course_code: String, reason: String },

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn block_context(context: &Option<String>) -> String {
    context.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

impl ScrapeError {
    pub fn network(url: &str, source: impl Into<reqwest_middleware::Error>) -> Self {
        ScrapeError::Network {
            url: url.to_string(),
            source: source.into(),
        }
    }
}
