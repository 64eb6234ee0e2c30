use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContribError>;

#[derive(Error, Debug)]
pub enum ContribError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Capture error: {0}")]
    Capture(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Year {year} is outside the selectable range {first}-{last}")]
    InvalidYear { year: i32, first: i32, last: i32 },
    #[error("Unknown format: {0}")]
    UnknownFormat(String),
}

// A failed persist hands the temp file back; it is dropped (and removed) here.
impl From<tempfile::PersistError> for ContribError {
    fn from(err: tempfile::PersistError) -> Self {
        ContribError::Io(err.error)
    }
}
