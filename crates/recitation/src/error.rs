#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("no zeker at index {0}")]
    UnknownZeker(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
