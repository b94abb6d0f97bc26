use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("host unreachable: {0}")]
    Unreachable(String),
}

impl FetchError {
    /// Offline-style failure with a free-form reason. Used by fetchers that
    /// are not backed by reqwest.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        FetchError::Unreachable(reason.into())
    }
}
