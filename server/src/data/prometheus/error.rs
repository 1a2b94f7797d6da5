use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection failure, timeout, non-2xx status or undecodable body
    #[error("Upstream error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Prometheus answered, but not with the shape we expect
    #[error("{0}")]
    InvalidResponse(String),
}

impl BackendError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
