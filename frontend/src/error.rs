use thiserror::Error;

/// Failures raised while wiring the enhancer onto a page.
#[derive(Debug, Error)]
pub enum EnhancerError {
    #[error("element `#{0}` not found")]
    MissingElement(String),
    #[error("invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("preference storage unavailable: {0}")]
    Storage(String),
    #[error("browser call failed: {0}")]
    Js(String),
}
