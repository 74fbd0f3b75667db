pub mod offer;
pub mod query;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Upstream credentials not configured: {0}")]
    AuthConfig(String),
    #[error("Upstream token exchange rejected ({status}): {body}")]
    UpstreamAuth { status: u16, body: String },
    #[error("Upstream search failed ({status}): {body}")]
    UpstreamSearch { status: u16, body: String },
    #[error("Upstream transport failure: {0}")]
    Transport(String),
}

pub type ProxyResult<T> = Result<T, ProxyError>;
