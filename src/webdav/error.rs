use thiserror::Error;

/// Failure of a WebDAV operation.
///
/// Status-derived variants come from [`super::response::interpret`]; the rest
/// are raised before any status code is seen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DavError {
    #[error("resource not found")]
    NotFound,

    #[error("access forbidden")]
    Forbidden,

    #[error("conflict with the current state of the target resource")]
    Conflict,

    /// The destination exists and `Overwrite: F` was sent.
    #[error("precondition failed")]
    PreconditionFailed,

    /// MKCOL on a URL that is already mapped.
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unexpected HTTP status {0}")]
    Unknown(u16),

    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read local file: {0}")]
    LocalFile(String),
}

impl DavError {
    /// HTTP status behind a status-derived error, if any.
    ///
    /// `Forbidden` reports 403 even when the server answered 401.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DavError::NotFound => Some(404),
            DavError::Forbidden => Some(403),
            DavError::Conflict => Some(409),
            DavError::PreconditionFailed => Some(412),
            DavError::MethodNotAllowed => Some(405),
            DavError::Unknown(status) => Some(*status),
            DavError::TransportFailure(_)
            | DavError::InvalidUrl(_)
            | DavError::InvalidConfig(_)
            | DavError::LocalFile(_) => None,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(self, DavError::TransportFailure(_))
    }
}

/// Error reported by an [`super::transport::HttpTransport`] when no HTTP
/// response was obtained at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for DavError {
    fn from(err: TransportError) -> Self {
        DavError::TransportFailure(err.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

pub type DavResult<T> = std::result::Result<T, DavError>;
