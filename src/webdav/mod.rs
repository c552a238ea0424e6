// WebDAV client: request construction, status interpretation and the client facade

pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod path;
pub mod request;
pub mod response;
pub mod transport;

// Re-export main types for convenience
pub use client::{ContentSource, WebDAVClient};
pub use config::{ConfigProvider, TransportOptions, WebDAVConfig};
pub use error::{DavError, DavResult, TransportError};
pub use path::join_url;
pub use request::{DavRequest, Operation, OperationKind};
pub use response::{interpret, DavOutcome};
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
