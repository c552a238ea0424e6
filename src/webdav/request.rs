use std::fmt;
use tracing::debug;

use super::common::{overwrite_value, HEADER_DESTINATION, HEADER_OVERWRITE};
use super::config::WebDAVConfig;
use super::error::DavResult;
use super::path::join_url;

/// The WebDAV operations this client knows how to issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Get,
    Put,
    Move,
    Copy,
    Delete,
    Mkcol,
}

impl OperationKind {
    /// HTTP method token sent on the wire
    pub fn method(&self) -> &'static str {
        match self {
            OperationKind::Get => "GET",
            OperationKind::Put => "PUT",
            OperationKind::Move => "MOVE",
            OperationKind::Copy => "COPY",
            OperationKind::Delete => "DELETE",
            OperationKind::Mkcol => "MKCOL",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// An operation together with its operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Get { path: String },
    Put { path: String, body: Vec<u8> },
    Move { source: String, destination: String, overwrite: bool },
    Copy { source: String, destination: String, overwrite: bool },
    Delete { path: String },
    Mkcol { path: String },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Get { .. } => OperationKind::Get,
            Operation::Put { .. } => OperationKind::Put,
            Operation::Move { .. } => OperationKind::Move,
            Operation::Copy { .. } => OperationKind::Copy,
            Operation::Delete { .. } => OperationKind::Delete,
            Operation::Mkcol { .. } => OperationKind::Mkcol,
        }
    }

    /// Path of the resource the request is sent to
    pub fn target(&self) -> &str {
        match self {
            Operation::Get { path }
            | Operation::Put { path, .. }
            | Operation::Delete { path }
            | Operation::Mkcol { path } => path,
            Operation::Move { source, .. } | Operation::Copy { source, .. } => source,
        }
    }
}

/// A fully specified HTTP request, ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DavRequest {
    pub kind: OperationKind,
    pub url: String,
    /// Config headers first, then operation headers. Never deduplicated.
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl DavRequest {
    pub fn build(config: &WebDAVConfig, operation: Operation) -> DavResult<Self> {
        config.validate()?;

        let kind = operation.kind();
        let url = join_url(&config.base_url, operation.target())?;
        let mut headers = config.headers.clone();

        let body = match operation {
            Operation::Put { body, .. } => Some(body),
            Operation::Move { destination, overwrite, .. }
            | Operation::Copy { destination, overwrite, .. } => {
                headers.push((
                    HEADER_DESTINATION.to_string(),
                    join_url(&config.base_url, &destination)?,
                ));
                headers.push((HEADER_OVERWRITE.to_string(), overwrite_value(overwrite).to_string()));
                None
            }
            Operation::Get { .. } | Operation::Delete { .. } | Operation::Mkcol { .. } => None,
        };

        debug!("Built {} request for {}", kind, url);
        debug!("   Headers: {:?}", header_names(&headers));
        if let Some(ref bytes) = body {
            debug!("   Body length: {} bytes", bytes.len());
        }

        Ok(Self { kind, url, headers, body })
    }

    pub fn method(&self) -> &'static str {
        self.kind.method()
    }

    /// First value of the header `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// Header values may carry credentials, so only names are logged.
fn header_names(headers: &[(String, String)]) -> Vec<&str> {
    headers.iter().map(|(name, _)| name.as_str()).collect()
}
