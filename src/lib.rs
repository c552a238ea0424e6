//! Client library for the WebDAV protocol.
//!
//! Turns filesystem-like operations (get, put, move, copy, delete, mkcol)
//! into WebDAV requests and maps response status codes back to typed
//! outcomes. HTTP execution is delegated to an [`HttpTransport`].

pub mod webdav;

pub use webdav::{
    ConfigProvider, ContentSource, DavError, DavOutcome, DavRequest, DavResult, HttpTransport,
    Operation, OperationKind, ReqwestTransport, TransportError, TransportOptions,
    TransportResponse, WebDAVClient, WebDAVConfig,
};
