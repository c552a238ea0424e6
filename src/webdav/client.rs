use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::config::{ConfigProvider, WebDAVConfig};
use super::error::{DavError, DavResult};
use super::path::ancestor_prefixes;
use super::request::{DavRequest, Operation};
use super::response::{interpret, DavOutcome};
use super::transport::{HttpTransport, ReqwestTransport};

/// Payload for [`WebDAVClient::put`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Read from the local filesystem when the request is built
    FilePath(PathBuf),
    Bytes(Vec<u8>),
}

impl From<Vec<u8>> for ContentSource {
    fn from(bytes: Vec<u8>) -> Self {
        ContentSource::Bytes(bytes)
    }
}

impl From<&[u8]> for ContentSource {
    fn from(bytes: &[u8]) -> Self {
        ContentSource::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for ContentSource {
    fn from(path: PathBuf) -> Self {
        ContentSource::FilePath(path)
    }
}

/// WebDAV client exposing one method per operation.
///
/// Holds no mutable state: configuration is fetched from the provider once
/// per operation, and the transport is shared behind an `Arc`.
pub struct WebDAVClient<T: HttpTransport = ReqwestTransport> {
    transport: Arc<T>,
    config: Arc<dyn ConfigProvider>,
}

impl WebDAVClient<ReqwestTransport> {
    /// Creates a client for a fixed configuration using the reqwest transport
    pub fn new(config: WebDAVConfig) -> DavResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> WebDAVClient<T> {
    /// Creates a client from any config provider and transport
    pub fn with_transport<P>(provider: P, transport: T) -> Self
    where
        P: ConfigProvider + 'static,
    {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(provider),
        }
    }

    /// Configuration the next operation would use
    pub fn current_config(&self) -> WebDAVConfig {
        self.config.current()
    }

    /// Builds, sends and interprets a single operation
    pub async fn execute_operation(&self, operation: Operation) -> DavResult<DavOutcome> {
        let config = self.config.current();
        self.execute_with(&config, operation).await
    }

    async fn execute_with(&self, config: &WebDAVConfig, operation: Operation) -> DavResult<DavOutcome> {
        let request = DavRequest::build(config, operation)?;
        let kind = request.kind;
        let url = request.url.clone();

        let response = match self.transport.execute(request, &config.transport_options).await {
            Ok(response) => response,
            Err(e) => {
                error!("Transport failure for {} {}: {}", kind, url, e);
                return Err(e.into());
            }
        };

        debug!("{} {} -> HTTP {}", kind, url, response.status);
        interpret(kind, response.status, response.body)
    }

    /// Downloads the resource at `path`
    pub async fn get(&self, path: &str) -> DavResult<Vec<u8>> {
        let outcome = self
            .execute_operation(Operation::Get { path: path.to_string() })
            .await?;
        let body = outcome.into_body().unwrap_or_default();
        debug!("Downloaded {} bytes for file: {}", body.len(), path);
        Ok(body)
    }

    /// Uploads `content` to `path`, creating or replacing the resource
    pub async fn put(&self, path: &str, content: ContentSource) -> DavResult<DavOutcome> {
        let body = match content {
            ContentSource::Bytes(bytes) => bytes,
            ContentSource::FilePath(file) => tokio::fs::read(&file).await.map_err(|e| {
                error!("Failed to read {} for upload: {}", file.display(), e);
                DavError::LocalFile(format!("{}: {}", file.display(), e))
            })?,
        };

        let size = body.len();
        let outcome = self
            .execute_operation(Operation::Put { path: path.to_string(), body })
            .await?;
        info!("Uploaded {} bytes to {} ({:?})", size, path, outcome);
        Ok(outcome)
    }

    /// Moves `source` to `destination`, replacing an existing destination
    pub async fn move_resource(&self, source: &str, destination: &str) -> DavResult<DavOutcome> {
        self.move_resource_with_overwrite(source, destination, true).await
    }

    pub async fn move_resource_with_overwrite(
        &self,
        source: &str,
        destination: &str,
        overwrite: bool,
    ) -> DavResult<DavOutcome> {
        let outcome = self
            .execute_operation(Operation::Move {
                source: source.to_string(),
                destination: destination.to_string(),
                overwrite,
            })
            .await?;
        info!("Moved {} to {}", source, destination);
        Ok(outcome)
    }

    /// Copies `source` to `destination`, replacing an existing destination
    pub async fn copy_resource(&self, source: &str, destination: &str) -> DavResult<DavOutcome> {
        self.copy_resource_with_overwrite(source, destination, true).await
    }

    pub async fn copy_resource_with_overwrite(
        &self,
        source: &str,
        destination: &str,
        overwrite: bool,
    ) -> DavResult<DavOutcome> {
        let outcome = self
            .execute_operation(Operation::Copy {
                source: source.to_string(),
                destination: destination.to_string(),
                overwrite,
            })
            .await?;
        info!("Copied {} to {}", source, destination);
        Ok(outcome)
    }

    pub async fn delete(&self, path: &str) -> DavResult<DavOutcome> {
        let outcome = self
            .execute_operation(Operation::Delete { path: path.to_string() })
            .await?;
        info!("Deleted {}", path);
        Ok(outcome)
    }

    /// Creates a single collection. Fails with `MethodNotAllowed` if it exists
    /// and `Conflict` if the parent is missing.
    pub async fn mkcol(&self, path: &str) -> DavResult<DavOutcome> {
        self.execute_operation(Operation::Mkcol { path: path.to_string() })
            .await
    }

    /// Creates the collection at `path` along with any missing ancestors.
    ///
    /// Issues one MKCOL per path prefix, parent first. An existing collection
    /// counts as success; any other failure stops the walk and is returned
    /// as-is, leaving already-created ancestors in place.
    ///
    /// The whole walk uses one configuration snapshot, so every level is
    /// created on the same server.
    pub async fn mkcol_recursive(&self, path: &str) -> DavResult<DavOutcome> {
        let config = self.config.current();
        let prefixes = ancestor_prefixes(path);
        debug!("Creating {} collection level(s) for {}", prefixes.len(), path);

        for prefix in &prefixes {
            let step = self
                .execute_with(&config, Operation::Mkcol { path: prefix.clone() })
                .await;
            match step {
                Ok(_) => debug!("Created collection {}", prefix),
                Err(DavError::MethodNotAllowed) => debug!("Collection {} already exists", prefix),
                Err(e) => {
                    error!("Failed to create collection {} while creating {}: {}", prefix, path, e);
                    return Err(e);
                }
            }
        }

        info!("Ensured collection {}", path);
        Ok(DavOutcome::Created)
    }
}

impl<T: HttpTransport> Clone for WebDAVClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
        }
    }
}
