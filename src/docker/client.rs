use std::path::Path;
use std::sync::Arc;

use bollard::{ClientVersion, Docker};
use tracing::{debug, info};

use crate::core::{ConnectionInfo, DockerError, Result};

/// API version requested from the daemon. Newer daemons still serve it, while
/// negotiating upwards trips over older engines.
pub const API_VERSION: ClientVersion = ClientVersion {
    major_version: 1,
    minor_version: 39,
};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Docker client wrapper
#[derive(Clone)]
pub struct DockerClient {
    inner: Arc<Docker>,
    connection_info: ConnectionInfo,
}

impl DockerClient {
    /// Create a new client talking to a unix socket
    pub async fn with_socket(socket: &Path, timeout_secs: u64) -> Result<Self> {
        let socket = socket.to_string_lossy();
        info!("Creating Docker client with socket: {}", socket);

        let docker = Docker::connect_with_unix(&socket, timeout_secs, &API_VERSION)
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        Self::new(docker, format!("unix://{}", socket)).await
    }

    /// Internal constructor
    async fn new(docker: Docker, host: String) -> Result<Self> {
        debug!("Fetching Docker version information");

        let version = docker
            .version()
            .await
            .map_err(|e| DockerError::Connection(e.to_string()))?;

        let info = ConnectionInfo {
            host,
            version: version.version.unwrap_or_else(|| "unknown".to_string()),
            api_version: version.api_version.unwrap_or_else(|| "unknown".to_string()),
            os: version.os.unwrap_or_else(|| "unknown".to_string()),
            arch: version.arch.unwrap_or_else(|| "unknown".to_string()),
        };

        info!(
            "Docker client initialized: {} (API: {}) on {}/{}",
            info.version, info.api_version, info.os, info.arch
        );

        Ok(Self {
            inner: Arc::new(docker),
            connection_info: info,
        })
    }

    /// Get connection information
    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.connection_info
    }

    /// Get the inner Docker client (for advanced usage)
    pub fn inner(&self) -> &Docker {
        &self.inner
    }
}
