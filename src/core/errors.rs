use thiserror::Error;

/// Main error type for dfimage
#[derive(Error, Debug)]
pub enum DfImageError {
    /// Docker API errors
    #[error("Docker error: {0}")]
    Docker(#[from] DockerError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The requested image is not in the local store
    #[error("the image \"{reference}\" was not found - make sure you pull it first")]
    ImageNotFound { reference: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Docker-specific errors
#[derive(Error, Debug)]
pub enum DockerError {
    /// Connection errors
    #[error("Failed to connect to Docker: {0}")]
    Connection(String),

    /// Image list/inspect/history failures
    #[error("Image error: {0}")]
    Image(String),

    /// Resource not found
    #[error("{resource} not found")]
    NotFound { resource: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Parse errors
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Validation errors
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// File not found
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// No usable docker socket
    #[error("{0}")]
    Socket(String),

    /// Output file location is unusable
    #[error("{0}")]
    OutputPath(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DfImageError>;

impl DfImageError {
    /// Check if this error is retryable.
    ///
    /// The local daemon and image store either are or are not in the expected
    /// state, so nothing is ever retried.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DfImageError::Docker(DockerError::Connection(e)) => {
                format!("unable to create the docker client: {}", e)
            }
            DfImageError::Config(ConfigError::Socket(msg))
            | DfImageError::Config(ConfigError::OutputPath(msg)) => msg.clone(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DockerError::NotFound {
            resource: "image sha256:abc123".to_string(),
        };
        assert_eq!(err.to_string(), "image sha256:abc123 not found");
    }

    #[test]
    fn test_image_not_found_names_reference() {
        let err = DfImageError::ImageNotFound {
            reference: "demo:v1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "the image \"demo:v1\" was not found - make sure you pull it first"
        );
    }

    #[test]
    fn test_nothing_is_retryable() {
        let connection_err =
            DfImageError::Docker(DockerError::Connection("connection refused".to_string()));
        assert!(!connection_err.is_retryable());

        let history_err = DfImageError::Docker(DockerError::Image("boom".to_string()));
        assert!(!history_err.is_retryable());
    }

    #[test]
    fn test_user_messages() {
        let conn_err = DfImageError::Docker(DockerError::Connection("test".to_string()));
        assert_eq!(conn_err.user_message(), "unable to create the docker client: test");

        let socket_err = DfImageError::Config(ConfigError::Socket("no socket".to_string()));
        assert_eq!(socket_err.user_message(), "no socket");
    }

    #[test]
    fn test_config_error_display() {
        let err = DfImageError::Config(ConfigError::Validation(
            "docker.concurrency must be at least 1".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Configuration error: Configuration validation failed: docker.concurrency must be at least 1"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DfImageError = io_err.into();
        assert!(matches!(err, DfImageError::Io(_)));
    }
}
