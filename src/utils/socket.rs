//! Locating the docker.sock to talk to

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::core::{ConfigError, Result};

/// Where a socket path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketSource {
    CommandLine,
    ConfigFile,
    DockerHost,
    Discovered,
}

/// Conventional socket locations, most specific first: Rancher Desktop,
/// Docker Desktop, then the system daemon.
pub fn candidate_sockets() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dirs) = BaseDirs::new() {
        let home = dirs.home_dir();
        candidates.push(home.join(".rd").join("docker.sock"));
        candidates.push(home.join(".docker").join("run").join("docker.sock"));
    }
    candidates.push(PathBuf::from("/var/run/docker.sock"));
    candidates
}

/// Pick the socket: command line, then config, then a `unix://` DOCKER_HOST,
/// then the first conventional location that exists.
pub fn discover_socket(
    cli: Option<&Path>,
    configured: Option<&Path>,
) -> Result<(PathBuf, SocketSource)> {
    let docker_host = std::env::var("DOCKER_HOST").ok();
    discover_socket_from(cli, configured, docker_host.as_deref(), &candidate_sockets())
}

pub(crate) fn discover_socket_from(
    cli: Option<&Path>,
    configured: Option<&Path>,
    docker_host: Option<&str>,
    candidates: &[PathBuf],
) -> Result<(PathBuf, SocketSource)> {
    if let Some(path) = cli {
        return Ok((path.to_path_buf(), SocketSource::CommandLine));
    }
    if let Some(path) = configured {
        return Ok((path.to_path_buf(), SocketSource::ConfigFile));
    }
    if let Some(path) = docker_host.and_then(|h| h.strip_prefix("unix://")) {
        return Ok((PathBuf::from(path), SocketSource::DockerHost));
    }

    for candidate in candidates {
        debug!("Trying socket {}", candidate.display());
        if candidate.exists() {
            return Ok((candidate.clone(), SocketSource::Discovered));
        }
    }

    Err(ConfigError::Socket(
        "failed to find the docker socket - use --socket to specify the path to docker.sock"
            .to_string(),
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_cli_wins() {
        let (path, source) = discover_socket_from(
            Some(Path::new("/tmp/cli.sock")),
            Some(Path::new("/tmp/config.sock")),
            Some("unix:///tmp/env.sock"),
            &[],
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/cli.sock"));
        assert_eq!(source, SocketSource::CommandLine);
    }

    #[test]
    fn test_config_before_env() {
        let (path, source) = discover_socket_from(
            None,
            Some(Path::new("/tmp/config.sock")),
            Some("unix:///tmp/env.sock"),
            &[],
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/config.sock"));
        assert_eq!(source, SocketSource::ConfigFile);
    }

    #[test]
    fn test_unix_docker_host() {
        let (path, source) =
            discover_socket_from(None, None, Some("unix:///tmp/env.sock"), &[]).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/env.sock"));
        assert_eq!(source, SocketSource::DockerHost);
    }

    #[test]
    fn test_tcp_docker_host_is_ignored() {
        let dir = TempDir::new().unwrap();
        let sock = dir.path().join("docker.sock");
        std::fs::write(&sock, b"").unwrap();

        let candidates = vec![dir.path().join("missing.sock"), sock.clone()];
        let (path, source) =
            discover_socket_from(None, None, Some("tcp://127.0.0.1:2375"), &candidates).unwrap();
        assert_eq!(path, sock);
        assert_eq!(source, SocketSource::Discovered);
    }

    #[test]
    fn test_nothing_found() {
        let err = discover_socket_from(None, None, None, &[PathBuf::from("/nonexistent.sock")])
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "failed to find the docker socket - use --socket to specify the path to docker.sock"
        );
    }

    #[test]
    fn test_candidates_end_with_system_socket() {
        let candidates = candidate_sockets();
        assert_eq!(
            candidates.last(),
            Some(&PathBuf::from("/var/run/docker.sock"))
        );
    }
}
