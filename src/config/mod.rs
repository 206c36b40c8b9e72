use std::path::Path;

use tracing::{debug, info};

use crate::core::{ConfigError, DfImageError, Result};

pub mod model;

pub use model::*;

impl Config {
    /// Load configuration from a specific file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DfImageError::Config(ConfigError::NotFound(path.display().to_string()))
            }
            _ => DfImageError::Io(e),
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        debug!("Configuration loaded and validated successfully");

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self> {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "dfimage", "dfimage") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        // Try current directory
        let local_config = std::path::PathBuf::from("dfimage.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.docker.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "docker.timeout_seconds must be at least 1".to_string(),
            ));
        }

        if self.docker.concurrency == 0 {
            return Err(ConfigError::Validation(
                "docker.concurrency must be at least 1".to_string(),
            ));
        }

        if self.reconstruct.indent > 32 {
            return Err(ConfigError::Validation(
                "reconstruct.indent must be at most 32".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let invalid_config = Config {
            docker: DockerConfig {
                concurrency: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            invalid_config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_written_config() {
        let mut config = Config::default();
        config.reconstruct.indent = 4;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load(temp_file.path()).unwrap();
        assert_eq!(loaded.reconstruct.indent, 4);
        assert_eq!(loaded.docker.timeout_seconds, config.docker.timeout_seconds);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[docker]\ntimeout_seconds = 0").unwrap();

        assert!(matches!(
            Config::load(temp_file.path()),
            Err(DfImageError::Config(ConfigError::Validation(_)))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[reconstruct]\nboundary = \"sideways\"").unwrap();

        assert!(matches!(
            Config::load(temp_file.path()),
            Err(DfImageError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/dfimage.toml"),
            Err(DfImageError::Config(ConfigError::NotFound(_)))
        ));
    }
}
