//! Writing a reconstructed Dockerfile out

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::app::Reconstruction;
use crate::core::Result;
use crate::dockerfile::Dockerfile;

/// How the result is printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Dockerfile instructions
    #[default]
    Text,
    /// Target, resolved base and instructions as JSON
    Json,
}

/// Print one instruction per line
pub fn print_dockerfile<W: Write>(dockerfile: &Dockerfile, out: &mut W) -> Result<()> {
    for line in dockerfile.lines() {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}

/// Print the whole reconstruction as pretty JSON
pub fn print_json<W: Write>(reconstruction: &Reconstruction, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reconstruction)?;
    writeln!(out)?;
    Ok(())
}

/// Write the instructions to `path`, replacing its contents.
///
/// Instructions are written back to back unless `newlines` is set.
pub fn write_dockerfile(dockerfile: &Dockerfile, path: &Path, newlines: bool) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let contents = if newlines {
        dockerfile.render_lines()
    } else {
        dockerfile.concat()
    };
    file.write_all(contents.as_bytes())?;

    info!(
        "Wrote {} instructions to {}",
        dockerfile.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Dockerfile {
        Dockerfile::new(vec![
            "FROM alpine:3.19".to_string(),
            "RUN apk add bash\n        && apk add jq".to_string(),
        ])
    }

    #[test]
    fn test_print_one_per_line() {
        let mut out = Vec::new();
        print_dockerfile(&sample(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "FROM alpine:3.19\nRUN apk add bash\n        && apk add jq\n"
        );
    }

    #[test]
    fn test_json_output() {
        let reconstruction = Reconstruction {
            target: crate::core::ImageRecord {
                id: "sha256:d1".to_string(),
                repo_tags: vec!["demo:v1".to_string()],
                ..Default::default()
            },
            base: None,
            dockerfile: sample(),
        };
        let mut out = Vec::new();
        print_json(&reconstruction, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["target"]["id"], "sha256:d1");
        assert!(value["base"].is_null());
        assert_eq!(value["dockerfile"]["instructions"][0], "FROM alpine:3.19");
    }

    #[test]
    fn test_file_is_verbatim_concatenation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Dockerfile");
        std::fs::write(&path, "old contents that are longer than the new ones ....").unwrap();

        write_dockerfile(&sample(), &path, false).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "FROM alpine:3.19RUN apk add bash\n        && apk add jq"
        );
    }

    #[test]
    fn test_file_with_newlines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Dockerfile");

        write_dockerfile(&sample(), &path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), sample().render_lines());
    }
}
