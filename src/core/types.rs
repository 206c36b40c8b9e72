//! Core type definitions and shared types

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Type alias for image IDs (`sha256:<hash>`)
pub type ImageId = String;

/// Type alias for layer IDs (diff ids from the image's root filesystem)
pub type LayerId = String;

lazy_static! {
    static ref IMAGE_ID_RE: Regex =
        Regex::new(r"^(?:sha256:)?(?P<hash>[0-9a-fA-F]{1,64})$").unwrap();
}

/// Snapshot of one locally known image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,
    pub repo_tags: Vec<String>,
    /// Root filesystem layers, oldest first
    pub layers: Vec<LayerId>,
    pub created: i64,
}

impl ImageRecord {
    /// The first listed tag, used as the image's name everywhere
    pub fn primary_reference(&self) -> Option<&str> {
        self.repo_tags
            .iter()
            .map(String::as_str)
            .find(|t| !t.contains("<none>"))
    }

    /// The most recently added layer
    pub fn last_layer(&self) -> Option<&LayerId> {
        self.layers.last()
    }

    /// Hash part of the id, without the `sha256:` family prefix
    pub fn id_hash(&self) -> &str {
        self.id.split_once(':').map_or(self.id.as_str(), |(_, h)| h)
    }

    /// Reference usable for history lookups: the primary tag, else the id
    pub fn lookup_reference(&self) -> &str {
        self.primary_reference().unwrap_or(&self.id)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }
}

/// One entry of an image's creation history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: String,
    pub created: i64,
    pub created_by: String,
    pub size: i64,
    pub comment: String,
}

impl HistoryEvent {
    /// Event carrying only a creation command
    pub fn new(created_by: impl Into<String>) -> Self {
        Self {
            created_by: created_by.into(),
            ..Default::default()
        }
    }
}

/// A user-supplied image name, tag-normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    repo_tag: String,
    id_prefix: Option<String>,
}

impl ImageReference {
    /// Parse `name[:tag]`, defaulting the tag to `latest`.
    ///
    /// A tag is only recognized after the last `/`, so a registry port
    /// (`localhost:5000/app`) is not mistaken for one. Hex-looking input is
    /// additionally treated as an image id prefix.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let last_segment = raw.rsplit('/').next().unwrap_or(raw);
        let repo_tag = if raw.contains('@') || last_segment.contains(':') {
            raw.to_string()
        } else {
            format!("{}:latest", raw)
        };

        let id_prefix = IMAGE_ID_RE
            .captures(raw)
            .and_then(|c| c.name("hash"))
            .map(|m| m.as_str().to_lowercase());

        Self {
            repo_tag,
            id_prefix,
        }
    }

    /// The name with its tag filled in
    pub fn repo_tag(&self) -> &str {
        &self.repo_tag
    }

    pub fn id_prefix(&self) -> Option<&str> {
        self.id_prefix.as_deref()
    }

    /// Whether `image` is the one this reference names
    pub fn matches(&self, image: &ImageRecord) -> bool {
        if let Some(prefix) = &self.id_prefix {
            if image.id_hash().to_lowercase().starts_with(prefix.as_str()) {
                return true;
            }
        }
        image.repo_tags.iter().any(|t| t == &self.repo_tag)
    }

    /// Position of the referenced image; when several match, the last listed wins
    pub fn position_in(&self, images: &[ImageRecord]) -> Option<usize> {
        images.iter().rposition(|img| self.matches(img))
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.repo_tag)
    }
}
