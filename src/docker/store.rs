//! Read-only view of a local image store

use async_trait::async_trait;

use crate::core::{HistoryEvent, ImageRecord, LayerId, Result};

/// What reconstruction needs from the container engine.
///
/// Every call is a read; failures are fatal to the current run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// All locally known images in the engine's listing order. Layer lists
    /// may be left empty; see [`ImageStore::image_layers`].
    async fn list_images(&self) -> Result<Vec<ImageRecord>>;

    /// Root filesystem layers of one image, oldest first
    async fn image_layers(&self, id: &str) -> Result<Vec<LayerId>>;

    /// Creation history of one image, newest first
    async fn image_history(&self, reference: &str) -> Result<Vec<HistoryEvent>>;
}
