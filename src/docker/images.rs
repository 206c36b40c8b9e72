//! Image operations

use async_trait::async_trait;
use bollard::errors::Error as BollardError;
use bollard::image::ListImagesOptions;
use tracing::{debug, info};

use crate::core::{DockerError, HistoryEvent, ImageRecord, LayerId, Result};
use crate::docker::{DockerClient, ImageStore};

impl DockerClient {
    /// List all images (top-level only, as `docker images` shows them)
    pub async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        debug!("Listing images");

        let options = ListImagesOptions::<String> {
            all: false,
            ..Default::default()
        };

        let images = self
            .inner()
            .list_images(Some(options))
            .await
            .map_err(|e| {
                DockerError::Image(format!("unable to generate the list of images: {}", e))
            })?;

        info!("Found {} images", images.len());

        Ok(images.into_iter().map(|i| i.into()).collect())
    }

    /// Root filesystem layer ids of an image, oldest first
    pub async fn inspect_layers(&self, id: &str) -> Result<Vec<LayerId>> {
        debug!("Inspecting layers of {}", id);

        let inspect = self
            .inner()
            .inspect_image(id)
            .await
            .map_err(|e| image_error(id, "inspect", e))?;

        let layers = inspect
            .root_fs
            .and_then(|fs| fs.layers)
            .unwrap_or_default();

        debug!("{} has {} layers", id, layers.len());
        Ok(layers)
    }

    /// Creation history of an image, newest first
    pub async fn history(&self, reference: &str) -> Result<Vec<HistoryEvent>> {
        debug!("Fetching history of {}", reference);

        let history = self
            .inner()
            .image_history(reference)
            .await
            .map_err(|e| image_error(reference, "get history of", e))?;

        Ok(history.into_iter().map(|h| h.into()).collect())
    }
}

#[async_trait]
impl ImageStore for DockerClient {
    async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        DockerClient::list_images(self).await
    }

    async fn image_layers(&self, id: &str) -> Result<Vec<LayerId>> {
        self.inspect_layers(id).await
    }

    async fn image_history(&self, reference: &str) -> Result<Vec<HistoryEvent>> {
        self.history(reference).await
    }
}

fn image_error(name: &str, action: &str, err: BollardError) -> DockerError {
    match err {
        BollardError::DockerResponseServerError {
            status_code: 404, ..
        } => DockerError::NotFound {
            resource: format!("image {}", name),
        },
        other => DockerError::Image(format!("Failed to {} {}: {}", action, name, other)),
    }
}

impl From<bollard::models::ImageSummary> for ImageRecord {
    fn from(i: bollard::models::ImageSummary) -> Self {
        Self {
            id: i.id,
            repo_tags: i.repo_tags,
            layers: Vec::new(),
            created: i.created,
        }
    }
}

impl From<bollard::models::HistoryResponseItem> for HistoryEvent {
    fn from(h: bollard::models::HistoryResponseItem) -> Self {
        Self {
            id: h.id,
            created: h.created,
            created_by: h.created_by,
            size: h.size,
            comment: h.comment,
        }
    }
}
