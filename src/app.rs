//! Main reconstruction coordinator

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Config, ReconstructConfig};
use crate::core::{DfImageError, ImageRecord, ImageReference, Result};
use crate::docker::ImageStore;
use crate::dockerfile::{
    reconstruct, resolve_base, resolve_longest_prefix, BaseHistory, BaseImage, BaseStrategy,
    Dockerfile, LayerIndex,
};

/// Outcome of one reconstruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconstruction {
    pub target: ImageRecord,
    pub base: Option<BaseImage>,
    pub dockerfile: Dockerfile,
}

/// Drives reconstruction against an image store
pub struct Inspector<S> {
    store: S,
    settings: ReconstructConfig,
    concurrency: usize,
}

impl<S: ImageStore> Inspector<S> {
    /// Create an inspector with default heuristics
    pub fn new(store: S) -> Self {
        Self::with_config(store, &Config::default())
    }

    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            settings: config.reconstruct.clone(),
            concurrency: config.docker.concurrency.max(1),
        }
    }

    /// Fill in layer lists for every image, keeping the engine's order.
    ///
    /// Inspections run concurrently; results are collected in listing order
    /// so last-write-wins in the layer index is unaffected.
    pub async fn load_layers(&self, images: Vec<ImageRecord>) -> Result<Vec<ImageRecord>> {
        let store = &self.store;
        debug!(
            "Inspecting {} images ({} at a time)",
            images.len(),
            self.concurrency
        );

        stream::iter(images)
            .map(|mut image| async move {
                if image.layers.is_empty() {
                    image.layers = store.image_layers(&image.id).await?;
                }
                Ok::<_, DfImageError>(image)
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    /// Reconstruct the Dockerfile of the image `reference` names
    pub async fn reconstruct(&self, reference: &ImageReference) -> Result<Reconstruction> {
        let listed = self.store.list_images().await?;

        let position = reference
            .position_in(&listed)
            .ok_or_else(|| DfImageError::ImageNotFound {
                reference: reference.repo_tag().to_string(),
            })?;

        let images = self.load_layers(listed).await?;
        let target = images[position].clone();
        info!(
            "Target {} ({} layers, created {})",
            target.lookup_reference(),
            target.layers.len(),
            target
                .created_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string())
        );

        let base = self.resolve(&target, &images);
        match &base {
            Some(base) => info!(
                "Base image {} covers {} layers",
                base.reference, base.layer_count
            ),
            None => info!("No base image found locally"),
        }

        let target_history = self.store.image_history(target.lookup_reference()).await?;
        let base_history = match &base {
            Some(base) => self.store.image_history(&base.reference).await?,
            None => Vec::new(),
        };

        let dockerfile = reconstruct(
            &target_history,
            base.as_ref().map(|b| BaseHistory {
                reference: &b.reference,
                history: &base_history,
            }),
            &self.settings.options(),
        );

        Ok(Reconstruction {
            target,
            base,
            dockerfile,
        })
    }

    fn resolve(&self, target: &ImageRecord, images: &[ImageRecord]) -> Option<BaseImage> {
        match self.settings.base_strategy {
            BaseStrategy::FirstMatch => {
                let index = LayerIndex::build(images, self.settings.tie_break);
                resolve_base(&target.layers, target.primary_reference(), &index)
            }
            BaseStrategy::LongestPrefix => {
                resolve_longest_prefix(target, images, self.settings.tie_break)
            }
        }
    }
}
