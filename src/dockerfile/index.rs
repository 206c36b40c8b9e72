//! Index from "last layer of an image" to that image's reference

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ImageRecord, LayerId};

/// Which image keeps an index slot when several end in the same layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The image the engine listed last wins (default)
    #[default]
    EnumerationOrder,
    /// The image with the most tags wins
    MostTags,
    /// The most recently created image wins
    Newest,
}

impl TieBreak {
    /// Whether `challenger`, seen after `holder`, takes over the slot.
    ///
    /// Equal ranks fall back to enumeration order.
    pub fn replaces(&self, holder: &ImageRecord, challenger: &ImageRecord) -> bool {
        match self {
            TieBreak::EnumerationOrder => true,
            TieBreak::MostTags => challenger.repo_tags.len() >= holder.repo_tags.len(),
            TieBreak::Newest => challenger.created >= holder.created,
        }
    }
}

/// Last-layer lookup table built once per run
#[derive(Debug, Clone, Default)]
pub struct LayerIndex {
    entries: HashMap<LayerId, ImageRecord>,
}

impl LayerIndex {
    /// Build the index from every locally known image, in the given order.
    ///
    /// Images without layers or without a usable tag get no entry.
    pub fn build<'a, I>(images: I, tie_break: TieBreak) -> Self
    where
        I: IntoIterator<Item = &'a ImageRecord>,
    {
        let mut entries: HashMap<LayerId, ImageRecord> = HashMap::new();

        for image in images {
            let (Some(last_layer), Some(reference)) =
                (image.last_layer(), image.primary_reference())
            else {
                trace!("Skipping {} (no layers or no tag)", image.id);
                continue;
            };

            match entries.get(last_layer) {
                Some(holder) if !tie_break.replaces(holder, image) => {
                    debug!(
                        "Layer {} stays with {:?}, not {}",
                        last_layer,
                        holder.primary_reference(),
                        reference
                    );
                }
                _ => {
                    entries.insert(last_layer.clone(), image.clone());
                }
            }
        }

        debug!("Layer index holds {} entries", entries.len());
        Self { entries }
    }

    /// Point `layer` at a bare reference, replacing any existing entry
    pub fn insert(&mut self, layer: impl Into<LayerId>, reference: impl Into<String>) {
        let layer = layer.into();
        let image = ImageRecord {
            repo_tags: vec![reference.into()],
            layers: vec![layer.clone()],
            ..Default::default()
        };
        self.entries.insert(layer, image);
    }

    /// Reference of the image whose last layer is `layer`
    pub fn get(&self, layer: &str) -> Option<&str> {
        self.entries.get(layer).and_then(|i| i.primary_reference())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
