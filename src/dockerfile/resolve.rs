//! Picking the locally available image a target was built FROM

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::index::{LayerIndex, TieBreak};
use crate::core::{ImageRecord, LayerId};

/// How the base image is inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BaseStrategy {
    /// First non-self last-layer hit scanning oldest to newest (default)
    #[default]
    FirstMatch,
    /// Candidate whose whole layer list is the longest prefix of the target's
    LongestPrefix,
}

/// A resolved base image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseImage {
    pub reference: String,
    /// How many of the target's oldest layers the base accounts for
    pub layer_count: usize,
}

/// Walk the target's layers oldest first and return the first index hit that
/// is not the target itself.
pub fn resolve_base(
    target_layers: &[LayerId],
    own_reference: Option<&str>,
    index: &LayerIndex,
) -> Option<BaseImage> {
    for (position, layer) in target_layers.iter().enumerate() {
        let Some(reference) = index.get(layer) else {
            continue;
        };
        if Some(reference) == own_reference {
            debug!("Layer {} belongs to the target itself, skipping", layer);
            continue;
        }
        debug!("Layer {} matches base candidate {}", layer, reference);
        return Some(BaseImage {
            reference: reference.to_string(),
            layer_count: position + 1,
        });
    }
    None
}

/// Choose the image whose complete layer list is the longest prefix of the
/// target's. Equal lengths are settled by `tie_break` in listing order.
pub fn resolve_longest_prefix<'a, I>(
    target: &ImageRecord,
    candidates: I,
    tie_break: TieBreak,
) -> Option<BaseImage>
where
    I: IntoIterator<Item = &'a ImageRecord>,
{
    let own_reference = target.primary_reference();
    let mut best: Option<&ImageRecord> = None;

    for candidate in candidates {
        let Some(reference) = candidate.primary_reference() else {
            continue;
        };
        if candidate.id == target.id || Some(reference) == own_reference {
            continue;
        }
        if candidate.layers.is_empty() || !target.layers.starts_with(&candidate.layers) {
            continue;
        }

        best = match best {
            Some(current) if candidate.layers.len() < current.layers.len() => Some(current),
            Some(current)
                if candidate.layers.len() == current.layers.len()
                    && !tie_break.replaces(current, candidate) =>
            {
                Some(current)
            }
            _ => Some(candidate),
        };
    }

    best.and_then(|image| {
        Some(BaseImage {
            reference: image.primary_reference()?.to_string(),
            layer_count: image.layers.len(),
        })
    })
}
