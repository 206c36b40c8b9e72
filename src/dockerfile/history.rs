//! Rebuilding the instruction list from an image's history

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::step::{self, DEFAULT_INDENT};
use super::Dockerfile;
use crate::core::HistoryEvent;

/// Placeholder FROM line when no base image exists locally
pub const FROM_NOT_FOUND: &str = "FROM <base image not found locally>";

/// Where the target's own history stops and the base's begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Stop at the first event whose command equals the base's newest one (default)
    #[default]
    Command,
    /// Drop as many of the oldest events as the base's history holds
    HistoryLength,
}

/// Knobs for [`reconstruct`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructOptions {
    pub boundary: Boundary,
    pub indent: usize,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            boundary: Boundary::default(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// The resolved base together with its history (newest first)
#[derive(Debug, Clone, Copy)]
pub struct BaseHistory<'a> {
    pub reference: &'a str,
    pub history: &'a [HistoryEvent],
}

/// Turn a target's history (newest first) into an oldest-first Dockerfile
/// headed by exactly one FROM line.
pub fn reconstruct(
    target_history: &[HistoryEvent],
    base: Option<BaseHistory<'_>>,
    options: &ReconstructOptions,
) -> Dockerfile {
    let own_events = own_events(target_history, base.as_ref(), options.boundary);
    debug!(
        "{} of {} history events belong to the target",
        own_events.len(),
        target_history.len()
    );

    let mut instructions: Vec<String> = own_events
        .iter()
        .map(|event| step::instruction(&event.created_by, options.indent))
        .collect();

    instructions.push(match base {
        Some(base) => format!("FROM {}", base.reference),
        None => FROM_NOT_FOUND.to_string(),
    });

    instructions.reverse();
    Dockerfile::new(instructions)
}

/// The newest-first slice of events the target added on top of its base
fn own_events<'a>(
    target_history: &'a [HistoryEvent],
    base: Option<&BaseHistory<'_>>,
    boundary: Boundary,
) -> &'a [HistoryEvent] {
    let Some(base) = base else {
        return target_history;
    };

    match boundary {
        Boundary::Command => {
            let marker = base
                .history
                .first()
                .map(|e| e.created_by.as_str())
                .filter(|m| !m.is_empty());
            let Some(marker) = marker else {
                return target_history;
            };
            let end = target_history
                .iter()
                .position(|e| e.created_by == marker)
                .unwrap_or(target_history.len());
            &target_history[..end]
        }
        Boundary::HistoryLength => {
            let keep = target_history.len().saturating_sub(base.history.len());
            &target_history[..keep]
        }
    }
}
