//! Dockerfile reconstruction from image history
//!
//! Everything in here is a pure function over an already-fetched snapshot of
//! the local image store; the engine is only talked to from [`crate::app`].

pub mod history;
pub mod index;
pub mod resolve;
pub mod step;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use history::{reconstruct, BaseHistory, Boundary, ReconstructOptions, FROM_NOT_FOUND};
pub use index::{LayerIndex, TieBreak};
pub use resolve::{resolve_base, resolve_longest_prefix, BaseImage, BaseStrategy};
pub use step::{format_step, instruction, normalize};

/// Ordered instructions, oldest first, starting with FROM
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dockerfile {
    instructions: Vec<String>,
}

impl Dockerfile {
    pub fn new(instructions: Vec<String>) -> Self {
        Self { instructions }
    }

    pub fn lines(&self) -> &[String] {
        &self.instructions
    }

    /// The FROM line
    pub fn from_line(&self) -> Option<&str> {
        self.instructions.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions joined verbatim with no separator
    pub fn concat(&self) -> String {
        self.instructions.concat()
    }

    /// One instruction per line, newline terminated
    pub fn render_lines(&self) -> String {
        self.instructions
            .iter()
            .map(|line| format!("{}\n", line))
            .collect()
    }
}

impl fmt::Display for Dockerfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_lines())
    }
}
