//! dfimage - reconstruct a Dockerfile from a local image
//!
//! Reads an image's layer list and creation history through the Docker API,
//! infers its base image from the other images in the local store and
//! rebuilds the instructions added on top of it.

pub mod app;
pub mod config;
pub mod core;
pub mod docker;
pub mod dockerfile;
pub mod output;
pub mod utils;

pub use app::{Inspector, Reconstruction};
pub use dockerfile::Dockerfile;
