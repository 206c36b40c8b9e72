pub mod client;
pub mod images;
pub mod store;

pub use client::{DockerClient, API_VERSION, DEFAULT_TIMEOUT_SECS};
#[cfg(test)]
pub use store::MockImageStore;
pub use store::ImageStore;
