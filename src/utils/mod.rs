//! Filesystem helpers used before the engine is contacted

pub mod paths;
pub mod socket;

pub use paths::validate_output_path;
pub use socket::{candidate_sockets, discover_socket, SocketSource};
