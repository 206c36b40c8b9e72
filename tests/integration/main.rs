//! Integration tests against a live Docker daemon
//!
//! These tests require Docker to be running.
//! Use `cargo test --test integration -- --ignored` to run them.

mod docker_client;
mod reconstruct;
