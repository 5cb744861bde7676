//! Showcase API library
//!
//! HTTP surface of the image showcase: batch uploads, the curated listing and
//! deletes. The binary in `main.rs` wires it up; integration tests build the
//! router directly from `setup::routes` with fake backends.

pub mod api_doc;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod responses;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;
