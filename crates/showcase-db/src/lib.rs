//! Showcase persistence layer
//!
//! Image records live in Postgres. Callers depend on the `ImageRepository`
//! trait so the HTTP layer can be exercised against in-memory fakes.

pub mod db;

pub use db::{ImageRepository, PgImageRepository};
