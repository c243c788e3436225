//! VideoHub: a catalog service for instructional videos.
//!
//! A JSON HTTP API over a SQLite store, plus the static browser frontend it
//! serves. The server and seed binaries are thin wrappers over this library,
//! which also lets integration tests build the router directly against an
//! in-memory store.

pub mod config;
pub mod errors;
pub mod models;
pub mod response;
pub mod routes;
pub mod store;

pub use config::Config;
pub use routes::build_router;
pub use store::VideoStore;
