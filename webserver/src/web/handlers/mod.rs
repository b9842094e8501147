//! Request handlers

pub mod api;

pub use api::{health, query_ais, root};
