//! HTTP surface of the gateway

pub mod handlers;
