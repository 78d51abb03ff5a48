//! HTTP access to the remote ocean grid and ranking services.

pub mod http_client;
pub mod reef_api;
pub mod wire;
