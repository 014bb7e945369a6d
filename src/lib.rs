//! rosterdb - A small, file-backed character roster served over HTTP

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
