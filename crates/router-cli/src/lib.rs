//! Request source and transport: reads a query from stdin/env/HTTP and
//! emits the assembled context block or wire-shape JSON.

pub mod cli;
pub mod commands;
pub mod env;
#[cfg(feature = "http-transport")]
pub mod http_transport;
