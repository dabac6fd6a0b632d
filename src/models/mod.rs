//! Database models shared across the clientes repository.

pub mod cliente;
#[cfg(feature = "server")]
pub mod config;
