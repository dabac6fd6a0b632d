//! Domain aggregates exposed by the clientes service layer.

pub mod cliente;
pub mod types;
