pub mod clientes;
pub mod errors;

pub use errors::{ServiceError, ServiceResult};
