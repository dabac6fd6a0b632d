//! Closed error taxonomy surfaced by the clientes service.
//!
//! Every failure a caller can observe is one of the [`ServiceError`] variants,
//! each carrying a fixed [`ErrorKind`] (status + category) and a machine
//! readable [`ErrorCode`].

use std::fmt::{Display, Formatter};

use log::error;
use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Fixed message returned for storage failures.
pub const DATABASE_ERROR_MESSAGE: &str = "Error de base de datos";
/// Fixed message returned for unanticipated failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Machine readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    CuitAlreadyExists,
    EmailAlreadyExists,
    ClienteNotFound,
    RouteNotFound,
    Validation,
    Database,
    Generic,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::CuitAlreadyExists => "CLIENT_001",
            ErrorCode::EmailAlreadyExists => "CLIENT_002",
            ErrorCode::ClienteNotFound => "CLIENT_404",
            ErrorCode::RouteNotFound => "ROUTE_404",
            ErrorCode::Validation => "VALIDATION_001",
            ErrorCode::Database => "DATABASE_500",
            ErrorCode::Generic => "GENERIC_500",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error families, each with a fixed HTTP-style status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Validation,
    Database,
    Unhandled,
}

impl ErrorKind {
    pub const fn status(self) -> u16 {
        match self {
            ErrorKind::BadRequest | ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Database | ErrorKind::Unhandled => 500,
        }
    }

    /// Category label rendered in the `error` field of the envelope.
    pub const fn label(self) -> &'static str {
        match self {
            ErrorKind::BadRequest | ErrorKind::NotFound => "BusinessError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Database => "DatabaseError",
            ErrorKind::Unhandled => "InternalServerError",
        }
    }
}

/// One failed rule on one request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the field (`firstName`, `cuit`, ...).
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found on a request, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure(pub Vec<FieldViolation>);

impl ValidationFailure {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldViolation::new(field, message)])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    BadRequest { code: ErrorCode, message: String },

    #[error("{message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("{0}")]
    Validation(ValidationFailure),

    /// Storage failure; the detail is logged, never returned.
    #[error("database error: {0}")]
    Database(String),

    /// Anything else; the detail is logged, never returned.
    #[error("unexpected error: {0}")]
    Unhandled(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn cuit_already_exists() -> Self {
        ServiceError::BadRequest {
            code: ErrorCode::CuitAlreadyExists,
            message: "CUIT already exists".to_string(),
        }
    }

    pub fn email_already_exists() -> Self {
        ServiceError::BadRequest {
            code: ErrorCode::EmailAlreadyExists,
            message: "Email already exists".to_string(),
        }
    }

    pub fn cliente_not_found() -> Self {
        ServiceError::NotFound {
            code: ErrorCode::ClienteNotFound,
            message: "Cliente no encontrado".to_string(),
        }
    }

    pub fn route_not_found() -> Self {
        ServiceError::NotFound {
            code: ErrorCode::RouteNotFound,
            message: "Recurso no encontrado".to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation(ValidationFailure::single(field, message))
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::BadRequest { .. } => ErrorKind::BadRequest,
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Database(_) => ErrorKind::Database,
            ServiceError::Unhandled(_) => ErrorKind::Unhandled,
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            ServiceError::BadRequest { code, .. } | ServiceError::NotFound { code, .. } => *code,
            ServiceError::Validation(_) => ErrorCode::Validation,
            ServiceError::Database(_) => ErrorCode::Database,
            ServiceError::Unhandled(_) => ErrorCode::Generic,
        }
    }

    pub const fn status(&self) -> u16 {
        self.kind().status()
    }

    /// Message safe to hand back to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Database(_) => DATABASE_ERROR_MESSAGE.to_string(),
            ServiceError::Unhandled(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::cliente_not_found(),
            RepositoryError::UniqueViolation(column) if column == "cuit" => {
                ServiceError::cuit_already_exists()
            }
            RepositoryError::UniqueViolation(column) if column == "email" => {
                ServiceError::email_already_exists()
            }
            other => {
                error!("Repository failure: {other}");
                ServiceError::Database(other.to_string())
            }
        }
    }
}
