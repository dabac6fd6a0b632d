//! JSON error envelope and the Actix glue that renders [`ServiceError`].

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error, web};
use chrono::{NaiveDateTime, Utc};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::middleware::RequestContext;
use crate::services::errors::ServiceError;

/// Body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: NaiveDateTime,
    pub status: u16,
    pub error: String,
    pub error_code: String,
    pub message: String,
    pub path: String,
    pub correlation_id: Option<Uuid>,
}

impl ErrorResponse {
    pub fn new(err: &ServiceError, context: Option<RequestContext>) -> Self {
        let (path, correlation_id) = match context {
            Some(ctx) => (ctx.path, Some(ctx.correlation_id)),
            None => (String::new(), None),
        };

        Self {
            timestamp: Utc::now().naive_utc(),
            status: err.status(),
            error: err.kind().label().to_string(),
            error_code: err.code().as_str().to_string(),
            message: err.public_message(),
            path,
            correlation_id,
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse::new(self, RequestContext::current());

        if body.status >= 500 {
            error!("{} {} on {}: {self}", body.status, body.error_code, body.path);
        } else {
            warn!("{} {} on {}: {self}", body.status, body.error_code, body.path);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}

pub const MALFORMED_BODY_MESSAGE: &str = "cuerpo de la solicitud inválido";
pub const MALFORMED_ID_MESSAGE: &str = "debe ser un número entero";
pub const MALFORMED_QUERY_MESSAGE: &str = "parámetros inválidos";

pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Malformed body on {}: {err}", req.path());
    ServiceError::validation("body", MALFORMED_BODY_MESSAGE).into()
}

pub fn path_error_handler(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    warn!("Malformed path on {}: {err}", req.path());
    ServiceError::validation("id", MALFORMED_ID_MESSAGE).into()
}

pub fn query_error_handler(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Malformed query on {}: {err}", req.path());
    ServiceError::validation("query", MALFORMED_QUERY_MESSAGE).into()
}

/// Extractor configuration answering malformed input with `VALIDATION_001`.
pub fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}

/// Fallback for routes nothing else matched.
pub async fn not_found() -> Result<HttpResponse, ServiceError> {
    Err(ServiceError::route_not_found())
}
