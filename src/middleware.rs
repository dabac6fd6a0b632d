//! Request-scoped correlation context.
//!
//! Every request receives a UUID correlation id stored, together with the
//! request path, in task-local storage. Log lines and error envelopes read it
//! from there. Task-locals are not inherited by spawned tasks; wrap such work
//! in [`RequestContext::scope`].

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, ResponseError};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use log::error;
use tokio::task_local;
use uuid::Uuid;

use crate::services::errors::ServiceError;

/// Response header echoing the request's correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub correlation_id: Uuid,
    pub path: String,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            path: path.into(),
        }
    }

    /// Context of the request currently being served, if any.
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    pub fn current_correlation_id() -> Option<Uuid> {
        REQUEST_CONTEXT.try_with(|ctx| ctx.correlation_id).ok()
    }

    /// Runs `fut` with `context` in scope. The context is dropped when the
    /// future completes, whether it succeeded or failed.
    pub async fn scope<Fut>(context: RequestContext, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(context, fut).await
    }
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|msg| (*msg).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string())
}

/// Middleware assigning a correlation id to each request and echoing it in
/// the `X-Correlation-Id` response header.
///
/// A panic raised while serving the request is answered as an unhandled
/// error envelope instead of tearing down the connection.
#[derive(Clone, Default)]
pub struct CorrelationId;

impl<S, B> Transform<S, ServiceRequest> for CorrelationId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelationIdMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationIdMiddleware { service }))
    }
}

pub struct CorrelationIdMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelationIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let context = RequestContext::new(req.path());
        let correlation_id = context.correlation_id;
        let http_req = req.request().clone();

        // The downstream call must be created inside the scope so extractor
        // errors raised while building it see the context too.
        let fut = REQUEST_CONTEXT.sync_scope(context.clone(), || self.service.call(req));

        Box::pin(RequestContext::scope(context, async move {
            let mut res = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(res) => res?.map_into_left_body(),
                Err(payload) => {
                    let err = ServiceError::Unhandled(panic_detail(payload.as_ref()));
                    ServiceResponse::new(http_req, err.error_response()).map_into_right_body()
                }
            };
            match HeaderValue::from_str(&correlation_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
                }
                Err(err) => {
                    error!("Failed to encode correlation id header: {err}");
                }
            }
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};

    use super::*;

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = RequestContext::new("/api/clientes");
        let observed =
            RequestContext::scope(expected.clone(), async { RequestContext::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(RequestContext::current().is_none());
        assert!(RequestContext::current_correlation_id().is_none());
    }

    #[tokio::test]
    async fn context_is_cleared_after_a_failed_request() {
        let ctx = RequestContext::new("/boom");
        let result: Result<(), &str> = RequestContext::scope(ctx, async { Err("boom") }).await;
        assert!(result.is_err());
        assert!(RequestContext::current().is_none());
    }

    #[actix_web::test]
    async fn handler_sees_the_echoed_id() {
        let app = test::init_service(App::new().wrap(CorrelationId).route(
            "/ping",
            web::get().to(|| async {
                let body = RequestContext::current()
                    .map(|c| format!("{} {}", c.correlation_id, c.path))
                    .unwrap_or_default();
                HttpResponse::Ok().body(body)
            }),
        ))
        .await;

        let req = test::TestRequest::get().uri("/ping").to_request();
        let res = test::call_service(&app, req).await;
        let header = res
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("correlation header")
            .to_str()
            .expect("ascii header")
            .to_owned();
        let body = test::read_body(res).await;

        assert_eq!(std::str::from_utf8(&body).unwrap(), format!("{header} /ping"));
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[::core::prelude::v1::test]
    fn panic_detail_reads_string_payloads() {
        assert_eq!(panic_detail(&"index out of bounds"), "index out of bounds");
        assert_eq!(panic_detail(&String::from("owned")), "owned");
        assert_eq!(panic_detail(&42_u8), "handler panicked");
    }
}
