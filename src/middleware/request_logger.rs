//! Per-request tracing: one event when a request arrives and one when it is answered.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::auth::ActingUser;

/// Wrap the app with `.wrap(RequestLogger)`.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let user = ActingUser::from_headers(req.request())
            .into_inner()
            .unwrap_or_else(|| "anonymous".to_string());

        info!(target: "api", %method, %path, %user, "Request received");

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let status = res.status().as_u16();
            let duration_ms = start.elapsed().as_millis() as u64;

            match status {
                500.. => error!(target: "api", %method, %path, %user, status, duration_ms, "Request failed"),
                400..=499 => warn!(target: "api", %method, %path, %user, status, duration_ms, "Request rejected"),
                _ => info!(target: "api", %method, %path, status, duration_ms, "Request answered"),
            }

            Ok(res)
        })
    }
}
