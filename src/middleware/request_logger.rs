use std::rc::Rc;
use std::time::Instant;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::{ok, LocalBoxFuture, Ready};
use log::{debug, warn};
use uuid::Uuid;

const REQUEST_ID: &str = "x-request-id";

/// Logs each request's method, path, status and latency at debug level, and
/// tags every response with a fresh `X-Request-ID`.
///
/// Server errors are logged at warn level regardless of `verbose`.
pub struct RequestLogger {
    verbose: bool,
}

impl RequestLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequestLoggerMiddleware {
            service: Rc::new(service),
            verbose: self.verbose,
        })
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: Rc<S>,
    verbose: bool,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let verbose = self.verbose;
        let method = req.method().clone();
        let path = req.path().to_owned();
        let request_id = Uuid::new_v4().to_string();

        if verbose {
            debug!("[{}] Processing request: {} {}", request_id, method, path);
        }

        Box::pin(async move {
            let started = Instant::now();
            let mut res = service.call(req).await?;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            let status = res.status();

            if status.is_server_error() {
                warn!(
                    "[{}] {} {} failed with {} after {:.2}ms",
                    request_id, method, path, status, elapsed_ms
                );
            } else if verbose {
                debug!(
                    "[{}] Response: {} {} - {} in {:.2}ms",
                    request_id, method, path, status, elapsed_ms
                );
            }

            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID), value);
            }
            Ok(res)
        })
    }
}
