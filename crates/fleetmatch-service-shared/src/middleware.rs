//! Request tracking middleware.
//!
//! [`MetricsLayer`] gives every request a correlation id and records HTTP
//! metrics when the response is produced:
//!
//! - `http_requests_total`: counter by method, path and status bucket
//! - `http_request_duration_seconds`: histogram by method and path
//! - `http_request_size_bytes` / `http_response_size_bytes`: from `Content-Length`
//!
//! The id comes from the incoming `X-Request-ID` header or is generated as a
//! UUID v7. It is written back onto the request so handlers read the same
//! value, and echoed on the response.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::{Duration, Instant};

use axum::http::{HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id for one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.0).ok()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Read `X-Request-ID`, generating a UUID v7 when it is absent or blank.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(axum::http::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Metric labels captured before the request is handed to the inner service.
#[derive(Debug, Clone)]
struct RequestLabels {
    method: String,
    /// URI path without the query string.
    path: String,
}

impl RequestLabels {
    fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
        }
    }

    fn record_size(&self, name: &'static str, headers: &HeaderMap) {
        if let Some(size) = content_length(headers) {
            metrics::histogram!(name, "method" => self.method.clone(), "path" => self.path.clone())
                .record(size);
        }
    }

    fn record_completion(&self, status: &'static str, elapsed: Duration) {
        metrics::counter!(
            "http_requests_total",
            "method" => self.method.clone(),
            "path" => self.path.clone(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => self.method.clone(),
            "path" => self.path.clone()
        )
        .record(elapsed.as_secs_f64());
    }
}

/// Tower layer adding request ids and HTTP metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let labels = RequestLabels::from_request(&req);
        labels.record_size("http_request_size_bytes", req.headers());

        let request_id = extract_or_generate_request_id(req.headers());
        if let Some(value) = request_id.header_value() {
            req.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %labels.method,
            path = %labels.path,
        );
        span.in_scope(|| tracing::debug!("request received"));

        MetricsFuture {
            inner: self.inner.call(req),
            start: Instant::now(),
            labels,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Records metrics and tags the response once the inner future resolves.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        labels: RequestLabels,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let result = ready!(this.inner.poll(cx));
        let elapsed = this.start.elapsed();
        let latency_ms = elapsed.as_secs_f64() * 1000.0;

        match result {
            Ok(mut response) => {
                let status = response.status().as_u16();
                this.labels.record_completion(status_bucket(status), elapsed);
                this.labels
                    .record_size("http_response_size_bytes", response.headers());
                if let Some(value) = this.request_id.header_value() {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                tracing::info!(status, latency_ms, "request completed");
                Poll::Ready(Ok(response))
            }
            Err(e) => {
                this.labels.record_completion("5xx", elapsed);
                tracing::error!(latency_ms, "request failed");
                Poll::Ready(Err(e))
            }
        }
    }
}
