//! Request ID middleware.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Attach it as `x-request-id` before any handler runs
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - An ID supplied by the client is preserved, not overwritten

use std::task::{Context, Poll};

use axum::http::{HeaderName, HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer that attaches a request ID to incoming requests.
#[derive(Debug, Clone, Copy)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service wrapper that injects `x-request-id` when absent.
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if !req.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            // UUIDs are always valid header values
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::util::service_fn;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_injects_request_id() {
        let svc = RequestIdLayer.layer(service_fn(|req: Request<Body>| async move {
            Ok::<_, std::convert::Infallible>(
                req.headers().get(X_REQUEST_ID).cloned(),
            )
        }));

        let req = Request::builder().body(Body::empty()).unwrap();
        let id = svc.oneshot(req).await.unwrap();
        assert!(id.is_some());
        // Well-formed UUID v4
        let id = id.unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_preserves_existing_request_id() {
        let svc = RequestIdLayer.layer(service_fn(|req: Request<Body>| async move {
            Ok::<_, std::convert::Infallible>(
                req.headers().get(X_REQUEST_ID).cloned(),
            )
        }));

        let req = Request::builder()
            .header(X_REQUEST_ID, "client-supplied")
            .body(Body::empty())
            .unwrap();
        let id = svc.oneshot(req).await.unwrap();
        assert_eq!(id.unwrap(), "client-supplied");
    }
}
