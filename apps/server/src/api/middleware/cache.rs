//! Response cache middleware for the read-only catalog routes

use crate::cache::ResponseCache;
use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Header reporting whether a response came from the cache.
pub const X_CACHE: &str = "x-cache";

/// Serve cached GET responses and store fresh 200 responses.
///
/// Only the status, content type and body are replayed. Non-GET requests and
/// non-200 responses pass straight through. Bodies larger than the cache's
/// body limit, or of unknown length, are served uncached.
pub async fn cache_middleware(
    State(cache): State<Arc<ResponseCache>>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = ResponseCache::key(req.method().as_str(), req.uri().path(), req.uri().query());
    if let Some(cached) = cache.get(&key) {
        tracing::debug!(key = %key, "Response cache hit");
        let mut response = (cached.status, Body::from(cached.body)).into_response();
        if let Some(content_type) = cached.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        response
            .headers_mut()
            .insert(X_CACHE, HeaderValue::from_static("hit"));
        return response;
    }

    let mut response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let cacheable_len = response
        .body()
        .size_hint()
        .upper()
        .filter(|len| *len <= cache.max_body_bytes() as u64);
    if cacheable_len.is_none() {
        tracing::debug!(key = %key, "Response body too large to cache");
        response
            .headers_mut()
            .insert(X_CACHE, HeaderValue::from_static("miss"));
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Failed to read response body");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to read response body")
                .into_response();
        }
    };

    cache.put(
        key,
        parts.status,
        parts.headers.get(header::CONTENT_TYPE).cloned(),
        bytes.clone(),
    );
    parts
        .headers
        .insert(X_CACHE, HeaderValue::from_static("miss"));
    Response::from_parts(parts, Body::from(bytes))
}
