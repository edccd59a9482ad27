//! Request-scoped middleware: request ids, client address resolution, CORS

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request},
    http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// How long browsers may cache a preflight answer
const CORS_MAX_AGE: Duration = Duration::from_secs(300);

/// Request id generator backed by UUIDv4
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id: HeaderValue = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Client address resolved from proxy headers, with the socket peer as fallback
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

/// Resolve the client address and store it as a request extension.
///
/// Runs before the access-log layer so the span can pick it up.
pub async fn resolve_client_ip(mut request: Request, next: Next) -> Response {
    let direct = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let ip = client_ip(request.headers(), direct);
    request.extensions_mut().insert(ClientIp(ip));
    next.run(request).await
}

/// `x-forwarded-for` holds "client, proxy1, proxy2"; the first entry wins.
/// `x-real-ip` is checked next, then the peer address of the connection.
fn client_ip(headers: &HeaderMap, direct: Option<IpAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        if let Ok(ip) = first.parse::<IpAddr>() {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = real_ip.trim().parse::<IpAddr>() {
            return ip.to_string();
        }
    }

    match direct {
        Some(ip) => ip.to_string(),
        None => "unknown".to_string(),
    }
}

/// CORS policy: local loopback origins only, fixed method and header lists,
/// credentials allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().map(is_loopback_origin).unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

/// `http://localhost` and `http://127.0.0.1` on any port
fn is_loopback_origin(origin: &str) -> bool {
    for host in ["http://localhost", "http://127.0.0.1"] {
        if let Some(rest) = origin.strip_prefix(host) {
            return rest.is_empty() || rest.starts_with(':');
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn forwarded_for_takes_the_first_entry() {
        let headers = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2")]);

        assert_eq!(client_ip(&headers, None), "203.0.113.7");
    }

    #[test]
    fn real_ip_is_used_when_forwarded_for_is_absent() {
        let headers = headers(&[("x-real-ip", "198.51.100.4")]);

        assert_eq!(client_ip(&headers, None), "198.51.100.4");
    }

    #[test]
    fn malformed_forwarded_for_falls_through() {
        let headers = headers(&[("x-forwarded-for", "not-an-ip"), ("x-real-ip", "198.51.100.4")]);

        assert_eq!(client_ip(&headers, None), "198.51.100.4");
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let direct: IpAddr = "192.0.2.1".parse().unwrap();

        assert_eq!(client_ip(&HeaderMap::new(), Some(direct)), "192.0.2.1");
        assert_eq!(client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn loopback_origins_are_allowed_on_any_port() {
        assert!(is_loopback_origin("http://localhost:5173"));
        assert!(is_loopback_origin("http://localhost"));
        assert!(is_loopback_origin("http://127.0.0.1:8080"));
        assert!(!is_loopback_origin("http://localhost.evil.com"));
        assert!(!is_loopback_origin("https://localhost:5173"));
        assert!(!is_loopback_origin("http://example.com"));
    }
}
