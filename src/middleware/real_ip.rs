use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

/// Best-known address of the client, for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientIp(pub String);

pub async fn real_ip(mut req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let ip = extract_client_ip(req.headers())
        .or(peer)
        .unwrap_or_else(|| "unknown".to_string());

    req.extensions_mut().insert(ClientIp(ip));
    next.run(req).await
}

fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    // X-Forwarded-For can carry a chain; the first hop is the client
    if let Some(forwarded_for) = headers.get("x-forwarded-for")
        && let Ok(forwarded_str) = forwarded_for.to_str()
        && let Some(first_ip) = forwarded_str.split(',').next()
    {
        let ip = first_ip.trim();
        if !ip.is_empty() && ip != "unknown" {
            return Some(ip.to_string());
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}
