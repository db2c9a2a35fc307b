use std::net::IpAddr;

use axum::http::HeaderMap;

/// Address the backend should attribute a like or share to. A proxy in
/// front of the site wins over the socket peer.
pub fn visitor_address(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<String> {
    forwarded_for(headers)
        .or_else(|| header_value(headers, "x-real-ip"))
        .or_else(|| peer.map(|ip| ip.to_string()))
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-forwarded-for")?
        .split(',')
        .map(str::trim)
        .find(|hop| !hop.is_empty())
        .map(str::to_string)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
