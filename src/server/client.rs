//! Anonymous client information derived from the request.

use crate::db::models::RequestMeta;
use actix_web::HttpRequest;
use actix_web::http::header;
use sha2::{Digest, Sha256};

const DEFAULT_PEPPER: &str = "dev-pepper";
const HASH_PREFIX_LEN: usize = 12;

fn header_str(req: &HttpRequest, name: header::HeaderName) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Best-effort client address: first `X-Forwarded-For` hop, else the peer.
pub fn client_ip(req: &HttpRequest) -> String {
    let xff = header_str(req, header::HeaderName::from_static("x-forwarded-for"));
    if let Some(first) = xff.split(',').map(str::trim).find(|s| !s.is_empty()) {
        return first.to_string();
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}

/// Short peppered SHA-256 of the address (first 12 hex chars).
pub fn hash_ip(ip: &str, pepper: &str) -> String {
    let ip = ip.trim();
    if ip.is_empty() {
        return String::new();
    }
    let pepper = if pepper.trim().is_empty() {
        DEFAULT_PEPPER
    } else {
        pepper
    };
    let digest = Sha256::digest(format!("{ip}|{pepper}").as_bytes());
    let hex = format!("{digest:x}");
    hex[..HASH_PREFIX_LEN].to_string()
}

pub fn request_meta(req: &HttpRequest, pepper: &str) -> RequestMeta {
    RequestMeta {
        ip_hash: hash_ip(&client_ip(req), pepper),
        user_agent: header_str(req, header::USER_AGENT),
        accept_language: header_str(req, header::ACCEPT_LANGUAGE),
        referer: header_str(req, header::REFERER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn forwarded_for_wins_over_peer() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", " 9.9.9.9 , 10.0.0.1"))
            .peer_addr("127.0.0.1:5555".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req), "9.9.9.9");
    }

    #[test]
    fn peer_address_is_used_without_proxy_header() {
        let req = TestRequest::default()
            .peer_addr("192.168.1.7:40000".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req), "192.168.1.7");
    }

    #[test]
    fn ip_hash_is_short_and_peppered() {
        let a = hash_ip("1.2.3.4", "");
        let b = hash_ip("1.2.3.4", "dev-pepper");
        let c = hash_ip("1.2.3.4", "other");
        assert_eq!(a.len(), 12);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
        assert_eq!(hash_ip("  ", "x"), "");
    }
}
