//! Base URL used when building links to locally stored videos

use axum::http::HeaderMap;
use curio_core::Config;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        // Proxies may append a list; the first entry is the client-facing one
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// The configured `BASE_URL`, or one derived from the forwarding and host headers
pub fn request_base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(base_url) = config.base_url() {
        return base_url.trim_end_matches('/').to_string();
    }

    let scheme = header(headers, "x-forwarded-proto").unwrap_or("http");
    let host = header(headers, "x-forwarded-host")
        .or_else(|| header(headers, "host"))
        .map(String::from)
        .unwrap_or_else(|| format!("localhost:{}", config.server_port()));

    format!("{}://{}", scheme, host)
}
