//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};
use tracing::warn;

use storefront_core::config::CorsConfig;

/// Builds the CORS layer. The credential header is always allowed, even when
/// the configured header list omits it.
pub fn build_cors_layer(config: &CorsConfig, credential_header: &str) -> CorsLayer {
    let wildcard = |values: &[String]| values.iter().any(|v| v == "*");

    let origins = if wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>("origin", &config.allowed_origins))
    };

    let headers = if wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        let mut names = parse_all::<HeaderName>("header", &config.allowed_headers);
        if let Ok(name) = credential_header.parse::<HeaderName>() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        AllowHeaders::list(names)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(parse_all::<Method>("method", &config.allowed_methods))
        .allow_headers(headers)
        .expose_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

/// Parses every entry, skipping (and logging) the ones that are not valid.
fn parse_all<T: std::str::FromStr>(what: &str, values: &[String]) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| match v.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!(kind = what, value = %v, "Ignoring invalid CORS entry");
                None
            }
        })
        .collect()
}
