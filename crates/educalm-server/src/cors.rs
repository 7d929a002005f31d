use std::str::FromStr;

use educalm_config::{AllowList, CorsConfig};
use http::{HeaderValue, Method, header::HeaderName};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Entries that fail to parse are skipped.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = match &config.origins {
        AllowList::Any => AllowOrigin::any(),
        AllowList::Only(values) => AllowOrigin::list(parse_all::<HeaderValue>(values)),
    };

    let methods = match &config.methods {
        AllowList::Any => AllowMethods::any(),
        AllowList::Only(values) => AllowMethods::list(parse_all::<Method>(values)),
    };

    let headers = match &config.headers {
        AllowList::Any => AllowHeaders::any(),
        AllowList::Only(values) => AllowHeaders::list(parse_all::<HeaderName>(values)),
    };

    let layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers);

    match config.max_age_duration() {
        Some(max_age) => layer.max_age(max_age),
        None => layer,
    }
}

fn parse_all<T: FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|value| value.parse().ok()).collect()
}
