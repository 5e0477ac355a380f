use actix_cors::Cors;

use crate::config::CorsConfig;

/// Builds the CORS middleware. When disabled, only same-origin requests pass.
pub fn cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(config.max_age);

    if config.origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    config
        .origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
