use actix_web::error::{JsonPayloadError, PathError};
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::api::Definition;
use crate::controllers;
use crate::prelude::*;

fn json_error(error: JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    ::tracing::debug!(error = %error, "Rejected request body");

    Error::bad_request(format!("Invalid request body: {}", error)).into()
}

fn path_error(error: PathError, _: &HttpRequest) -> actix_web::Error {
    ::tracing::debug!(error = %error, "Rejected path parameter");

    Error::bad_request(format!("Invalid path parameter: {}", error)).into()
}

/// Registers every API endpoint. Paths carry no trailing slash; the app is
/// expected to be wrapped in `NormalizePath::trim()`.
pub fn route(app: &mut ServiceConfig) {
    app.app_data(web::JsonConfig::default().error_handler(json_error));
    app.app_data(web::PathConfig::default().error_handler(path_error));
    // User
    app.service(controllers::v1::user::store);
    app.service(controllers::v1::user::list);
    app.service(controllers::v1::user::me);
    // Account
    app.service(controllers::v1::account::show);
    app.service(controllers::v1::account::deposit);
    app.service(controllers::v1::account::withdraw);
    // Transfer
    app.service(controllers::v1::transfer::transfer);
    // Health
    app.service(controllers::health::health);
    app.service(controllers::health::health_db);
    // Metrics
    app.service(controllers::metrics::metrics);
}

/// Swagger UI under `path` plus the OpenAPI document at `/api.json`
pub fn docs(path: &str) -> impl FnOnce(&mut ServiceConfig) + use<> {
    let path = path.trim_end_matches('/').to_string();

    move |app: &mut ServiceConfig| {
        // the trailing slash of `{path}/` is trimmed away, so point at the page itself
        app.service(web::redirect(path.clone(), format!("{}/index.html", path)));
        app.service(SwaggerUi::new(format!("{}/{{_:.*}}", path)).urls(vec![(
            Url::new("simple-banking", "/api.json"),
            Definition::openapi(),
        )]));
    }
}
