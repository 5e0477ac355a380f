//! Helpers shared by unit and integration tests

pub mod setup;

/// Builds the full application against a fresh in-memory database
///
/// Evaluates to `(service, state)`, where `state.db` is the database the
/// service talks to.
#[macro_export]
macro_rules! service {
    () => {{
        let state = $crate::testing::setup::state().await;
        let app = ::actix_web::App::new()
            .wrap(::actix_web::middleware::NormalizePath::trim())
            .wrap($crate::security::SecurityHeadersMiddleware::new(
                $crate::config::SecurityHeadersConfig::default(),
            ))
            .configure(|app| state.configure(app))
            .configure($crate::router::route)
            .configure($crate::router::docs("/docs"));

        (::actix_web::test::init_service(app).await, state)
    }};
}
