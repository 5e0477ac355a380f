//! Response hardening headers
//!
//! Every response passing through [`SecurityHeadersMiddleware`] gets
//! `Content-Security-Policy`, `Strict-Transport-Security`,
//! `X-Frame-Options`, `X-Content-Type-Options` and `Referrer-Policy` taken
//! from [`SecurityHeadersConfig`]. Empty config values skip their header.

use std::future::{Ready, ready};

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderMap, HeaderName, HeaderValue},
};
use futures_util::future::LocalBoxFuture;

use crate::config::SecurityHeadersConfig;

#[derive(Clone)]
pub struct SecurityHeadersMiddleware {
    config: SecurityHeadersConfig,
}

impl SecurityHeadersMiddleware {
    pub fn new(config: SecurityHeadersConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeadersMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddlewareService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct SecurityHeadersMiddlewareService<S> {
    service: S,
    config: SecurityHeadersConfig,
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    if value.is_empty() {
        return;
    }

    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => {
            ::tracing::warn!(header = %name, "Skipping security header with invalid value");
        }
    }
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            if !config.enabled {
                return Ok(res);
            }

            let headers = res.headers_mut();
            let hsts = format!("max-age={}; includeSubDomains", config.hsts_max_age);

            insert(headers, header::CONTENT_SECURITY_POLICY, &config.csp);
            insert(headers, header::STRICT_TRANSPORT_SECURITY, &hsts);
            insert(headers, header::X_FRAME_OPTIONS, &config.x_frame_options);
            insert(
                headers,
                header::X_CONTENT_TYPE_OPTIONS,
                &config.x_content_type_options,
            );
            insert(headers, header::REFERRER_POLICY, &config.referrer_policy);

            Ok(res)
        })
    }
}
