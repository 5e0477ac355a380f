use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::Identity;
use crate::cache::{Cache, CacheKey, LocalCache};
use crate::prelude::*;

/// Username and password decoded from `Authorization: Basic ...`
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// `Ok(None)` when the request carries no `Authorization` header.
    pub fn from_request(req: &HttpRequest) -> Result<Option<Self>, Error> {
        let Some(value) = req.headers().get(header::AUTHORIZATION) else {
            return Ok(None);
        };

        let value = value
            .to_str()
            .map_err(|_| Error::unauthorized("Invalid authorization header"))?;

        Self::parse(value).map(Some)
    }

    pub fn parse(value: &str) -> Result<Self, Error> {
        let invalid = || Error::unauthorized("Invalid authorization header");

        let (scheme, encoded) = value.trim().split_once(' ').ok_or_else(invalid)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(invalid());
        }

        let decoded = STANDARD.decode(encoded.trim()).map_err(|_| invalid())?;
        let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;
        let (username, password) = decoded.split_once(':').ok_or_else(invalid)?;

        if username.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Recently verified credentials, so repeat requests skip Argon2
#[derive(Clone, Debug)]
pub struct CredentialsCache {
    cache: Arc<LocalCache>,
    ttl: Duration,
}

impl CredentialsCache {
    pub fn new(cache: Arc<LocalCache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    #[::tracing::instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn get(&self, credentials: &BasicCredentials) -> Option<Identity> {
        let key = CacheKey::credentials(&credentials.username, &credentials.password);

        match self.cache.get::<Identity>(&key).await {
            Ok(Some(identity)) => {
                ::tracing::debug!("Credentials cache hit");
                Some(identity)
            }
            Ok(None) => {
                ::tracing::debug!("Credentials cache miss");
                None
            }
            Err(e) => {
                ::tracing::error!(error = %e, "Failed to read credentials cache");
                None
            }
        }
    }

    #[::tracing::instrument(skip(self, credentials, identity), fields(user_id = identity.id))]
    pub async fn set(&self, credentials: &BasicCredentials, identity: &Identity) {
        let key = CacheKey::credentials(&credentials.username, &credentials.password);

        if let Err(e) = self.cache.set(&key, identity, self.ttl).await {
            ::tracing::error!(error = %e, "Failed to write credentials cache");
        }
    }
}
