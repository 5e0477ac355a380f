use std::fmt;
use std::future::Future;
use std::pin::Pin;

use actix_web::FromRequest;
use actix_web::dev::Payload;
use serde::{Deserialize, Serialize};

use super::{BasicCredentials, CredentialsCache};
use crate::config::AuthConfig;
use crate::entities::v1::sea_orm_active_enums::Role;
use crate::entities::v1::users;
use crate::metrics;
use crate::prelude::*;
use crate::security::{PasswordHasher, Validator};

pub const ADMIN_KEY_HEADER: &str = "X-SECURITY-ADMIN-KEY";

/// Stored user resolved from Basic credentials
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<&users::Model> for Identity {
    fn from(user: &users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Authenticated caller of a request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    /// Presented the configured `X-SECURITY-ADMIN-KEY`
    Admin,
    User(Identity),
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin-key"),
            Self::User(identity) => write!(f, "{}#{}", identity.username, identity.id),
        }
    }
}

struct AuthContext {
    db: Data<DatabaseConnection>,
    config: Data<AuthConfig>,
    hasher: Data<PasswordHasher>,
    cache: Data<CredentialsCache>,
}

impl AuthContext {
    fn from_request(req: &HttpRequest) -> Result<Self, Error> {
        fn missing(name: &str) -> Error {
            Error::internal(format!("{} is not registered as app data", name))
        }

        Ok(Self {
            db: req
                .app_data::<Data<DatabaseConnection>>()
                .cloned()
                .ok_or_else(|| missing("DatabaseConnection"))?,
            config: req
                .app_data::<Data<AuthConfig>>()
                .cloned()
                .ok_or_else(|| missing("AuthConfig"))?,
            hasher: req
                .app_data::<Data<PasswordHasher>>()
                .cloned()
                .ok_or_else(|| missing("PasswordHasher"))?,
            cache: req
                .app_data::<Data<CredentialsCache>>()
                .cloned()
                .ok_or_else(|| missing("CredentialsCache"))?,
        })
    }
}

fn admin_key(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[::tracing::instrument(skip_all, fields(username = %credentials.username))]
async fn verify_basic(
    context: &AuthContext,
    credentials: BasicCredentials,
) -> Result<Identity, Error> {
    if let Some(identity) = context.cache.get(&credentials).await {
        metrics::record_auth_attempt("cache", true);
        return Ok(identity);
    }

    let invalid = || {
        metrics::record_auth_attempt("basic", false);
        Error::unauthorized("Invalid username or password")
    };

    let Some(user) = users::Model::find_by_username(context.db.get_ref(), &credentials.username).await?
    else {
        ::tracing::info!("Basic authentication for unknown username");
        return Err(invalid());
    };

    let hasher = context.hasher.clone();
    let password = credentials.password.clone();
    let hash = user.password.clone();
    let verified = web::block(move || hasher.verify(&password, &hash)).await??;

    if !verified {
        ::tracing::info!(user_id = user.id, "Basic authentication with wrong password");
        return Err(invalid());
    }

    let identity = Identity::from(&user);
    context.cache.set(&credentials, &identity).await;
    metrics::record_auth_attempt("basic", true);

    Ok(identity)
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let context = AuthContext::from_request(req);
        let admin_key = admin_key(req);
        let credentials = BasicCredentials::from_request(req);

        Box::pin(async move {
            let context = context?;

            if let Some(key) = admin_key {
                if Validator::constant_time_eq(key.as_bytes(), context.config.admin_token.as_bytes()) {
                    metrics::record_auth_attempt("admin_key", true);
                    return Ok(Principal::Admin);
                }

                metrics::record_auth_attempt("admin_key", false);
                ::tracing::warn!("Rejected invalid admin key, falling back to Basic credentials");
            }

            match credentials? {
                Some(credentials) => Ok(Principal::User(verify_basic(&context, credentials).await?)),
                None => Err(Error::unauthorized("Authentication required")),
            }
        })
    }
}

/// Caller authenticated as a stored user through Basic credentials
///
/// Basic credentials are checked before the admin key, so a request carrying
/// both resolves to the user.
#[derive(Clone, Debug)]
pub struct UserPrincipal(pub Identity);

impl FromRequest for UserPrincipal {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let context = AuthContext::from_request(req);
        let credentials = BasicCredentials::from_request(req);
        let principal = Principal::from_request(req, payload);

        Box::pin(async move {
            if let Some(credentials) = credentials? {
                let identity = verify_basic(&context?, credentials).await?;
                return Ok(UserPrincipal(identity));
            }

            match principal.await? {
                Principal::User(identity) => Ok(UserPrincipal(identity)),
                Principal::Admin => Err(Error::forbidden(
                    "The admin key cannot access user resources",
                )),
            }
        })
    }
}

/// Caller holding the admin key or a stored user with role `ADMIN`
#[derive(Clone, Debug)]
pub struct AdminPrincipal(pub Principal);

impl FromRequest for AdminPrincipal {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let principal = Principal::from_request(req, payload);

        Box::pin(async move {
            match principal.await? {
                Principal::User(identity) if identity.role != Role::Admin => {
                    ::tracing::info!(user_id = identity.id, "Non-admin caller rejected");
                    Err(Error::forbidden("Admin privileges required"))
                }
                principal => Ok(AdminPrincipal(principal)),
            }
        })
    }
}
