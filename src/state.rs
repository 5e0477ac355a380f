use std::sync::Arc;
use std::time::Duration;

use crate::cache::LocalCache;
use crate::config::AuthConfig;
use crate::metrics::AppMetrics;
use crate::middlewares::v1::auth::CredentialsCache;
use crate::prelude::*;
use crate::security::PasswordHasher;

/// Shared handles every worker registers as app data
#[derive(Clone)]
pub struct AppState {
    pub db: Data<DatabaseConnection>,
    pub auth: Data<AuthConfig>,
    pub hasher: Data<PasswordHasher>,
    pub credentials: Data<CredentialsCache>,
    pub metrics: Data<AppMetrics>,
}

impl AppState {
    /// Must be called inside a tokio runtime, the credential cache spawns
    /// its sweeper task.
    pub fn new(
        db: DatabaseConnection,
        auth: AuthConfig,
        hasher: PasswordHasher,
        metrics: AppMetrics,
    ) -> Self {
        let credentials = CredentialsCache::new(
            Arc::new(LocalCache::new()),
            Duration::from_secs(auth.credentials_cache_ttl),
        );

        Self {
            db: Data::new(db),
            auth: Data::new(auth),
            hasher: Data::new(hasher),
            credentials: Data::new(credentials),
            metrics: Data::new(metrics),
        }
    }

    pub fn configure(&self, app: &mut ServiceConfig) {
        app.app_data(self.db.clone());
        app.app_data(self.auth.clone());
        app.app_data(self.hasher.clone());
        app.app_data(self.credentials.clone());
        app.app_data(self.metrics.clone());
    }
}
