use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret expected in the `X-SECURITY-ADMIN-KEY` header
    #[serde(default = "default_admin_token")]
    pub admin_token: String,
    /// Lifetime of a verified Basic credential in the in-process cache, in seconds
    #[serde(default = "default_credentials_cache_ttl")]
    pub credentials_cache_ttl: u64,
    /// Argon2 configuration
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of threads)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
}

fn default_admin_token() -> String {
    "SUPER_SECRET_KEY_FROM_ADMIN".to_string()
}

fn default_credentials_cache_ttl() -> u64 {
    300 // 5 minutes
}

fn default_argon2_memory_cost() -> u32 {
    65536
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_token: default_admin_token(),
            credentials_cache_ttl: default_credentials_cache_ttl(),
            argon2: Argon2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_token.trim().is_empty() {
            return Err(ConfigError::ValidationError("auth.admin_token cannot be empty".to_string()));
        }
        self.argon2.validate()?;
        Ok(())
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.memory_cost must be > 0".to_string()));
        }
        if self.time_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.time_cost must be > 0".to_string()));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.parallelism must be > 0".to_string()));
        }
        if self.hash_length < 16 {
            return Err(ConfigError::ValidationError("auth.argon2.hash_length must be >= 16".to_string()));
        }
        Ok(())
    }
}
