pub mod credentials;
pub mod principal;

pub use credentials::{BasicCredentials, CredentialsCache};
pub use principal::{ADMIN_KEY_HEADER, AdminPrincipal, Identity, Principal, UserPrincipal};
