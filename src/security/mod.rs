pub mod cors;
pub mod headers;
pub mod password;
pub mod validation;

pub use cors::cors;
pub use headers::SecurityHeadersMiddleware;
pub use password::PasswordHasher;
pub use validation::Validator;
