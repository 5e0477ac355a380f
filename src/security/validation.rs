use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 32;
pub const PASSWORD_MAX_LENGTH: usize = 128;

pub struct Validator;

impl Validator {
    /// Usernames are 3 to 32 characters of `[A-Za-z0-9_-]`.
    ///
    /// ```
    /// use simple_banking::security::Validator;
    ///
    /// assert!(Validator::validate_username("john_doe"));
    /// assert!(!Validator::validate_username("ab"));
    /// assert!(!Validator::validate_username("user@name"));
    /// ```
    pub fn validate_username(username: &str) -> bool {
        if username.len() < USERNAME_MIN_LENGTH || username.len() > USERNAME_MAX_LENGTH {
            return false;
        }

        USERNAME_REGEX.is_match(username)
    }

    /// Passwords only need to be present and bounded, Argon2 handles the rest.
    pub fn validate_password(password: &str) -> Result<(), &'static str> {
        if password.is_empty() {
            return Err("Password is required");
        }

        if password.len() > PASSWORD_MAX_LENGTH {
            return Err("Password must be at most 128 characters long");
        }

        Ok(())
    }

    /// Compares two secrets without short-circuiting on the first differing byte.
    pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
        if left.len() != right.len() {
            return false;
        }

        left.iter()
            .zip(right.iter())
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}
