//! HTTP-facing error type shared by extractors, services and controllers

use std::collections::BTreeMap;
use std::fmt;

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, TransactionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const BASIC_REALM: &str = "Basic realm=\"simple-banking\"";

#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    BadRequest { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Forbidden { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("Validation failed")]
    Validation(Validation),
    #[error("{message}")]
    InternalServerError { message: String },
}

impl Error {
    pub fn bad_request<T: ToString>(message: T) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    pub fn unauthorized<T: ToString>(message: T) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    pub fn forbidden<T: ToString>(message: T) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    pub fn not_found<T: ToString>(message: T) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    pub fn internal<T: ToString>(message: T) -> Self {
        Self::InternalServerError {
            message: message.to_string(),
        }
    }
}

/// JSON body rendered for every error response
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Account not found")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let mut response = HttpResponse::build(self.status_code());

        let body = match self {
            Self::Validation(validation) => ErrorResponse {
                message: self.to_string(),
                errors: Some(validation.errors.clone()),
            },
            Self::InternalServerError { message } => {
                ::tracing::error!(error = %message, "Request failed with internal error");

                ErrorResponse {
                    message: "Internal server error".to_string(),
                    errors: None,
                }
            }
            Self::Unauthorized { message } => {
                response.insert_header((
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static(BASIC_REALM),
                ));

                ErrorResponse {
                    message: message.clone(),
                    errors: None,
                }
            }
            Self::BadRequest { message }
            | Self::Forbidden { message }
            | Self::NotFound { message } => ErrorResponse {
                message: message.clone(),
                errors: None,
            },
        };

        response.json(body)
    }
}

impl From<DbErr> for Error {
    fn from(error: DbErr) -> Self {
        Self::internal(error)
    }
}

impl From<TransactionError<Error>> for Error {
    fn from(error: TransactionError<Error>) -> Self {
        match error {
            TransactionError::Connection(e) => e.into(),
            TransactionError::Transaction(e) => e,
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(error: argon2::password_hash::Error) -> Self {
        Self::internal(format!("Password hashing failed: {}", error))
    }
}

impl From<actix_web::error::BlockingError> for Error {
    fn from(error: actix_web::error::BlockingError) -> Self {
        Self::internal(error)
    }
}

impl From<Validation> for Error {
    fn from(validation: Validation) -> Self {
        Self::Validation(validation)
    }
}

/// Field-keyed collection of validation messages
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    errors: BTreeMap<String, Vec<String>>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: ToString, M: ToString>(&mut self, field: F, message: M) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.errors {
            write!(f, "{}: {}; ", field, messages.join(", "))?;
        }

        Ok(())
    }
}
