pub use actix_web::body::BoxBody;
pub use actix_web::http::StatusCode;
pub use actix_web::web::{self, Data, Json, Path, ServiceConfig};
pub use actix_web::{HttpRequest, HttpResponse, Responder};
pub use chrono::NaiveDateTime;
pub use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

pub use crate::errors::{Error, ErrorResponse, Validation};

/// Current UTC time as stored in the `timestamp` columns
pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
