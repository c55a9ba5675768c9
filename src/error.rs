use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

/// Every failure a store operation or handler can surface to a client.
#[derive(Debug, Display)]
pub enum Error {
    /// A lookup expected at least one row and found none.
    #[display(fmt = "{}", _0)]
    NotFound(String),
    /// Input referenced something that does not exist or broke a uniqueness rule.
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "{}", _0)]
    Database(DbErr),
    #[display(fmt = "{}", _0)]
    Storage(std::io::Error),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// A write that tripped a foreign key referenced a row that is not there.
    /// Anything else stays a database error.
    pub fn missing_reference(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => Self::validation(message),
            _ => Self::Database(err),
        }
    }
}

impl std::error::Error for Error {}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        Self::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Database(_) | Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{:?}", self);
        }

        HttpResponse::build(status).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;
    use sea_orm::DbErr;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::not_found("No post found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::validation("User does not exist").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::from(DbErr::Custom("boom".to_owned())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_rt::test]
    async fn test_error_body_carries_message() {
        let res = Error::validation("Username already exists").error_response();
        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Username already exists");
    }
}
