use crate::error::Error;
use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse};

/// Malformed JSON bodies get the same `{"error": ...}` shape as every other failure.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::validation(err.to_string()).into()
}

pub fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::validation(err.to_string()).into()
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found("Not found"))
}
