//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Response};
use serde::Serialize;

use crate::error::INTERNAL_SERVER_ERROR;
use crate::models::ErrorBody;
use crate::Error;

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))
        .map_err(Box::new)?;

    Ok(response)
}

/// Create an `{"error": ...}` response for a pipeline error.
///
/// Only the public message is exposed; the caller logs the detail.
pub fn error_response(err: &Error) -> Result<Response<Body>, lambda_http::Error> {
    json_response(
        err.status_code(),
        &ErrorBody {
            error: err.public_message().to_string(),
        },
    )
}

/// Hard-coded 500 response for when a JSON body cannot be produced.
pub fn internal_error_response() -> Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(500)
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{"error":"{}"}}"#, INTERNAL_SERVER_ERROR)))
        .map_err(Box::new)?;

    Ok(response)
}
