use crate::error::ApiError;
use crate::types::ErrorBody;
use lambda_http::{Body, Error, Response, http::StatusCode};
use serde::Serialize;

pub const ALLOW_ORIGIN: &str = "*";
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=3600";

/// Serialize `value` as the JSON body of a response with the given status
pub fn json_response<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .body(serde_json::to_string(value)?.into())
        .map_err(Box::new)?)
}

/// `{"error": <message>}` with the status the error maps to
pub fn error_response(err: &ApiError) -> Result<Response<Body>, Error> {
    json_response(
        err.status_code(),
        &ErrorBody {
            error: err.to_string(),
        },
    )
}

/// Raw image bytes, content type mirrored from the origin
pub fn image_response(content_type: &str, bytes: Vec<u8>) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Cache-Control", IMAGE_CACHE_CONTROL)
        .body(Body::Binary(bytes))
        .map_err(Box::new)?)
}

/// Answer to a CORS preflight
pub fn preflight_response() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", "GET, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Empty)
        .map_err(Box::new)?)
}
