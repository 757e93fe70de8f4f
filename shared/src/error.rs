use lambda_http::http::StatusCode;
use thiserror::Error;

/// Failures of the guest-session profile lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Username parameter is missing")]
    MissingUsername,

    #[error("Could not activate the guest client: {0}")]
    SessionActivation(String),

    /// The guest API does not tell a missing account from a protected one.
    /// `detail` is logged but never shown to the caller.
    #[error("User '{handle}' not found or profile is protected.")]
    NotFoundOrProtected { handle: String, detail: String },
}

/// Failures of the image proxy
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("url parameter is missing")]
    MissingUrl,

    #[error("Failed to fetch image: {0}")]
    Fetch(String),
}

/// Everything the router can answer with other than a success
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Lookup(LookupError::MissingUsername) => StatusCode::BAD_REQUEST,
            ApiError::Lookup(_) => StatusCode::NOT_FOUND,
            ApiError::Image(ImageError::MissingUrl) => StatusCode::BAD_REQUEST,
            ApiError::Image(ImageError::Fetch(_)) => StatusCode::BAD_GATEWAY,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}
