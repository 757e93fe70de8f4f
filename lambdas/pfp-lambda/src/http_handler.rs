use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use pfp_shared::{
    error::ApiError,
    image_proxy, profile,
    responses::{error_response, image_response, json_response, preflight_response},
    AppState,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Path and query of one incoming request, read once and never mutated
#[derive(Debug)]
pub(crate) struct RouteRequest {
    pub path: String,
    pub query: HashMap<String, String>,
}

impl RouteRequest {
    /// Query values come from the raw URI; the API Gateway query map fills in
    /// any key the URI lacks. First non-empty value wins.
    pub fn from_request(event: &Request) -> Self {
        let path = match event.uri().path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };

        let mut query = HashMap::new();
        if let Some(raw) = event.uri().query() {
            for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
                if !value.is_empty() {
                    query
                        .entry(key.into_owned())
                        .or_insert_with(|| value.into_owned());
                }
            }
        }
        if let Some(params) = event.query_string_parameters_ref() {
            for (key, value) in params.iter() {
                if !value.is_empty() {
                    query
                        .entry(key.to_string())
                        .or_insert_with(|| value.to_string());
                }
            }
        }

        Self { path, query }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Main Lambda handler - routes requests to the profile lookup or the image proxy
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method().clone();
    let route = RouteRequest::from_request(&event);
    tracing::info!(
        "🚀 PFP Lambda invoked - Method: {} Path: {}",
        method,
        route.path
    );

    // Handle CORS preflight
    if method == Method::OPTIONS {
        return preflight_response();
    }
    if method != Method::GET {
        return error_response(&ApiError::MethodNotAllowed);
    }

    match route.path.as_str() {
        "/image" => proxy_image(&state, &route).await,
        "/" | "/pfp" => get_pfp(&state, &route).await,
        _ => {
            tracing::warn!("⚠️ No route matched - Method: {} Path: {}", method, route.path);
            error_response(&ApiError::RouteNotFound)
        }
    }
}

async fn proxy_image(state: &AppState, route: &RouteRequest) -> Result<Response<Body>, Error> {
    let url = route.param("url").unwrap_or_default();

    match image_proxy::fetch_image(&state.config, url).await {
        Ok(image) => image_response(&image.content_type, image.bytes),
        Err(e) => {
            tracing::warn!("Image proxy failed for {:?}: {}", url, e);
            error_response(&ApiError::from(e))
        }
    }
}

async fn get_pfp(state: &AppState, route: &RouteRequest) -> Result<Response<Body>, Error> {
    let username = route.param("username").unwrap_or_default();

    match profile::lookup_profile(&state.config, username).await {
        Ok(record) => json_response(StatusCode::OK, &record),
        Err(e) => error_response(&ApiError::from(e)),
    }
}
