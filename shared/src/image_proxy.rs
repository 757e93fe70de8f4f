use crate::config::Config;
use crate::error::ImageError;
use crate::types::ProxyResult;
use reqwest::{header, Client};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";
const ACCEPT: &str = "image/avif,image/webp,image/apng,image/*,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const REFERER: &str = "https://imgur.com/";
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

fn browser_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::REFERER, header::HeaderValue::from_static(REFERER));
    headers
}

/// Fetch a remote image so a browser can load it from our origin.
///
/// Sends browser-like headers, follows redirects, and returns the body
/// untouched along with the origin's content type.
pub async fn fetch_image(config: &Config, url: &str) -> Result<ProxyResult, ImageError> {
    if url.is_empty() {
        return Err(ImageError::MissingUrl);
    }

    let client = Client::builder()
        .default_headers(browser_headers())
        .timeout(config.image_fetch_timeout)
        .build()
        .map_err(|e| ImageError::Fetch(e.to_string()))?;

    tracing::debug!("Fetching image from: {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ImageError::Fetch(e.to_string()))?;

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    // Get the body bytes
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ImageError::Fetch(e.to_string()))?
        .to_vec();

    Ok(ProxyResult {
        content_type,
        bytes,
    })
}
