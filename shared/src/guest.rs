use crate::config::Config;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// GraphQL operation id of `UserByScreenName` on the web client
const USER_BY_SCREEN_NAME_QUERY_ID: &str = "NimuplG1OB7Fd2btCLdBOw";

/// Feature switches the GraphQL endpoint insists on receiving
const USER_FEATURES: &str = r#"{"hidden_profile_likes_enabled":true,"hidden_profile_subscriptions_enabled":true,"responsive_web_graphql_exclude_directive_enabled":true,"verified_phone_label_enabled":false,"subscriptions_verification_info_is_identity_verified_enabled":true,"subscriptions_verification_info_verified_since_enabled":true,"highlights_tweets_tab_ui_enabled":true,"responsive_web_twitter_article_notes_tab_enabled":true,"creator_subscriptions_tweet_preview_api_enabled":true,"responsive_web_graphql_skip_user_profile_image_extensions_enabled":false,"responsive_web_graphql_timeline_navigation_enabled":true}"#;

/// Error raised by a guest-session call; the caller decides what it means
#[derive(Debug, Error)]
#[error("{0}")]
pub struct GuestError(pub String);

impl From<reqwest::Error> for GuestError {
    fn from(e: reqwest::Error) -> Self {
        GuestError(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ActivateResponse {
    guest_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserByScreenNameResponse {
    data: Option<UserData>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<UserResult>,
}

#[derive(Debug, Deserialize)]
struct UserResult {
    result: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
struct UserNode {
    #[serde(rename = "__typename")]
    typename: Option<String>,
    legacy: Option<GuestUser>,
}

/// The subset of a user record this service reads
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GuestUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
    /// Older user shapes send this next to, or instead of, the https field
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Unauthenticated client against the guest API.
///
/// A client is built for one lookup and dropped afterwards: it carries its own
/// connection pool and, once activated, its own guest token.
pub struct GuestClient {
    http: Client,
    base_url: String,
    bearer_token: String,
    guest_token: Option<String>,
}

impl GuestClient {
    pub fn new(config: &Config) -> Result<Self, GuestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.profile_lookup_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.guest_api_base_url.trim_end_matches('/').to_string(),
            bearer_token: config.guest_bearer_token.clone(),
            guest_token: None,
        })
    }

    /// Obtain a guest token. Must succeed before any user lookup.
    pub async fn activate(&mut self) -> Result<(), GuestError> {
        let url = format!("{}/1.1/guest/activate.json", self.base_url);
        tracing::debug!("Activating guest session at {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?
            .error_for_status()?;

        let body: ActivateResponse = response.json().await?;
        let token = body
            .guest_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| GuestError("activation response carried no guest_token".to_string()))?;

        self.guest_token = Some(token);
        Ok(())
    }

    /// Fetch a user record by screen name
    pub async fn get_user_by_screen_name(&self, screen_name: &str) -> Result<GuestUser, GuestError> {
        let guest_token = self
            .guest_token
            .as_deref()
            .ok_or_else(|| GuestError("guest session is not activated".to_string()))?;

        let url = format!(
            "{}/graphql/{}/UserByScreenName",
            self.base_url, USER_BY_SCREEN_NAME_QUERY_ID
        );
        let variables = serde_json::json!({
            "screen_name": screen_name,
            "withSafetyModeUserFields": false,
        })
        .to_string();

        tracing::debug!("Fetching user '{}' from {}", screen_name, url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .header("X-Guest-Token", guest_token)
            .query(&[("variables", variables.as_str()), ("features", USER_FEATURES)])
            .send()
            .await?
            .error_for_status()?;

        let body: UserByScreenNameResponse = response.json().await?;
        let node = body
            .data
            .and_then(|d| d.user)
            .and_then(|u| u.result)
            .ok_or_else(|| GuestError(format!("no user result for '{}'", screen_name)))?;

        if let Some(typename) = node.typename.as_deref() {
            if typename != "User" {
                return Err(GuestError(format!("user '{}' is {}", screen_name, typename)));
            }
        }

        node.legacy
            .ok_or_else(|| GuestError(format!("user '{}' has no profile data", screen_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> Config {
        Config {
            guest_api_base_url: base_url,
            guest_bearer_token: "test-bearer".to_string(),
            ..Config::default()
        }
    }

    async fn mount_activation(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/1.1/guest/activate.json"))
            .and(header("Authorization", "Bearer test-bearer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"guest_token": "g-1"})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_activate_stores_guest_token() {
        let server = MockServer::start().await;
        mount_activation(&server).await;

        let mut client = GuestClient::new(&test_config(server.uri())).unwrap();
        client.activate().await.unwrap();
        assert_eq!(client.guest_token.as_deref(), Some("g-1"));
    }

    #[tokio::test]
    async fn test_activate_fails_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1.1/guest/activate.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut client = GuestClient::new(&test_config(server.uri())).unwrap();
        assert!(client.activate().await.is_err());
    }

    #[tokio::test]
    async fn test_lookup_requires_activation() {
        let client = GuestClient::new(&test_config("http://127.0.0.1:9".to_string())).unwrap();
        let err = client.get_user_by_screen_name("alice").await.unwrap_err();
        assert!(err.to_string().contains("not activated"));
    }

    #[tokio::test]
    async fn test_get_user_by_screen_name() {
        let server = MockServer::start().await;
        mount_activation(&server).await;

        let path_str = format!("/graphql/{}/UserByScreenName", USER_BY_SCREEN_NAME_QUERY_ID);
        Mock::given(method("GET"))
            .and(path(path_str.as_str()))
            .and(header("X-Guest-Token", "g-1"))
            .and(query_param(
                "variables",
                r#"{"screen_name":"alice","withSafetyModeUserFields":false}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"user": {"result": {
                    "__typename": "User",
                    "legacy": {
                        "name": "Alice",
                        "screen_name": "alice",
                        "profile_image_url_https": "https://x.test/a_normal.jpg"
                    }
                }}}
            })))
            .mount(&server)
            .await;

        let mut client = GuestClient::new(&test_config(server.uri())).unwrap();
        client.activate().await.unwrap();
        let user = client.get_user_by_screen_name("alice").await.unwrap();

        assert_eq!(user.name.as_deref(), Some("Alice"));
        assert_eq!(user.screen_name.as_deref(), Some("alice"));
        assert_eq!(
            user.profile_image_url_https.as_deref(),
            Some("https://x.test/a_normal.jpg")
        );
    }

    #[tokio::test]
    async fn test_unavailable_user_is_an_error() {
        let server = MockServer::start().await;
        mount_activation(&server).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"user": {"result": {"__typename": "UserUnavailable"}}}
            })))
            .mount(&server)
            .await;

        let mut client = GuestClient::new(&test_config(server.uri())).unwrap();
        client.activate().await.unwrap();
        let err = client.get_user_by_screen_name("locked").await.unwrap_err();
        assert!(err.to_string().contains("UserUnavailable"));
    }

    #[tokio::test]
    async fn test_empty_data_is_an_error() {
        let server = MockServer::start().await;
        mount_activation(&server).await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
            .mount(&server)
            .await;

        let mut client = GuestClient::new(&test_config(server.uri())).unwrap();
        client.activate().await.unwrap();
        assert!(client.get_user_by_screen_name("ghost").await.is_err());
    }

    #[test]
    fn test_user_with_both_picture_fields() {
        let body: UserByScreenNameResponse = serde_json::from_value(serde_json::json!({
            "data": {"user": {"result": {
                "__typename": "User",
                "legacy": {
                    "name": "Alice",
                    "screen_name": "alice",
                    "profile_image_url": "http://x.test/a_normal.jpg",
                    "profile_image_url_https": "https://x.test/a_normal.jpg"
                }
            }}}
        }))
        .unwrap();

        let user = body.data.unwrap().user.unwrap().result.unwrap().legacy.unwrap();
        assert_eq!(
            user.profile_image_url_https.as_deref(),
            Some("https://x.test/a_normal.jpg")
        );
        assert_eq!(
            user.profile_image_url.as_deref(),
            Some("http://x.test/a_normal.jpg")
        );
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_ignored() {
        let server = MockServer::start().await;
        mount_activation(&server).await;

        let mut client = GuestClient::new(&test_config(format!("{}/", server.uri()))).unwrap();
        client.activate().await.unwrap();
        assert_eq!(client.guest_token.as_deref(), Some("g-1"));
    }
}
