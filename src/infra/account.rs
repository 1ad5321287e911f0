//! Asynchronous client for the account backend (`/api/account/*`).
//!
//! - Every response is wrapped in a `{ data, message? }` envelope.
//! - Non-2xx responses surface as [`AccountError::Status`] with the parsed body.
//! - Bodies that are not valid JSON are logged and read as `{}`.

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::config::parse_base_url;
use crate::domain::User;

#[cfg(not(target_arch = "wasm32"))]
const USER_AGENT: &str = concat!("tradedesk/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("account API returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        data: Value,
        message: Option<String>,
    },
    #[error("api error: {0}")]
    Api(String),
}

impl AccountError {
    /// Text suitable for inline form errors and toasts.
    pub fn user_message(&self) -> String {
        match self {
            AccountError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            AccountError::Status { status, .. } => format!("Request failed ({status})"),
            AccountError::Http(_) => "Could not reach the account service.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AccountError::Status { status: 401, .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Result of a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
}

impl Profile {
    pub fn user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    pub fn is_blank(&self) -> bool {
        [
            &self.line1,
            &self.city,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub plan: String,
    pub status: String,
    pub renews_at: Option<OffsetDateTime>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active") || self.status.eq_ignore_ascii_case("trialing")
    }
}

#[derive(Clone, Debug)]
pub struct AccountClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl AccountClient {
    pub fn new(base_url: Url) -> Result<Self, AccountError> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        #[cfg(target_arch = "wasm32")]
        let http = Client::new();

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    pub fn with_base_url(base: &str) -> Result<Self, AccountError> {
        Self::new(parse_base_url(base)?)
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AccountError> {
        tracing::info!(email = %request.email, "registering account");
        let builder = self.request(Method::POST, "register")?.json(request);
        let dto: UserEnvelopeDto = self.fetch_data(builder).await?;
        Ok(dto.into_user())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<Session, AccountError> {
        tracing::info!(email = %request.email, "signing in");
        let builder = self.request(Method::POST, "login")?.json(request);
        let dto: SessionDto = self.fetch_data(builder).await?;
        if dto.token.trim().is_empty() {
            return Err(AccountError::Api("login response missing token".into()));
        }
        Ok(Session {
            token: dto.token,
            user: dto.user.into(),
        })
    }

    pub async fn logout(&self) -> Result<(), AccountError> {
        let builder = self.request(Method::POST, "logout")?;
        self.send(builder).await.map(|_| ())
    }

    pub async fn profile(&self) -> Result<Profile, AccountError> {
        let dto: ProfileDto = self.fetch_data(self.request(Method::GET, "profile")?).await?;
        Ok(dto.into())
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, AccountError> {
        let builder = self.request(Method::PUT, "profile")?.json(update);
        let dto: ProfileDto = self.fetch_data(builder).await?;
        Ok(dto.into())
    }

    pub async fn address(&self) -> Result<Address, AccountError> {
        self.fetch_data(self.request(Method::GET, "address")?).await
    }

    pub async fn update_address(&self, address: &Address) -> Result<Address, AccountError> {
        let builder = self.request(Method::PUT, "address")?.json(address);
        self.fetch_data(builder).await
    }

    pub async fn subscription(&self) -> Result<Subscription, AccountError> {
        let dto: SubscriptionDto = self
            .fetch_data(self.request(Method::GET, "subscription")?)
            .await?;
        Ok(dto.into())
    }

    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, AccountError> {
        let url = self.url(endpoint)?;
        let builder = self.http.request(method, url);
        Ok(match self.token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Sends the request and returns the parsed envelope body.
    async fn send(&self, builder: RequestBuilder) -> Result<Value, AccountError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(status, &text);

        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let data = body
            .get("data")
            .cloned()
            .unwrap_or_else(|| body.clone());
        tracing::warn!(status = status.as_u16(), ?message, "account request failed");
        Err(AccountError::Status {
            status: status.as_u16(),
            data,
            message,
        })
    }

    async fn fetch_data<T>(&self, builder: RequestBuilder) -> Result<T, AccountError>
    where
        T: DeserializeOwned,
    {
        let body = self.send(builder).await?;
        // A body without `data` decodes as an empty object; required fields still fail below.
        let data = match body {
            Value::Object(mut map) => map.remove("data"),
            _ => None,
        }
        .unwrap_or_else(|| Value::Object(Map::new()));

        serde_json::from_value(data)
            .map_err(|err| AccountError::Api(format!("unexpected response shape: {err}")))
    }

    fn url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("api/account/{endpoint}"))
    }
}

fn parse_body(status: StatusCode, text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                status = status.as_u16(),
                "account response was not valid JSON, treating as empty: {err}"
            );
            Value::Object(Map::new())
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    username: String,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: dto.id,
            email: dto.email,
            username: dto.username,
        }
    }
}

/// Registration answers either `{ user: {...} }` or the user object itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UserEnvelopeDto {
    Wrapped { user: UserDto },
    Bare(UserDto),
}

impl UserEnvelopeDto {
    fn into_user(self) -> User {
        match self {
            UserEnvelopeDto::Wrapped { user } | UserEnvelopeDto::Bare(user) => user.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionDto {
    token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct ProfileDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

impl From<ProfileDto> for Profile {
    fn from(dto: ProfileDto) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Profile {
            id: dto.id,
            email: dto.email,
            username: dto.username,
            full_name: non_empty(dto.full_name),
            company: non_empty(dto.company),
            phone: non_empty(dto.phone),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubscriptionDto {
    #[serde(default)]
    plan: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    renews_at: Option<String>,
}

impl From<SubscriptionDto> for Subscription {
    fn from(dto: SubscriptionDto) -> Self {
        Subscription {
            plan: dto.plan.unwrap_or_else(|| "free".to_string()),
            status: dto.status.unwrap_or_else(|| "inactive".to_string()),
            renews_at: parse_timestamp_str(dto.renews_at.as_deref()),
        }
    }
}

fn parse_timestamp_str(raw: Option<&str>) -> Option<OffsetDateTime> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!("ignoring unparseable timestamp {raw:?}: {err}");
            None
        }
    }
}

fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;

    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(Visitor)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client(server: &MockServer) -> AccountClient {
        AccountClient::with_base_url(&server.base_url()).unwrap()
    }

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/account/login")
                    .json_body(json!({ "email": "ana@example.com", "password": "hunter22" }));
                then.status(200).json_body(json!({
                    "data": {
                        "token": "tok-123",
                        "user": { "id": 7, "email": "ana@example.com", "username": "ana" }
                    }
                }));
            })
            .await;

        let session = client(&server)
            .login(&LoginRequest {
                email: "ana@example.com".into(),
                password: "hunter22".into(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user.id, "7");
        assert_eq!(session.user.username, "ana");
    }

    #[tokio::test]
    async fn register_accepts_wrapped_user() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/account/register")
                    .json_body_partial(r#"{ "username": "bo" }"#);
                then.status(201).json_body(json!({
                    "data": { "user": { "id": "u-1", "email": "bo@example.com", "username": "bo" } },
                    "message": "created"
                }));
            })
            .await;

        let user = client(&server)
            .register(&RegisterRequest {
                email: "bo@example.com".into(),
                username: "bo".into(),
                password: "secret-pass".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, "u-1");
    }

    #[tokio::test]
    async fn non_success_carries_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/account/login");
                then.status(401).json_body(json!({
                    "data": { "field": "password" },
                    "message": "Invalid credentials"
                }));
            })
            .await;

        let err = client(&server)
            .login(&LoginRequest {
                email: "ana@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Invalid credentials");
        match err {
            AccountError::Status { status, data, .. } => {
                assert_eq!(status, 401);
                assert_eq!(data, json!({ "field": "password" }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_error_body_reads_as_empty_object() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/account/profile");
                then.status(502).body("<html>bad gateway</html>");
            })
            .await;

        let err = client(&server).profile().await.unwrap_err();
        match err {
            AccountError::Status {
                status,
                data,
                message,
            } => {
                assert_eq!(status, 502);
                assert_eq!(data, json!({}));
                assert_eq!(message, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn logout_tolerates_plain_text_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/account/logout")
                    .header("authorization", "Bearer tok-9");
                then.status(200).body("OK");
            })
            .await;

        client(&server)
            .with_token(Some("tok-9".into()))
            .logout()
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn profile_and_address_use_bearer_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/account/profile")
                    .header("authorization", "Bearer tok-1");
                then.status(200).json_body(json!({
                    "data": {
                        "id": 3,
                        "email": "cy@example.com",
                        "username": "cy",
                        "company": "Cy Imports",
                        "phone": ""
                    }
                }));
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/account/address")
                    .json_body_partial(r#"{ "city": "Toronto", "country": "Canada" }"#);
                then.status(200).json_body(json!({
                    "data": { "line1": "1 Front St", "city": "Toronto", "country": "Canada" }
                }));
            })
            .await;

        let api = client(&server).with_token(Some("tok-1".into()));
        let profile = api.profile().await.unwrap();
        assert_eq!(profile.user().username, "cy");
        assert_eq!(profile.company.as_deref(), Some("Cy Imports"));
        assert_eq!(profile.phone, None);

        let saved = api
            .update_address(&Address {
                line1: "1 Front St".into(),
                city: "Toronto".into(),
                country: "Canada".into(),
                ..Address::default()
            })
            .await
            .unwrap();
        update.assert_async().await;
        assert_eq!(saved.city, "Toronto");
        assert!(saved.line2.is_empty());
        assert!(!saved.is_blank());
    }

    #[tokio::test]
    async fn subscription_parses_renewal_date() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/account/subscription");
                then.status(200).json_body(json!({
                    "data": { "plan": "pro", "status": "active", "renews_at": "2026-11-01T00:00:00Z" }
                }));
            })
            .await;

        let subscription = client(&server).subscription().await.unwrap();
        assert!(subscription.is_active());
        assert_eq!(subscription.plan, "pro");
        assert_eq!(
            subscription.renews_at.map(|at| at.unix_timestamp()),
            Some(1_793_491_200)
        );
    }

    #[tokio::test]
    async fn malformed_success_body_reads_as_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/account/address");
                then.status(200).body("not json");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/account/subscription");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let api = client(&server);
        assert_eq!(api.address().await.unwrap(), Address::default());
        let subscription = api.subscription().await.unwrap();
        assert_eq!(subscription.plan, "free");
        assert!(!subscription.is_active());
        assert_eq!(subscription.renews_at, None);
    }

    #[tokio::test]
    async fn login_without_session_fields_still_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/account/login");
                then.status(200).json_body(json!({ "message": "ok" }));
            })
            .await;

        let err = client(&server)
            .login(&LoginRequest {
                email: "ops@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Api(_)));
    }
}
