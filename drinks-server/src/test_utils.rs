use crate::config::AppConfig;
use crate::create_app;
use crate::state::AppState;
use axum::body::Body;
use axum::Router;
use drinks_auth::{KeySet, StaticKeySource, TokenValidator, ValidatorSettings};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::LevelFilter;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use wiremock::matchers;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

const SIGNING_KEY: &str = include_str!("../../testdata/signing_key.pem");
const TEST_JWKS: &str = include_str!("../../testdata/jwks.json");
const TEST_KEY_ID: &str = "drinks-test-key";
pub const TEST_ISSUER: &str = "https://drinks.test/";
pub const TEST_AUDIENCE: &str = "drink";

/// Signs a token with the test key.
///
/// `claims` are merged over a valid default payload (issuer, audience,
/// subject and an expiry ten minutes ahead), so tests only spell out what
/// they care about.
pub fn sign_token(claims: Value) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock before epoch")
        .as_secs();
    let mut payload = json!({
        "iss": TEST_ISSUER,
        "aud": TEST_AUDIENCE,
        "sub": "auth0|barista",
        "iat": now,
        "exp": now + 600,
    });
    if let (Some(payload), Value::Object(claims)) = (payload.as_object_mut(), claims) {
        payload.extend(claims);
    }

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(TEST_KEY_ID.to_string());
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY.as_bytes()).expect("Invalid test signing key");
    encode(&header, &payload, &key).expect("Failed to sign test token")
}

/// A valid token granting `permissions`
pub fn token(permissions: &[&str]) -> String {
    sign_token(json!({ "permissions": permissions }))
}

/// A validator trusting the test key without any key set endpoint
pub fn static_validator() -> Arc<TokenValidator> {
    let keys = KeySet::from_json(TEST_JWKS).expect("Invalid test key set");
    Arc::new(TokenValidator::new(
        ValidatorSettings {
            issuer: TEST_ISSUER.to_string(),
            audience: TEST_AUDIENCE.to_string(),
            leeway: 60,
            require_permissions_claim: false,
        },
        Arc::new(StaticKeySource::new(keys)),
    ))
}

/// Test fixture running the complete application against an in-memory store
/// and a mocked key set endpoint.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///     let token = token(&["post:drinks"]);
///
///     let response = fixture.post("/drinks", Some(&token), &drink).await;
///     response.assert_ok();
///     let created = response.json_as::<DrinkList>();
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// State shared with the router, for seeding and inspecting the store
    pub state: AppState,
    /// Mock server publishing the test key set
    pub jwks_mock: MockServer,
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let jwks_mock = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/.well-known/jwks.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(TEST_JWKS, "application/json"),
            )
            .mount(&jwks_mock)
            .await;

        let config = AppConfig::for_test_with_mock(&jwks_mock);
        let state = AppState::new(&config)
            .await
            .expect("Failed to create test state");
        let app = create_app(state.clone());

        Self {
            app,
            state,
            jwks_mock,
        }
    }

    /// Initializes the test logger, ignoring repeated initialization
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Creates a request builder with a JSON content type and, when given,
    /// a bearer token
    pub fn request_builder(
        &self,
        method: Method,
        uri: impl AsRef<str>,
        token: Option<&str>,
    ) -> http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri.as_ref());

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.header("Content-Type", "application/json")
    }

    pub async fn get(&self, uri: impl AsRef<str>, token: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn post<T: Serialize>(
        &self,
        uri: impl AsRef<str>,
        token: Option<&str>,
        body: &T,
    ) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        self.send_raw(Method::POST, uri, token, json_body).await
    }

    pub async fn patch<T: Serialize>(
        &self,
        uri: impl AsRef<str>,
        token: Option<&str>,
        body: &T,
    ) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        self.send_raw(Method::PATCH, uri, token, json_body).await
    }

    pub async fn delete(&self, uri: impl AsRef<str>, token: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(Method::DELETE, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends `body` verbatim, for bodies that are not valid JSON
    pub async fn send_raw(
        &self,
        method: Method,
        uri: impl AsRef<str>,
        token: Option<&str>,
        body: impl Into<Body>,
    ) -> TestResponse {
        let request = self
            .request_builder(method, uri, token)
            .body(body.into())
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Non-JSON bodies (the Scalar page) are reported as an empty object
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| json!({}))
        } else {
            json!({})
        };

        TestResponse { status, json }
    }
}

/// Status and JSON body of a test request
pub struct TestResponse {
    pub status: StatusCode,
    pub json: Value,
}

impl TestResponse {
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            serde_json::to_string_pretty(&self.json).unwrap_or_default()
        );
        self
    }

    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Asserts the error envelope of a failed request
    pub fn assert_error(&self, expected: StatusCode, message: &str) -> &Self {
        self.assert_status(expected);
        assert_eq!(self.json["success"], false);
        assert_eq!(self.json["error"], expected.as_u16());
        assert_eq!(self.json["message"], message);
        self
    }

    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}
