//! Shared stubs and request helpers for handler tests.

use std::sync::Mutex;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Map, Value, json};
use tower::ServiceExt;

use micropub_app::ports::{Backend, SiteConfiguration};
use micropub_app::services::micropub_service::MicropubService;
use micropub_app::services::query_service::QueryService;
use micropub_domain::auth::{AuthContext, Scope};
use micropub_domain::error::{BadRequestError, MicropubError, NotFoundError};
use micropub_domain::media::MediaFile;
use micropub_domain::request::Request as MicropubRequest;
use micropub_domain::site::{Channel, PostType, Syndication};

use crate::state::AppState;

/// The only bearer token the stub backend recognizes.
pub const TOKEN: &str = "secret";

pub const BOUNDARY: &str = "micropub-test-boundary";

/// Hand-rolled `multipart/form-data` body using [`BOUNDARY`].
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.text_bytes(name, value.as_bytes())
    }

    /// A text part with arbitrary, possibly non-UTF-8, contents.
    pub fn text_bytes(mut self, name: &str, value: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                .as_bytes(),
        );
        self.body.extend_from_slice(value);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, content: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{content}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// How the stub backend fails every storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    BadRequest,
    NotFound,
    NotImplemented,
    Other,
}

impl Failure {
    fn error(self, url: &str) -> MicropubError {
        match self {
            Self::BadRequest => BadRequestError::Rejected("nope".to_string()).into(),
            Self::NotFound => NotFoundError::new(url).into(),
            Self::NotImplemented => MicropubError::NotImplemented,
            Self::Other => MicropubError::backend("disk on fire"),
        }
    }
}

/// Every call the stub backend received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    HasScope(Scope),
    UploadMedia(MediaFile),
    Source(String),
    Create(MicropubRequest),
    Update(MicropubRequest),
    Delete(String),
    Undelete(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::HasScope(_) | Self::Source(_))
    }
}

/// Recording backend granting a fixed set of scopes to [`TOKEN`].
pub struct StubBackend {
    granted: Vec<Scope>,
    failure: Option<Failure>,
    calls: Mutex<Vec<Call>>,
}

impl StubBackend {
    pub fn granting(granted: &[Scope]) -> Self {
        Self {
            granted: granted.to_vec(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome<T>(&self, url: &str, value: T) -> Result<T, MicropubError> {
        match self.failure {
            Some(failure) => Err(failure.error(url)),
            None => Ok(value),
        }
    }
}

impl Backend for StubBackend {
    async fn has_scope(&self, auth: &AuthContext, scope: Scope) -> bool {
        self.record(Call::HasScope(scope));
        auth.token() == Some(TOKEN) && self.granted.contains(&scope)
    }

    async fn upload_media(&self, file: MediaFile) -> Result<String, MicropubError> {
        let url = format!(
            "https://example.org/media/{}",
            file.filename.as_deref().unwrap_or("upload")
        );
        self.record(Call::UploadMedia(file));
        self.outcome(&url, url.clone())
    }

    async fn source(&self, url: &str) -> Result<Map<String, Value>, MicropubError> {
        self.record(Call::Source(url.to_string()));
        let Value::Object(item) = json!({
            "type": ["h-entry"],
            "properties": {
                "content": ["hello world"],
                "category": ["foo", "bar"],
            },
        }) else {
            unreachable!()
        };
        self.outcome(url, item)
    }

    async fn create(&self, request: MicropubRequest) -> Result<String, MicropubError> {
        self.record(Call::Create(request));
        let url = "https://example.org/1".to_string();
        self.outcome(&url, url.clone())
    }

    async fn update(&self, request: MicropubRequest) -> Result<String, MicropubError> {
        let url = request.url().unwrap_or_default().to_string();
        self.record(Call::Update(request));
        self.outcome(&url, url.clone())
    }

    async fn delete(&self, url: &str) -> Result<(), MicropubError> {
        self.record(Call::Delete(url.to_string()));
        self.outcome(url, ())
    }

    async fn undelete(&self, url: &str) -> Result<(), MicropubError> {
        self.record(Call::Undelete(url.to_string()));
        self.outcome(url, ())
    }
}

pub struct StubSite;

impl SiteConfiguration for StubSite {
    fn media_endpoint(&self) -> Option<String> {
        Some("https://example.org/micropub/media".to_string())
    }

    fn syndicate_to(&self) -> Vec<Syndication> {
        vec![Syndication {
            uid: "https://social.example/@me".to_string(),
            name: "Social".to_string(),
        }]
    }

    fn channels(&self) -> Vec<Channel> {
        vec![Channel {
            uid: "notes".to_string(),
            name: "Notes".to_string(),
        }]
    }

    fn categories(&self) -> Vec<String> {
        vec!["Rust".to_string(), "indieweb".to_string()]
    }

    fn post_types(&self) -> Vec<PostType> {
        vec![PostType {
            kind: "note".to_string(),
            name: "Note".to_string(),
            properties: vec![],
            required_properties: vec![],
        }]
    }
}

pub type StubState = AppState<StubBackend, StubSite>;

pub fn state(backend: StubBackend) -> StubState {
    AppState::new(MicropubService::new(backend), QueryService::new(StubSite))
}

/// Send one request through the full router.
pub async fn send(state: &StubState, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let app: Router = crate::router::build(state.clone());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

pub fn form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/micropub")
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_body(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/micropub")
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}
