use std::time::Duration;

use portal_logging::{excerpt, portal_debug, portal_warn};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};

use crate::wire::{ApiCall, Collection, Credentials, JwtResponse, PageBody, SessionGrant, Signup};
use crate::{ApiError, FailureKind};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub page_size: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            page_size: 3,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend as seen by the engine. `token` is the bearer JWT of the
/// signed-in user, if any.
#[async_trait::async_trait]
pub trait PortalApi: Send + Sync {
    async fn load_page(
        &self,
        token: Option<&str>,
        collection: Collection,
        page: u32,
    ) -> Result<PageBody, ApiError>;

    async fn call(&self, token: Option<&str>, call: &ApiCall) -> Result<(), ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<SessionGrant, ApiError>;

    /// Creates the account, then signs in with the same credentials.
    async fn register(&self, signup: &Signup) -> Result<SessionGrant, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPortalApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestPortalApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let base = self.settings.base_url.trim_end_matches('/');
        reqwest::Url::parse(&format!("{base}{path}"))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn get(&self, token: Option<&str>, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(authorize(self.client.get(self.url(path)?), token))
    }

    fn post(&self, token: Option<&str>, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(authorize(self.client.post(self.url(path)?), token))
    }

    fn call_request(&self, token: Option<&str>, call: &ApiCall) -> Result<RequestBuilder, ApiError> {
        Ok(match call {
            ApiCall::Apply { job } => self.post(token, &format!("/jobseeker/apply/{job}"))?,
            ApiCall::Save { job } => self.post(token, &format!("/jobseeker/save/{job}"))?,
            ApiCall::UpdateStatus {
                application,
                status,
                note,
                meeting,
            } => self
                .post(token, "/recruiter/edit")?
                .query(&[
                    ("jobApplicationId", application.to_string()),
                    ("note", note.clone()),
                    ("status", status.clone()),
                ])
                .json(meeting),
            ApiCall::CreateJob(job) => self.post(token, "/recruiter/add")?.json(job),
            ApiCall::CreateMeeting(meeting) => {
                self.post(token, "/meeting/addMeeting")?.json(meeting)
            }
        })
    }
}

fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

#[async_trait::async_trait]
impl PortalApi for ReqwestPortalApi {
    async fn load_page(
        &self,
        token: Option<&str>,
        collection: Collection,
        page: u32,
    ) -> Result<PageBody, ApiError> {
        let path = collection.path();
        portal_debug!("GET {} page={} size={}", path, page, self.settings.page_size);
        let request = self
            .get(token, &path)?
            .query(&[("page", page), ("size", self.settings.page_size)]);
        let body = send(request).await?.bytes().await.map_err(map_reqwest_error)?;
        collection.decode(&body).map_err(|err| {
            portal_warn!(
                "Undecodable page from {}: {} ({})",
                path,
                err,
                excerpt(&String::from_utf8_lossy(&body))
            );
            ApiError::new(FailureKind::Decode, err.to_string())
        })
    }

    async fn call(&self, token: Option<&str>, call: &ApiCall) -> Result<(), ApiError> {
        portal_debug!("POST {}", call.label());
        send(self.call_request(token, call)?).await?;
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<SessionGrant, ApiError> {
        portal_debug!("POST /user/login");
        let response = send(self.post(None, "/user/login")?.json(credentials)).await?;
        let body: JwtResponse = response.json().await.map_err(map_reqwest_error)?;
        body.into_grant()
            .ok_or_else(|| ApiError::new(FailureKind::Unauthorized, "login response had no token"))
    }

    async fn register(&self, signup: &Signup) -> Result<SessionGrant, ApiError> {
        let request = match signup {
            Signup::Recruiter(form) => {
                portal_debug!("POST /recruiter/register");
                self.post(None, "/recruiter/register")?.json(form)
            }
            Signup::Candidate(form) => {
                portal_debug!("POST /jobseeker/register ({} byte resume)", form.resume.len());
                let user = serde_json::to_string(form)
                    .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
                let user = Part::text(user)
                    .mime_str("application/json")
                    .map_err(map_reqwest_error)?;
                let resume = Part::bytes(form.resume.clone()).file_name(form.resume_name.clone());
                self.post(None, "/jobseeker/register")?
                    .multipart(Form::new().part("user", user).part("resume", resume))
            }
        };
        send(request).await?;
        self.login(&signup.credentials()).await
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await.map_err(map_reqwest_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    portal_warn!("Request failed with {}: {}", status, excerpt(&body));
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::Unauthorized,
        other => FailureKind::HttpStatus(other.as_u16()),
    };
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        excerpt(&body)
    };
    Err(ApiError::new(kind, message))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    if err.is_builder() {
        return ApiError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
