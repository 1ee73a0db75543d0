use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use subdesk_types::api::{LoginRequest, ProcessRequest, SubscribeRequest};
use subdesk_types::models::{GroupRecord, SubscriptionRequest};

/// Typed client for the five backend endpoints.
///
/// Cheap to clone (the underlying reqwest client is reference counted),
/// so every view can hold its own handle. All calls are non-blocking; the
/// caller owns loading indication and never sees a partial snapshot.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the backend origin, e.g. `http://localhost:8080`.
    /// A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/auth/login`. A 2xx means the credentials passed for the
    /// submitted role; the response body is unspecified and ignored. The
    /// caller builds the session from the form it submitted.
    pub async fn login(&self, req: &LoginRequest) -> Result<(), super::ApiError> {
        debug!(username = %req.username, role = %req.role, "logging in");
        let resp = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(req)
            .send()
            .await?;
        ensure_ok(resp).await?;
        Ok(())
    }

    /// `GET /api/subscriptions/groups/{username}`: the full group
    /// snapshot, with the backend-assigned status on every record.
    pub async fn groups_for(&self, username: &str) -> Result<Vec<GroupRecord>, super::ApiError> {
        debug!(username, "fetching group snapshot");
        let resp = self
            .http
            .get(format!(
                "{}/api/subscriptions/groups/{}",
                self.base_url, username
            ))
            .send()
            .await?;
        decode_json(ensure_ok(resp).await?).await
    }

    /// `POST /api/subscriptions/request`: ask to join a group. The
    /// Unsubscribed -> Pending transition is only real once a later
    /// `groups_for` snapshot reports it; nothing is assumed on 2xx.
    pub async fn request_subscription(
        &self,
        req: &SubscribeRequest,
    ) -> Result<(), super::ApiError> {
        debug!(username = %req.username, group = %req.group_name, "requesting subscription");
        let resp = self
            .http
            .post(format!("{}/api/subscriptions/request", self.base_url))
            .json(req)
            .send()
            .await?;
        ensure_ok(resp).await?;
        Ok(())
    }

    /// `GET /api/subscriptions/admin/requests`: every pending ask,
    /// across all subscribers.
    pub async fn pending_requests(&self) -> Result<Vec<SubscriptionRequest>, super::ApiError> {
        debug!("fetching pending subscription requests");
        let resp = self
            .http
            .get(format!("{}/api/subscriptions/admin/requests", self.base_url))
            .send()
            .await?;
        decode_json(ensure_ok(resp).await?).await
    }

    /// `POST /api/subscriptions/admin/process-request`: approve or
    /// reject one pending ask.
    pub async fn process_request(&self, req: &ProcessRequest) -> Result<(), super::ApiError> {
        debug!(request_id = %req.request_id, action = %req.action, "processing request");
        let resp = self
            .http
            .post(format!(
                "{}/api/subscriptions/admin/process-request",
                self.base_url
            ))
            .json(req)
            .send()
            .await?;
        ensure_ok(resp).await?;
        Ok(())
    }
}

/// Pass 2xx responses through; turn anything else into `Server` with the
/// plain-text body preserved for display.
async fn ensure_ok(resp: Response) -> Result<Response, super::ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    warn!(%status, %body, "server rejected request");
    Err(super::ApiError::Server { status, body })
}

/// Strict decode: read the body as text first so a malformed record is a
/// `Decode` error, distinguishable from transport failures.
async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, super::ApiError> {
    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}
