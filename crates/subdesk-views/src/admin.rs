//! Admin console controller.
//!
//! Lists every pending subscription request, lets the admin approve or
//! reject them, and relearns the queue from the server after each action.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use subdesk_client::{ApiClient, ApiError, SessionStore};
use subdesk_pipeline::{SearchTargets, filter};
use subdesk_types::api::{ProcessRequest, RequestAction};
use subdesk_types::models::{Role, Session, SubscriptionRequest};
use tracing::{debug, info, warn};

use crate::notice::Notice;
use crate::route::Route;

/// Folder shown for every request until the backend starts reporting one.
const DEFAULT_FOLDER: &str = "Client Data A";

/// A pending request enriched with the display fields the console derives
/// on its side: a folder and a human-readable report name.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRow {
    pub request: SubscriptionRequest,
    pub folder: &'static str,
    pub report_name: String,
}

impl RequestRow {
    fn from_request(request: SubscriptionRequest) -> Self {
        let report_name = format!("{} Report", request.group_name.replace('_', " "));
        Self {
            request,
            folder: DEFAULT_FOLDER,
            report_name,
        }
    }
}

impl SearchTargets for RequestRow {
    fn search_targets(&self) -> Vec<&str> {
        vec![
            &self.request.subscriber_username,
            &self.request.group_name,
            &self.report_name,
        ]
    }
}

#[derive(Default)]
struct AdminState {
    rows: Vec<RequestRow>,
    search: String,
    loading: bool,
    notice: Option<Notice>,
}

struct AdminInner {
    client: ApiClient,
    sessions: SessionStore,
    epoch: AtomicU64,
    state: Mutex<AdminState>,
}

/// Cheap-to-clone handle; all clones share one screen state.
#[derive(Clone)]
pub struct AdminView {
    inner: Arc<AdminInner>,
}

impl AdminView {
    pub fn new(client: ApiClient, sessions: SessionStore) -> Self {
        Self {
            inner: Arc::new(AdminInner {
                client,
                sessions,
                epoch: AtomicU64::new(0),
                state: Mutex::new(AdminState::default()),
            }),
        }
    }

    /// Who the header greets. The console stays usable for operators who
    /// reached it without a stored session, under a generic identity.
    pub fn header_identity(&self) -> Session {
        self.inner.sessions.current().unwrap_or_else(|| Session {
            username: "Admin User".into(),
            role: Role::Admin,
        })
    }

    /// Refetches the pending queue.
    ///
    /// Unlike the dashboard, a failed fetch keeps the rows already shown;
    /// only the notice reports the problem.
    pub async fn refresh(&self) {
        let epoch = self.inner.epoch.load(Ordering::Relaxed);
        {
            let mut state = self.lock();
            state.loading = true;
            state.notice = None;
        }

        let result = self.inner.client.pending_requests().await;

        let mut state = self.lock();
        if self.inner.epoch.load(Ordering::Relaxed) != epoch {
            debug!("discarding pending queue fetched before leave");
            return;
        }
        state.loading = false;
        match result {
            Ok(requests) => {
                let count = requests.len();
                debug!(count, "pending queue applied");
                state.rows = requests.into_iter().map(RequestRow::from_request).collect();
                state.notice = Some(Notice::success(format!(
                    "Successfully loaded {count} pending requests."
                )));
            }
            Err(err @ ApiError::Server { .. }) => {
                warn!(%err, "pending queue fetch rejected");
                state.notice = Some(Notice::error("Error loading pending requests from server."));
            }
            Err(err) => {
                warn!(%err, "pending queue fetch did not reach the server");
                state.notice = Some(Notice::error(
                    "Network error: Could not connect to the backend server.",
                ));
            }
        }
    }

    /// Approves or rejects one request, then refetches the queue. The row
    /// only disappears once the follow-up fetch no longer reports it.
    pub async fn process(&self, request_id: &str, action: RequestAction) {
        let epoch = self.inner.epoch.load(Ordering::Relaxed);
        self.lock().notice = None;

        let req = ProcessRequest {
            request_id: request_id.to_string(),
            action,
        };
        let result = self.inner.client.process_request(&req).await;

        if self.inner.epoch.load(Ordering::Relaxed) != epoch {
            debug!(request_id, "discarding process outcome after leave");
            return;
        }
        match result {
            Ok(()) => {
                info!(request_id, %action, "request processed");
                self.lock().notice = Some(Notice::success(format!(
                    "Request ID {request_id} successfully {action}d."
                )));
                self.refresh().await;
            }
            Err(ApiError::Server { body, .. }) => {
                warn!(request_id, %body, "process rejected");
                self.lock().notice =
                    Some(Notice::error(format!("Failed to process request: {body}")));
            }
            Err(err) => {
                warn!(request_id, %err, "process did not reach the server");
                self.lock().notice = Some(Notice::error(
                    "Network error: Failed to communicate with the server.",
                ));
            }
        }
    }

    pub fn set_search(&self, query: impl Into<String>) {
        self.lock().search = query.into();
    }

    pub fn search(&self) -> String {
        self.lock().search.clone()
    }

    /// Pending rows under the current search query, matched against the
    /// subscriber, the group and the derived report name.
    pub fn visible_rows(&self) -> Vec<RequestRow> {
        let state = self.lock();
        filter(&state.rows, &state.search)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Approved requests tab. The backend keeps no approved-request list
    /// yet, so this is always empty.
    pub fn approved_rows(&self) -> Vec<RequestRow> {
        Vec::new()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn notice(&self) -> Option<Notice> {
        self.lock().notice.clone().filter(|n| !n.is_expired())
    }

    /// Drops the session and resets the screen. The caller shows
    /// `notice::logout_notice()` on the login screen it lands on.
    pub fn logout(&self) -> Route {
        if let Some(session) = self.inner.sessions.sign_out() {
            info!(username = %session.username, "admin signed out");
        }
        self.leave();
        Route::Login
    }

    pub fn leave(&self) {
        self.inner.epoch.fetch_add(1, Ordering::Relaxed);
        *self.lock() = AdminState::default();
    }

    fn lock(&self) -> MutexGuard<'_, AdminState> {
        self.inner.state.lock().unwrap()
    }
}
