//! Subscriber dashboard controller.
//!
//! Owns the group snapshot (partitioned into status buckets), the search
//! box, the active tab and the notification panel toggle. Every change of
//! subscription state is learned by refetching the snapshot; the
//! controller never rewrites a status locally.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use subdesk_client::{ApiClient, ApiError, SessionStore};
use subdesk_pipeline::{StatusBuckets, filter, partition};
use subdesk_types::api::SubscribeRequest;
use subdesk_types::models::{GroupRecord, SubscriptionStatus};
use tracing::{debug, warn};

use crate::notice::Notice;
use crate::notifications::{Notification, SEED_NOTIFICATIONS};

/// The three dashboard tabs, one per status bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Subscribed,
    Unsubscribed,
    Pending,
}

impl DashboardTab {
    pub fn status(&self) -> SubscriptionStatus {
        match self {
            DashboardTab::Subscribed => SubscriptionStatus::Subscribed,
            DashboardTab::Unsubscribed => SubscriptionStatus::Unsubscribed,
            DashboardTab::Pending => SubscriptionStatus::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Subscribed => "Subscribed Groups",
            DashboardTab::Unsubscribed => "New Groups Available",
            DashboardTab::Pending => "Pending Requests",
        }
    }

    pub fn all() -> [DashboardTab; 3] {
        [
            DashboardTab::Subscribed,
            DashboardTab::Unsubscribed,
            DashboardTab::Pending,
        ]
    }
}

/// Per-tab row counts under the current search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabCounts {
    pub subscribed: usize,
    pub unsubscribed: usize,
    pub pending: usize,
}

#[derive(Default)]
struct DashboardState {
    buckets: StatusBuckets,
    search: String,
    tab: DashboardTab,
    loading: bool,
    notice: Option<Notice>,
    show_notifications: bool,
}

struct DashboardInner {
    client: ApiClient,
    sessions: SessionStore,
    /// Bumped when the user leaves the screen. A fetch that started under
    /// an older epoch must not touch state when it completes.
    epoch: AtomicU64,
    state: Mutex<DashboardState>,
}

/// Cheap-to-clone handle; all clones share one screen state.
#[derive(Clone)]
pub struct DashboardView {
    inner: Arc<DashboardInner>,
}

impl DashboardView {
    pub fn new(client: ApiClient, sessions: SessionStore) -> Self {
        Self {
            inner: Arc::new(DashboardInner {
                client,
                sessions,
                epoch: AtomicU64::new(0),
                state: Mutex::new(DashboardState::default()),
            }),
        }
    }

    /// Refetches the group snapshot and replaces the buckets wholesale.
    ///
    /// This is the only way subscription state enters the dashboard; it
    /// runs on entry and again after every request the user sends. On a
    /// failed fetch the old snapshot is dropped rather than shown stale.
    pub async fn refresh(&self) {
        let Some(username) = self.inner.sessions.username() else {
            // Route guard already bounced this visitor; nothing to fetch.
            self.lock().loading = false;
            return;
        };

        let epoch = self.inner.epoch.load(Ordering::Relaxed);
        self.lock().loading = true;

        let result = self.inner.client.groups_for(&username).await;

        let mut state = self.lock();
        if self.inner.epoch.load(Ordering::Relaxed) != epoch {
            debug!(%username, "discarding group snapshot fetched before leave");
            return;
        }
        state.loading = false;
        match result {
            Ok(groups) => {
                debug!(%username, total = groups.len(), "group snapshot applied");
                state.buckets = partition(&groups);
            }
            Err(err) => {
                warn!(%username, %err, "group fetch failed");
                state.buckets = StatusBuckets::default();
                state.notice = Some(Notice::error(fetch_error_text(&err)));
            }
        }
    }

    /// Sends a subscription request for `group_name`, then refetches.
    ///
    /// The Unsubscribed -> Pending move is never applied locally: a 2xx only
    /// means the backend accepted the request, and the follow-up snapshot
    /// is what actually moves the row.
    pub async fn request_subscription(&self, group_name: &str) {
        let Some(username) = self.inner.sessions.username() else {
            debug!(group_name, "ignoring subscription request without a session");
            return;
        };

        let epoch = self.inner.epoch.load(Ordering::Relaxed);
        self.lock().notice = None;

        let req = SubscribeRequest {
            username,
            group_name: group_name.to_string(),
        };
        let result = self.inner.client.request_subscription(&req).await;

        if self.inner.epoch.load(Ordering::Relaxed) != epoch {
            debug!(group_name, "discarding subscription outcome after leave");
            return;
        }
        match result {
            Ok(()) => {
                self.lock().notice = Some(Notice::success(format!(
                    "Subscription request sent for: {group_name}. Awaiting Admin approval."
                )));
                self.refresh().await;
            }
            Err(ApiError::Server { body, .. }) => {
                warn!(group_name, %body, "subscription request rejected");
                self.lock().notice = Some(Notice::error(format!("Request failed: {body}")));
            }
            Err(err) => {
                warn!(group_name, %err, "subscription request did not reach the server");
                self.lock().notice = Some(Notice::error(
                    "Network error: Failed to send subscription request.",
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

    pub fn select_tab(&self, tab: DashboardTab) {
        self.lock().tab = tab;
    }

    pub fn active_tab(&self) -> DashboardTab {
        self.lock().tab
    }

    /// Returns the new visibility.
    pub fn toggle_notifications(&self) -> bool {
        let mut state = self.lock();
        state.show_notifications = !state.show_notifications;
        state.show_notifications
    }

    pub fn notifications_visible(&self) -> bool {
        self.lock().show_notifications
    }

    pub fn notifications(&self) -> &'static [Notification] {
        &SEED_NOTIFICATIONS
    }

    /// Rows of the active tab under the current search query. The search
    /// narrows what is shown, never what is held.
    pub fn visible_rows(&self) -> Vec<GroupRecord> {
        let state = self.lock();
        filter(state.buckets.for_status(state.tab.status()), &state.search)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Tab badges count what the search leaves visible, not bucket sizes.
    pub fn tab_counts(&self) -> TabCounts {
        let state = self.lock();
        TabCounts {
            subscribed: filter(&state.buckets.subscribed, &state.search).len(),
            unsubscribed: filter(&state.buckets.unsubscribed, &state.search).len(),
            pending: filter(&state.buckets.pending, &state.search).len(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// The current notice, if any and not yet expired.
    pub fn notice(&self) -> Option<Notice> {
        self.lock().notice.clone().filter(|n| !n.is_expired())
    }

    /// Leaving the screen resets it and invalidates whatever is still in
    /// flight; a revisit starts from a clean fetch.
    pub fn leave(&self) {
        self.inner.epoch.fetch_add(1, Ordering::Relaxed);
        *self.lock() = DashboardState::default();
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.inner.state.lock().unwrap()
    }
}

fn fetch_error_text(err: &ApiError) -> &'static str {
    match err {
        ApiError::Server { .. } => "Error fetching groups.",
        _ => "Network error: Could not connect to the server.",
    }
}
