//! Login screen controller.

use subdesk_client::{ApiClient, ApiError, SessionStore};
use subdesk_types::api::LoginRequest;
use subdesk_types::models::{Role, Session};
use tracing::{debug, info};

use crate::route::Route;

/// The login form: a role picker plus credentials.
///
/// Plain owned state; nothing async holds onto it between submissions, so
/// no locking here.
#[derive(Debug, Clone)]
pub struct LoginForm {
    role: Role,
    username: String,
    password: String,
    error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::with_role(Role::Admin)
    }

    pub fn with_role(role: Role) -> Self {
        Self {
            role,
            username: String::new(),
            password: String::new(),
            error: None,
        }
    }

    /// Switching role starts the form over: credentials typed for one
    /// role must not leak into an attempt as another.
    pub fn select_role(&mut self, role: Role) {
        debug!(role = %role, "login role selected");
        self.role = role;
        self.username.clear();
        self.password.clear();
        self.error = None;
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits the form. On success the session is stored and the landing
    /// route for the selected role is returned; on failure the error text
    /// is kept on the form and `None` is returned.
    pub async fn submit(&mut self, client: &ApiClient, sessions: &SessionStore) -> Option<Route> {
        self.error = None;
        if self.username.is_empty() || self.password.is_empty() {
            self.error = Some("Please fill in all fields".into());
            return None;
        }

        let req = LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            role: self.role,
        };
        match client.login(&req).await {
            Ok(()) => {
                info!(username = %self.username, role = %self.role, "login accepted");
                sessions.sign_in(Session {
                    username: self.username.clone(),
                    role: self.role,
                });
                Some(Route::for_role(self.role))
            }
            Err(err) => {
                self.error = Some(login_error_text(err));
                None
            }
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A rejection surfaces the server's own words when it sent any; the
/// fallbacks cover an empty body and an unreachable backend.
fn login_error_text(err: ApiError) -> String {
    match err {
        ApiError::Server { body, .. } if !body.trim().is_empty() => body,
        ApiError::Server { .. } => "Invalid Username or Password for the selected role.".into(),
        _ => "Could not connect to the server. Please check your backend.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_fields_fail_before_any_network_call() {
        // Port 9 is discard; nothing listens, so reaching the network
        // would surface as a connect error instead of the local message.
        let client = ApiClient::new("http://127.0.0.1:9");
        let sessions = SessionStore::default();

        let mut form = LoginForm::new();
        form.set_username("maya");
        let route = form.submit(&client, &sessions).await;

        assert_eq!(route, None);
        assert_eq!(form.error(), Some("Please fill in all fields"));
        assert_eq!(sessions.current(), None);
    }

    #[test]
    fn switching_role_clears_credentials_and_error() {
        let mut form = LoginForm::new();
        assert_eq!(form.role(), Role::Admin);

        form.set_username("maya");
        form.set_password("hunter2");
        form.select_role(Role::Subscriber);

        assert_eq!(form.role(), Role::Subscriber);
        assert_eq!(form.username(), "");
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn unreachable_backend_reports_a_connection_error() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let sessions = SessionStore::default();

        let mut form = LoginForm::new();
        form.set_username("maya");
        form.set_password("letmein");
        let route = form.submit(&client, &sessions).await;

        assert_eq!(route, None);
        assert_eq!(
            form.error(),
            Some("Could not connect to the server. Please check your backend.")
        );
        assert_eq!(sessions.current(), None);
    }

    #[test]
    fn server_rejection_prefers_the_body_text() {
        let err = ApiError::Server {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "Account locked".into(),
        };
        assert_eq!(login_error_text(err), "Account locked");

        let blank = ApiError::Server {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "  ".into(),
        };
        assert_eq!(
            login_error_text(blank),
            "Invalid Username or Password for the selected role."
        );
    }
}
