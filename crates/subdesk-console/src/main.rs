//! Reference console for the subscription workflow.
//!
//! A line-driven frontend over the view controllers, mainly for poking at
//! a backend without a browser. It renders plain text; everything it can
//! do, it does through the same controllers a graphical frontend would.

use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tracing::{info, warn};

use subdesk_client::{ApiClient, SessionStore};
use subdesk_types::models::Role;
use subdesk_views::notice::logout_notice;
use subdesk_views::route::guard_subscriber;
use subdesk_views::{
    AdminView, DashboardTab, DashboardView, LoginForm, Notice, NoticeKind, Route,
};

struct Console {
    client: ApiClient,
    sessions: SessionStore,
    form: LoginForm,
    dashboard: DashboardView,
    admin: AdminView,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subdesk=debug".into()),
        )
        .init();

    // Config
    let base_url =
        std::env::var("SUBDESK_API_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    let client = ApiClient::new(base_url);
    let sessions = SessionStore::default();

    let mut console = Console {
        sessions: sessions.clone(),
        form: LoginForm::new(),
        dashboard: DashboardView::new(client.clone(), sessions.clone()),
        admin: AdminView::new(client.clone(), sessions),
        client,
    };
    if let Ok(role) = std::env::var("SUBDESK_ROLE") {
        match parse_role(&role) {
            Some(role) => console.form.select_role(role),
            None => warn!(%role, "ignoring unknown SUBDESK_ROLE"),
        }
    }

    info!(base_url = console.client.base_url(), "subdesk console ready");
    print_help();

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    console.print_prompt()?;
    while let Some(line) = lines.next_line().await? {
        if !console.dispatch(&line).await {
            break;
        }
        console.print_prompt()?;
    }
    Ok(())
}

impl Console {
    /// Returns false when the console should exit.
    async fn dispatch(&mut self, line: &str) -> bool {
        let line = line.trim_start();
        // Everything after "search " is the query, verbatim; doubled or
        // trailing whitespace can matter to the filter.
        if let Some(query) = line.strip_prefix("search ") {
            self.apply_search(query);
            return true;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match command {
            "" => {}
            "help" => print_help(),
            "role" => match args.first().and_then(|v| parse_role(v)) {
                Some(role) => {
                    self.form.select_role(role);
                    println!("role set to {role}; credentials cleared");
                }
                None => println!("usage: role <admin|ops|subscriber>"),
            },
            "login" => match args.as_slice() {
                [username, password] => self.login(username, password).await,
                _ => println!("usage: login <username> <password>"),
            },
            "groups" => self.show_groups().await,
            "tab" => match args.first().and_then(|v| parse_tab(v)) {
                Some(tab) => {
                    self.dashboard.select_tab(tab);
                    self.render_dashboard();
                }
                None => println!("usage: tab <subscribed|unsubscribed|pending>"),
            },
            "search" => self.apply_search(""),
            "request" => match args.as_slice() {
                [group_name] => {
                    self.dashboard.request_subscription(group_name).await;
                    self.render_dashboard();
                }
                _ => println!("usage: request <group-name>"),
            },
            "requests" => {
                self.admin.refresh().await;
                self.render_admin();
            }
            "approve" | "reject" => match args.as_slice() {
                [request_id] => {
                    let action = if command == "approve" {
                        subdesk_types::api::RequestAction::Approve
                    } else {
                        subdesk_types::api::RequestAction::Reject
                    };
                    self.admin.process(request_id, action).await;
                    self.render_admin();
                }
                _ => println!("usage: {command} <request-id>"),
            },
            "notifications" => {
                if self.dashboard.toggle_notifications() {
                    for line in notification_panel_lines(&self.dashboard) {
                        println!("{line}");
                    }
                } else {
                    println!("notification panel hidden");
                }
            }
            "logout" => self.logout(),
            "quit" | "exit" => return false,
            _ => println!("unknown command; try 'help'"),
        }
        true
    }

    async fn login(&mut self, username: &str, password: &str) {
        self.form.set_username(username);
        self.form.set_password(password);
        match self.form.submit(&self.client, &self.sessions).await {
            Some(route) => {
                println!("signed in; landing on {}", route.path());
                match route {
                    Route::Subscriber => self.show_groups().await,
                    Route::Admin => {
                        self.admin.refresh().await;
                        self.render_admin();
                    }
                    Route::Ops | Route::Login => {}
                }
            }
            None => {
                if let Some(error) = self.form.error() {
                    println!("login failed: {error}");
                }
            }
        }
    }

    /// Routes the query to whichever screen the session is on.
    fn apply_search(&mut self, query: &str) {
        match self.sessions.current().map(|s| s.role) {
            Some(Role::Subscriber) => {
                self.dashboard.set_search(query);
                self.render_dashboard();
            }
            _ => {
                self.admin.set_search(query);
                self.render_admin();
            }
        }
    }

    async fn show_groups(&self) {
        if guard_subscriber(self.sessions.current().as_ref()).is_some() {
            println!("sign in as a subscriber to see groups");
            return;
        }
        print_notice(&Notice::info("Loading Groups..."));
        self.dashboard.refresh().await;
        self.render_dashboard();
    }

    fn logout(&mut self) {
        if self.sessions.has_role(Role::Admin) {
            self.admin.logout();
        } else {
            self.sessions.sign_out();
            self.dashboard.leave();
        }
        self.form = LoginForm::new();
        print_notice(&logout_notice());
    }

    fn render_dashboard(&self) {
        if let Some(notice) = self.dashboard.notice() {
            print_notice(&notice);
        }
        let query = self.dashboard.search();
        if !query.is_empty() {
            println!("  filter: {query:?}");
        }
        let counts = self.dashboard.tab_counts();
        let active = self.dashboard.active_tab();
        for tab in DashboardTab::all() {
            let marker = if tab == active { '*' } else { ' ' };
            let count = match tab {
                DashboardTab::Subscribed => counts.subscribed,
                DashboardTab::Unsubscribed => counts.unsubscribed,
                DashboardTab::Pending => counts.pending,
            };
            println!(" {marker} {} ({count})", tab.label());
        }
        let rows = self.dashboard.visible_rows();
        if rows.is_empty() {
            println!("  (no rows)");
            return;
        }
        for row in rows {
            let marker = if row.status.can_request() { "  [can request]" } else { "" };
            println!(
                "  {:<24} {:<12} {}{marker}",
                row.group_name,
                row.status.as_str(),
                row.description
            );
        }
    }

    fn render_admin(&self) {
        let identity = self.admin.header_identity();
        println!("{} / Admin Approval", identity.username);
        if let Some(notice) = self.admin.notice() {
            print_notice(&notice);
        }
        let query = self.admin.search();
        if !query.is_empty() {
            println!("  filter: {query:?}");
        }
        let rows = self.admin.visible_rows();
        println!("Pending Requests ({} pending)", rows.len());
        for row in rows {
            println!(
                "  {}  {:<16} {:<20} {:<14} {:<28} {}",
                row.request.request_id,
                row.request.subscriber_username,
                row.request.group_name,
                row.folder,
                row.report_name,
                row.request.requested_date.format("%Y-%m-%d %H:%M"),
            );
        }
    }

    fn print_prompt(&self) -> Result<()> {
        match self.sessions.current() {
            Some(session) => print!("{}@{}> ", session.username, session.role),
            None => print!("subdesk> "),
        }
        std::io::stdout().flush()?;
        Ok(())
    }
}

fn print_notice(notice: &Notice) {
    let tag = match notice.kind() {
        NoticeKind::Info => "info",
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    println!("[{tag}] {}", notice.text());
}

/// The bell badge count plus the panel entries, as printable lines.
fn notification_panel_lines(dashboard: &DashboardView) -> Vec<String> {
    let entries = dashboard.notifications();
    let mut lines = vec![format!("Notifications ({})", entries.len())];
    for entry in entries {
        lines.push(format!("  {:<20} {}", entry.report, entry.message));
    }
    lines
}

fn print_help() {
    let roles: Vec<String> = Role::all()
        .iter()
        .map(|r| r.label().to_lowercase())
        .collect();
    println!("commands:");
    println!("  role <{}>              pick the role for the next login", roles.join("|"));
    println!("  login <username> <password>");
    println!("  groups                             refresh the subscriber dashboard");
    println!("  tab <subscribed|unsubscribed|pending>");
    println!("  search <text>                      filter the current screen (empty clears)");
    println!("  request <group-name>               ask to join a group");
    println!("  requests                           refresh the admin queue");
    println!("  approve <request-id> | reject <request-id>");
    println!("  notifications                      toggle the notification panel");
    println!("  logout | quit");
}

fn parse_role(value: &str) -> Option<Role> {
    match value.to_ascii_lowercase().as_str() {
        "admin" => Some(Role::Admin),
        "ops" => Some(Role::Ops),
        "subscriber" => Some(Role::Subscriber),
        _ => None,
    }
}

fn parse_tab(value: &str) -> Option<DashboardTab> {
    match value.to_ascii_lowercase().as_str() {
        "subscribed" => Some(DashboardTab::Subscribed),
        "unsubscribed" => Some(DashboardTab::Unsubscribed),
        "pending" => Some(DashboardTab::Pending),
        _ => None,
    }
}
