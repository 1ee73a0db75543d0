/// Subdesk Views - View controllers for the subscription console
///
/// Each screen of the console is a controller that owns its screen state
/// and talks to the backend through `subdesk_client::ApiClient`. The
/// controllers hold no rendering logic; a frontend (or the reference
/// console binary) reads their snapshots and draws them however it likes.
///
/// All mutation runs on the caller's task. Controllers are cheap to clone
/// and share one inner state, so a renderer and an in-flight fetch can
/// hold the same view.
pub mod admin;
pub mod dashboard;
pub mod login;
pub mod notice;
pub mod notifications;
pub mod route;

// Re-export key types for convenience.
pub use admin::{AdminView, RequestRow};
pub use dashboard::{DashboardTab, DashboardView, TabCounts};
pub use login::LoginForm;
pub use notice::{Notice, NoticeKind};
pub use route::Route;
