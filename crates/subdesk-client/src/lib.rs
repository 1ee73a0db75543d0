/// Subdesk client: the HTTP boundary to the subscription backend.
///
/// Everything authoritative (credentials, request persistence, approval
/// transitions) happens on the other side of these calls. This crate
/// only ships typed fetches, the failure taxonomy, and the session
/// context object the views read.

pub mod error;
pub mod http;
pub mod session;

// Re-export key types for convenience.
pub use error::ApiError;
pub use http::ApiClient;
pub use session::SessionStore;
