/// Subdesk pipeline: the pure data path behind the dashboard and admin views.
///
/// Raw group snapshot -> status partition -> per-tab search filter -> rows.
/// Everything here is total and side-effect free; fetching and rendering
/// live elsewhere.

pub mod filter;
pub mod partition;

// Re-export key types for convenience.
pub use filter::{SearchTargets, filter};
pub use partition::{StatusBuckets, partition};
