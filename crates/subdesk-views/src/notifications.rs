//! Seeded notification feed for the dashboard sidebar.
//!
//! The backend has no notification endpoint yet, so the feed is a fixed
//! set kept client-side. Real delivery can replace this without touching
//! the dashboard controller.

/// One entry in the notification panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub report: &'static str,
    pub message: &'static str,
}

pub const SEED_NOTIFICATIONS: [Notification; 3] = [
    Notification {
        report: "Ops_Reports",
        message: "New operations report uploaded on 2025-10-09",
    },
    Notification {
        report: "Finance_Reports",
        message: "Monthly finance report summary available",
    },
    Notification {
        report: "Compliance_Data",
        message: "Compliance audit access restored",
    },
];
