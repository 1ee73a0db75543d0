use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned membership state of one group for one subscriber.
///
/// The set is closed: a payload carrying anything other than these three
/// strings fails to decode, deliberately. A record with no usable status
/// must surface as an error, not be lumped in with "Unsubscribed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Subscribed,
    Unsubscribed,
    Pending,
}

impl SubscriptionStatus {
    /// Whether a subscriber may legally initiate an access request from
    /// this state. Only Unsubscribed groups show a request action; Pending
    /// and Subscribed must wait for the backend to move them.
    pub fn can_request(&self) -> bool {
        matches!(self, SubscriptionStatus::Unsubscribed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Subscribed => "Subscribed",
            SubscriptionStatus::Unsubscribed => "Unsubscribed",
            SubscriptionStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn pending_status() -> SubscriptionStatus {
    SubscriptionStatus::Pending
}

/// One group as the backend reports it for a given subscriber.
///
/// `id` is opaque: the backend mints it and the client only ever echoes
/// it. `description` is the single field the backend may omit; everything
/// else is required and a snapshot missing it is rejected wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub id: String,
    pub group_name: String,
    #[serde(default)]
    pub description: String,
    pub status: SubscriptionStatus,
}

/// A pending ask by a subscriber to join a group, as listed for admins.
///
/// The list endpoint only ever returns pending entries and may leave the
/// status field off entirely, so absence defaults to Pending here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub request_id: String,
    pub subscriber_username: String,
    pub group_name: String,
    pub requested_date: DateTime<Utc>,
    #[serde(default = "pending_status")]
    pub status: SubscriptionStatus,
}

/// Identity a user signs in as. Routing and the subscriber-layout guard
/// key off this and nothing else; authorization proper is the backend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Ops,
    Subscriber,
}

impl Role {
    /// All selectable roles, in the order the login picker offers them.
    pub fn all() -> [Role; 3] {
        [Role::Admin, Role::Ops, Role::Subscriber]
    }

    /// Capitalized label for display; the wire form stays lowercase.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Ops => "Ops",
            Role::Subscriber => "Subscriber",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Ops => "ops",
            Role::Subscriber => "subscriber",
        };
        f.write_str(s)
    }
}

/// Client-held record of who is signed in. Not authoritative (the backend
/// re-checks every call); this only drives headers and route guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_strings_are_pascal_case() {
        let json = serde_json::to_string(&SubscriptionStatus::Unsubscribed).unwrap();
        assert_eq!(json, "\"Unsubscribed\"");
        let back: SubscriptionStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(back, SubscriptionStatus::Pending);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = serde_json::from_str::<SubscriptionStatus>("\"Revoked\"");
        assert!(err.is_err());
    }

    #[test]
    fn group_record_requires_status() {
        let json = r#"{"id":"g1","groupName":"Finance_Reports","description":"Finance data"}"#;
        assert!(serde_json::from_str::<GroupRecord>(json).is_err());
    }

    #[test]
    fn group_record_defaults_missing_description() {
        let json = r#"{"id":"g1","groupName":"Finance_Reports","status":"Subscribed"}"#;
        let record: GroupRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.status, SubscriptionStatus::Subscribed);
    }

    #[test]
    fn request_defaults_missing_status_to_pending() {
        let json = r#"{
            "requestId": "r1",
            "subscriberUsername": "maya",
            "groupName": "Ops_Reports",
            "requestedDate": "2025-10-09T08:30:00Z"
        }"#;
        let req: SubscriptionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, SubscriptionStatus::Pending);
    }

    #[test]
    fn only_unsubscribed_can_request() {
        assert!(SubscriptionStatus::Unsubscribed.can_request());
        assert!(!SubscriptionStatus::Pending.can_request());
        assert!(!SubscriptionStatus::Subscribed.can_request());
    }

    #[test]
    fn role_wire_form_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Subscriber).unwrap(), "\"subscriber\"");
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Admin.label(), "Admin");
    }
}
