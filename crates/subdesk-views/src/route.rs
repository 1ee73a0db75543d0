//! Navigation targets and the subscriber route guard.

use subdesk_types::models::{Role, Session};

/// The screens a frontend can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Subscriber,
    Ops,
    Admin,
}

impl Route {
    /// Where a successful login lands for each role.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Route::Admin,
            Role::Ops => Route::Ops,
            Role::Subscriber => Route::Subscriber,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Subscriber => "/subscriber",
            Route::Ops => "/ops",
            Route::Admin => "/admin",
        }
    }
}

/// Returns the redirect for anyone who may not see the subscriber screen.
///
/// Only a signed-in subscriber passes; everyone else bounces to login.
pub fn guard_subscriber(session: Option<&Session>) -> Option<Route> {
    match session {
        Some(session) if session.role == Role::Subscriber => None,
        _ => Some(Route::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_role_lands_on_its_own_screen() {
        assert_eq!(Route::for_role(Role::Admin), Route::Admin);
        assert_eq!(Route::for_role(Role::Ops), Route::Ops);
        assert_eq!(Route::for_role(Role::Subscriber), Route::Subscriber);
    }

    #[test]
    fn guard_admits_only_signed_in_subscribers() {
        let subscriber = Session {
            username: "maya".into(),
            role: Role::Subscriber,
        };
        let admin = Session {
            username: "root".into(),
            role: Role::Admin,
        };

        assert_eq!(guard_subscriber(Some(&subscriber)), None);
        assert_eq!(guard_subscriber(Some(&admin)), Some(Route::Login));
        assert_eq!(guard_subscriber(None), Some(Route::Login));
    }
}
