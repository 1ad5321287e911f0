use serde::{Deserialize, Serialize};

/// Signed-in account as reported by the account backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
}

/// Auth/session store. Mutated only in response to account API calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// Restores a persisted bearer token; the user is fetched separately.
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn signed_in(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.loading = false;
        self.error = None;
    }

    pub fn profile_loaded(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn signed_out(&mut self) {
        *self = Self::default();
    }

    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|user| {
            if user.username.is_empty() {
                user.email.as_str()
            } else {
                user.username.as_str()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".into(),
            email: "ops@example.com".into(),
            username: "ops".into(),
        }
    }

    #[test]
    fn sign_in_then_out() {
        let mut state = AuthState::default();
        state.begin();
        assert!(state.loading);

        state.signed_in(user(), "tok".into());
        assert!(state.is_authenticated());
        assert_eq!(state.display_name(), Some("ops"));

        state.signed_out();
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn failure_clears_loading_and_keeps_message() {
        let mut state = AuthState::default();
        state.begin();
        state.failed("invalid credentials");
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("invalid credentials"));
        assert!(!state.is_authenticated());
    }

    #[test]
    fn restored_token_is_not_authenticated_until_profile_loads() {
        let mut state = AuthState::with_token(Some("tok".into()));
        assert!(!state.is_authenticated());
        state.profile_loaded(user());
        assert!(state.is_authenticated());
    }
}
