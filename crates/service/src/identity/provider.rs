use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use super::errors::IdentityError;

/// Parameters for minting a new identity. The password only ever travels to
/// the provider.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIdentity {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub email_verified: bool,
    pub disabled: bool,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("email_verified", &self.email_verified)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an identity and return its uid.
    async fn create_identity(&self, params: NewIdentity) -> Result<String, IdentityError>;
    /// Resolve a bearer token to the uid it was issued for.
    async fn verify_token(&self, token: &str) -> Result<String, IdentityError>;
    async fn delete_identity(&self, uid: &str) -> Result<(), IdentityError>;
}

/// In-memory provider for tests: records every call and can be told to fail.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        next_uid: u64,
        identities: HashMap<String, String>, // uid -> email
        tokens: HashMap<String, String>,     // token -> uid
        fail_create: bool,
        fail_delete: bool,
        verify_calls: usize,
        created: Vec<String>,
        deleted: Vec<String>,
    }

    #[derive(Default)]
    pub struct MockIdentityProvider {
        state: Mutex<State>,
    }

    impl MockIdentityProvider {
        pub fn new() -> Self { Self::default() }

        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }

        /// Register a token that verifies to `uid`.
        pub fn with_token(self, token: &str, uid: &str) -> Self {
            self.state().tokens.insert(token.to_string(), uid.to_string());
            self
        }

        pub fn set_fail_create(&self, fail: bool) { self.state().fail_create = fail; }

        pub fn set_fail_delete(&self, fail: bool) { self.state().fail_delete = fail; }

        pub fn verify_calls(&self) -> usize { self.state().verify_calls }

        pub fn created(&self) -> Vec<String> { self.state().created.clone() }

        pub fn deleted(&self) -> Vec<String> { self.state().deleted.clone() }

        pub fn contains(&self, uid: &str) -> bool { self.state().identities.contains_key(uid) }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        async fn create_identity(&self, params: NewIdentity) -> Result<String, IdentityError> {
            let mut st = self.state();
            if st.fail_create {
                return Err(IdentityError::Rejected { status: 400, message: "EMAIL_EXISTS".into() });
            }
            st.next_uid += 1;
            let uid = format!("uid-{}", st.next_uid);
            st.identities.insert(uid.clone(), params.email);
            st.created.push(uid.clone());
            Ok(uid)
        }

        async fn verify_token(&self, token: &str) -> Result<String, IdentityError> {
            let mut st = self.state();
            st.verify_calls += 1;
            st.tokens.get(token).cloned().ok_or(IdentityError::InvalidToken)
        }

        async fn delete_identity(&self, uid: &str) -> Result<(), IdentityError> {
            let mut st = self.state();
            st.deleted.push(uid.to_string());
            if st.fail_delete {
                return Err(IdentityError::Transport("connection reset".into()));
            }
            st.identities.remove(uid);
            Ok(())
        }
    }
}
