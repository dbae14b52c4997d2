use peerchat_api::{ApiError, ChatApi};
use peerchat_types::{Credential, User};

use crate::error::ClientError;
use crate::token_store::TokenStore;

/// Holds the authoritative in-memory session and the derived on-disk
/// token copy.
///
/// State machine: Anonymous -> Pending(restored token) -> Authenticated
/// or back to Anonymous when validation fails; Anonymous -> Authenticated
/// via login/register; Authenticated -> Anonymous via logout or
/// invalidation. Nothing else is reachable.
#[derive(Debug)]
pub struct SessionStore {
    credential: Option<Credential>,
    tokens: TokenStore,
}

impl SessionStore {
    pub fn new(tokens: TokenStore) -> Self {
        Self { credential: None, tokens }
    }

    /// Read a previously persisted token without touching the network.
    /// The identity is never persisted, so a restored token is only
    /// "pending" until `validate` resolves it.
    pub fn restore(&self) -> Option<String> {
        self.tokens.load()
    }

    /// Ask the remote service to resolve a token to its identity. The
    /// api handle is passed in; the store holds no reference to it, and
    /// no store lock needs to be held across the call.
    pub async fn validate(api: &dyn ChatApi, token: &str) -> Result<User, ApiError> {
        api.current_user(token).await
    }

    /// Record a new session as authoritative and persist the token,
    /// overwriting any prior persisted token.
    pub fn establish(&mut self, user: User, token: String) -> Result<(), ClientError> {
        self.tokens.save(&token).map_err(ClientError::Storage)?;
        self.credential = Some(Credential { token, user });
        Ok(())
    }

    /// Erase the in-memory session and the persisted token. Idempotent;
    /// a failed file removal does not keep the session alive.
    pub fn clear(&mut self) {
        self.credential = None;
        let _ = self.tokens.clear();
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}
