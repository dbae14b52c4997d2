use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use peerchat_api::{ApiError, ChatApi};
use peerchat_types::{AuthResponse, Message, User};

use crate::conversation::ConversationCache;
use crate::directory::PeerDirectory;
use crate::error::ClientError;
use crate::events::StateEvent;
use crate::session::SessionStore;
use crate::token_store::TokenStore;

/// Result of the startup restore-and-validate sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupStatus {
    /// A persisted token was found and the service still recognizes it.
    SignedIn(User),
    /// No persisted token, or the service rejected the one found (in
    /// which case it has been purged).
    Anonymous,
}

/// Result of a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The service accepted the message and its copy was appended.
    Sent,
    /// Client-side guard: no peer selected, empty content, or no active
    /// credential. Nothing was sent and no network call was made.
    Skipped,
}

struct ClientState {
    session: SessionStore,
    directory: PeerDirectory,
    conversation: ConversationCache,
    selected: Option<User>,
    /// Bumped on every session clear (and on establishing a fresh
    /// session over an old one). In-flight results carry the epoch they
    /// were issued under and are discarded when it no longer matches.
    epoch: u64,
}

/// Mediates every transition of the session, peer directory, and
/// conversation cache. The stores hold no references to each other;
/// only the controller moves data between them.
///
/// Remote calls are awaited without holding the state lock. Each result
/// is applied through a commit that re-checks the epoch (and, for
/// conversation data, the current selection) so a superseded operation
/// cannot mutate state: last selection wins, and a cleared session stays
/// cleared.
#[derive(Clone)]
pub struct ChatController {
    api: Arc<dyn ChatApi>,
    state: Arc<Mutex<ClientState>>,
    events: Option<mpsc::UnboundedSender<StateEvent>>,
}

impl ChatController {
    pub fn new(api: Arc<dyn ChatApi>, tokens: TokenStore) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(ClientState {
                session: SessionStore::new(tokens),
                directory: PeerDirectory::new(),
                conversation: ConversationCache::new(),
                selected: None,
                epoch: 0,
            })),
            events: None,
        }
    }

    /// Attach the channel state-change notifications are sent over.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<StateEvent>) -> Self {
        self.events = Some(events);
        self
    }

    fn emit(&self, event: StateEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }

    /// Restore-and-validate sequence, run once per process start.
    ///
    /// A found token is only "pending" until the service resolves it: on
    /// valid, the session is established and the peer directory
    /// refreshed; on rejection, the persisted token is purged and the
    /// client stays anonymous. A transport failure leaves the token in
    /// place and surfaces as an error so the next start can try again.
    pub async fn startup(&self) -> Result<StartupStatus, ClientError> {
        let token = { self.state.lock().await.session.restore() };
        let Some(token) = token else {
            return Ok(StartupStatus::Anonymous);
        };

        match SessionStore::validate(self.api.as_ref(), &token).await {
            Ok(user) => {
                let epoch = {
                    let mut st = self.state.lock().await;
                    st.session.establish(user.clone(), token)?;
                    st.epoch
                };
                self.emit(StateEvent::SignedIn(user.clone()));
                self.refresh_after_sign_in(epoch).await;
                Ok(StartupStatus::SignedIn(user))
            }
            Err(ApiError::Unauthorized) => {
                let mut st = self.state.lock().await;
                st.session.clear();
                Ok(StartupStatus::Anonymous)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Sign in with existing credentials. On failure nothing is mutated
    /// and the service's message (or its fallback) comes back as
    /// `ApiError::Auth`.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let auth = self.api.login(username, password).await?;
        self.complete_auth(auth).await
    }

    /// Create an account and sign in as it. Same failure contract as
    /// `login`.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let auth = self.api.register(username, password).await?;
        self.complete_auth(auth).await
    }

    async fn complete_auth(&self, auth: AuthResponse) -> Result<User, ClientError> {
        let epoch = {
            let mut st = self.state.lock().await;
            // A fresh session supersedes whatever was in flight before it
            st.epoch += 1;
            st.directory.clear();
            st.conversation.clear();
            st.selected = None;
            st.session.establish(auth.user.clone(), auth.token)?;
            st.epoch
        };
        self.emit(StateEvent::SignedIn(auth.user.clone()));
        self.refresh_after_sign_in(epoch).await;
        Ok(auth.user)
    }

    /// Explicit peer list refresh (the REPL's /refresh). Entering the
    /// authenticated state triggers this automatically, exactly once.
    pub async fn refresh_peers(&self) -> Result<(), ClientError> {
        let epoch = {
            let st = self.state.lock().await;
            if !st.session.is_authenticated() {
                return Err(ClientError::NotSignedIn);
            }
            st.epoch
        };
        self.fetch_peers(epoch).await.map(|_| ())
    }

    /// Sign-in path: directory failures here are transient notices, not
    /// sign-in failures.
    async fn refresh_after_sign_in(&self, epoch: u64) {
        if let Err(e) = self.fetch_peers(epoch).await {
            if e.is_transient() {
                self.emit(StateEvent::Transient(e.to_string()));
            }
        }
    }

    /// Returns Ok(true) when the fetched list was committed, Ok(false)
    /// when the operation was superseded before or after the call.
    async fn fetch_peers(&self, epoch: u64) -> Result<bool, ClientError> {
        let token = {
            let st = self.state.lock().await;
            if st.epoch != epoch {
                return Ok(false);
            }
            match st.session.credential() {
                Some(cred) => cred.token.clone(),
                None => return Ok(false),
            }
        };

        match self.api.users(&token).await {
            Ok(peers) => {
                let mut st = self.state.lock().await;
                if st.epoch != epoch {
                    return Ok(false);
                }
                st.directory.replace(peers);
                drop(st);
                self.emit(StateEvent::PeersUpdated);
                Ok(true)
            }
            Err(ApiError::Unauthorized) => {
                self.force_logout(epoch).await;
                Err(ApiError::Unauthorized.into())
            }
            // Transient: the previously held list is retained untouched
            Err(e) => Err(e.into()),
        }
    }

    /// Select a peer and load its conversation. Re-selecting the current
    /// peer re-fetches. If the selection changes again before the load
    /// resolves, the stale result is discarded on arrival.
    pub async fn select_peer(&self, peer: User) -> Result<(), ClientError> {
        let (token, epoch) = {
            let mut st = self.state.lock().await;
            let Some(cred) = st.session.credential() else {
                return Err(ClientError::NotSignedIn);
            };
            let token = cred.token.clone();
            st.selected = Some(peer.clone());
            st.conversation.clear();
            (token, st.epoch)
        };
        self.emit(StateEvent::ConversationUpdated);

        match self.api.messages(&token, peer.id).await {
            Ok(messages) => {
                let mut st = self.state.lock().await;
                if st.epoch == epoch && st.selected.as_ref().map(|p| p.id) == Some(peer.id) {
                    st.conversation.replace(peer.id, messages);
                    drop(st);
                    self.emit(StateEvent::ConversationUpdated);
                }
                Ok(())
            }
            Err(ApiError::Unauthorized) => {
                self.force_logout(epoch).await;
                Err(ApiError::Unauthorized.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Send `content` to the selected peer. Skipped silently when no
    /// peer is selected, the content trims empty, or no credential
    /// exists. On success the *server's* returned message (with its
    /// assigned id and timestamp) is appended; on failure the message is
    /// dropped, never queued.
    pub async fn send(&self, content: &str) -> Result<SendOutcome, ClientError> {
        let (token, peer_id, epoch) = {
            let st = self.state.lock().await;
            if content.trim().is_empty() {
                return Ok(SendOutcome::Skipped);
            }
            let Some(peer) = &st.selected else {
                return Ok(SendOutcome::Skipped);
            };
            let Some(cred) = st.session.credential() else {
                return Ok(SendOutcome::Skipped);
            };
            (cred.token.clone(), peer.id, st.epoch)
        };

        match self.api.send_message(&token, peer_id, content).await {
            Ok(message) => {
                let mut st = self.state.lock().await;
                if st.epoch == epoch && st.selected.as_ref().map(|p| p.id) == Some(peer_id) {
                    st.conversation.append(message);
                    drop(st);
                    self.emit(StateEvent::ConversationUpdated);
                }
                Ok(SendOutcome::Sent)
            }
            Err(ApiError::Unauthorized) => {
                self.force_logout(epoch).await;
                Err(ApiError::Unauthorized.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Clear the session, directory, conversation, and selection,
    /// unconditionally. Synchronous from the caller's perspective: no
    /// remote call is involved, and anything still in flight dies at the
    /// epoch check when it lands.
    pub async fn logout(&self) {
        {
            let mut st = self.state.lock().await;
            st.epoch += 1;
            st.session.clear();
            st.directory.clear();
            st.conversation.clear();
            st.selected = None;
        }
        self.emit(StateEvent::SignedOut);
    }

    /// Logout forced by the server rejecting a previously-valid token.
    /// No-op when the issuing epoch has already been superseded.
    async fn force_logout(&self, epoch: u64) {
        {
            let mut st = self.state.lock().await;
            if st.epoch != epoch {
                return;
            }
            st.epoch += 1;
            st.session.clear();
            st.directory.clear();
            st.conversation.clear();
            st.selected = None;
        }
        self.emit(StateEvent::SignedOut);
    }

    // Read-side accessors for the presentation layer.

    pub async fn current_user(&self) -> Option<User> {
        self.state.lock().await.session.credential().map(|c| c.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.session.is_authenticated()
    }

    pub async fn peers(&self) -> Vec<User> {
        self.state.lock().await.directory.peers().to_vec()
    }

    pub async fn find_peer(&self, username: &str) -> Option<User> {
        self.state.lock().await.directory.find(username).cloned()
    }

    pub async fn selected_peer(&self) -> Option<User> {
        self.state.lock().await.selected.clone()
    }

    pub async fn conversation(&self) -> Vec<Message> {
        self.state.lock().await.conversation.messages().to_vec()
    }
}
