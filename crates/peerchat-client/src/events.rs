use peerchat_types::User;

/// State-change notifications from the controller to the presentation
/// layer. A message-passing boundary: the app renders from these instead
/// of watching shared mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// A session was established (login, register, or startup restore).
    SignedIn(User),
    /// The session ended, by logout or by the server rejecting the token.
    SignedOut,
    /// The peer directory was replaced.
    PeersUpdated,
    /// The selected conversation was replaced or appended to.
    ConversationUpdated,
    /// A controller-initiated step failed without corrupting state
    /// (e.g. the peer refresh riding on a sign-in).
    Transient(String),
}
