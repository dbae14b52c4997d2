use peerchat_types::User;

/// The peer list for the active session, mirrored in the service's
/// order. The whole list is replaced atomically on refresh; there is no
/// incremental patching, so stale and fresh entries never interleave.
#[derive(Debug, Default)]
pub struct PeerDirectory {
    peers: Vec<User>,
}

impl PeerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire held list.
    pub fn replace(&mut self, peers: Vec<User>) {
        self.peers = peers;
    }

    pub fn clear(&mut self) {
        self.peers.clear();
    }

    pub fn peers(&self) -> &[User] {
        &self.peers
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Exact-username lookup for the REPL's /chat command. No filtering
    /// or sorting of the held order.
    pub fn find(&self, username: &str) -> Option<&User> {
        self.peers.iter().find(|p| p.username == username)
    }
}
