use std::fs;
use std::io;
use std::path::PathBuf;

/// The single persisted-token slot: one string value in a well-known
/// file, read at startup, written on login/register, removed on logout
/// or invalidation. Only the token is persisted, never the identity.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Use an explicit file path (tests, --token-file).
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default slot location: ~/.peerchat/token
    pub fn default_path() -> io::Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "home directory not set"))?;
        Ok(PathBuf::from(home).join(".peerchat").join("token"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the persisted token. Absent, empty, or unreadable all mean
    /// "no token"; startup carries on unauthenticated.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// Persist a token, overwriting any prior one.
    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    /// Remove the persisted token. Idempotent: a missing file is fine.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
