use anyhow::Result;

use crate::session_store::SessionStore;

/// Which half of the shell may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Authenticated,
    Unauthenticated,
}

/// Pure presence check. The token is not validated here; the first API call
/// answering 401 is what actually enforces authentication.
pub fn guard(session: &Session) -> Branch {
    match session.token() {
        Some(_) => Branch::Authenticated,
        None => Branch::Unauthenticated,
    }
}

/// Session context handed to the API client: the current bearer token plus
/// the optional durable store it is mirrored to.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    store: Option<SessionStore>,
}

impl Session {
    pub fn in_memory(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            store: None,
        }
    }

    /// Load the token persisted by a previous run, if any.
    pub fn persistent(store: SessionStore) -> Result<Self> {
        let token = store.load()?;
        Ok(Self {
            token,
            store: Some(store),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Persist and install a freshly issued token.
    pub fn establish(&mut self, token: String) -> Result<()> {
        anyhow::ensure!(!token.is_empty(), "Refusing to store an empty session token");
        if let Some(store) = &self.store {
            store.save(&token)?;
        }
        self.token = Some(token);
        tracing::info!("session established");
        Ok(())
    }

    /// Forget the token. The in-memory token is dropped even if removing the
    /// session file fails.
    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        tracing::info!("session cleared");
        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_follows_token_presence() {
        assert_eq!(guard(&Session::default()), Branch::Unauthenticated);
        assert_eq!(
            guard(&Session::in_memory(Some("t".to_string()))),
            Branch::Authenticated
        );
        assert_eq!(
            guard(&Session::in_memory(Some(String::new()))),
            Branch::Unauthenticated
        );
    }

    #[test]
    fn establish_persists_and_clear_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session"));
        let mut session = Session::persistent(store.clone()).unwrap();
        assert_eq!(guard(&session), Branch::Unauthenticated);

        session.establish("tok".to_string()).unwrap();
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(store.load().unwrap().as_deref(), Some("tok"));

        // A later run picks the token back up.
        let reloaded = Session::persistent(store.clone()).unwrap();
        assert_eq!(guard(&reloaded), Branch::Authenticated);

        session.clear().unwrap();
        assert_eq!(session.token(), None);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut session = Session::default();
        assert!(session.establish(String::new()).is_err());
        assert_eq!(guard(&session), Branch::Unauthenticated);
    }
}
