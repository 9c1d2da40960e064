//! Shared [`Store`] of the current [`Session`].

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use secrecy::ExposeSecret as _;
use tokio::sync::watch;
use tracing as log;

use crate::domain::user::{session::Token, Session};

/// State of the [`Session`] a [`Store`] holds.
#[derive(Clone, Debug)]
pub enum State {
    /// No [`Session`] was ever established.
    Anonymous,

    /// [`Session`] is established.
    Authenticated(Session),

    /// [`Session`] was rejected by the API and the user must log in again.
    Invalidated,
}

impl State {
    /// Returns the established [`Session`], if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Anonymous | Self::Invalidated => None,
        }
    }
}

/// Process-wide holder of the current [`Session`], optionally persisted to a
/// file so later processes reuse it.
///
/// Cloned [`Store`]s share the same [`State`].
#[derive(Clone, Debug)]
pub struct Store {
    /// Sender of the [`State`] changes.
    state: Arc<watch::Sender<State>>,

    /// Path of the file the [`Session`] token is persisted to.
    path: Option<PathBuf>,
}

impl Store {
    /// Creates a new [`Store`] living only in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_state(State::Anonymous, None)
    }

    /// Creates a new [`Store`] persisted to the file at the provided `path`,
    /// restoring the [`Session`] saved there, if any.
    #[must_use]
    pub fn persisted(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match Self::load(&path) {
            Ok(Some(token)) => State::Authenticated(Session::new(token, None)),
            Ok(None) => State::Anonymous,
            Err(e) => {
                log::warn!(
                    path = %path.display(),
                    "failed to restore session: {e}"
                );
                State::Anonymous
            }
        };
        Self::with_state(state, Some(path))
    }

    /// Creates a new [`Store`] with the provided initial [`State`].
    fn with_state(state: State, path: Option<PathBuf>) -> Self {
        let (tx, _) = watch::channel(state);
        Self {
            state: Arc::new(tx),
            path,
        }
    }

    /// Reads a [`Token`] from the file at the provided `path`.
    fn load(path: &Path) -> io::Result<Option<Token>> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(Token::new(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns the current [`State`].
    #[must_use]
    pub fn state(&self) -> State {
        self.state.borrow().clone()
    }

    /// Returns the established [`Session`], if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    /// Subscribes to the [`State`] changes of this [`Store`].
    ///
    /// [`State::Invalidated`] signals the user has to log in again.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.state.subscribe()
    }

    /// Establishes the provided [`Session`], persisting it if needed.
    ///
    /// # Errors
    ///
    /// If the [`Session`] failed to be persisted. It's established in memory
    /// anyway.
    pub fn authenticate(&self, session: Session) -> io::Result<()> {
        let token = session.token.expose_secret().to_string();
        _ = self.state.send_replace(State::Authenticated(session));
        match &self.path {
            Some(path) => Self::save(path, &token),
            None => Ok(()),
        }
    }

    /// Forgets the current [`Session`] on the user request.
    ///
    /// # Errors
    ///
    /// If the persisted [`Session`] failed to be removed.
    pub fn clear(&self) -> io::Result<()> {
        _ = self.state.send_replace(State::Anonymous);
        self.forget()
    }

    /// Forgets the current [`Session`] because the API rejected it.
    pub fn invalidate(&self) {
        _ = self.state.send_replace(State::Invalidated);
        if let Err(e) = self.forget() {
            log::warn!("failed to remove persisted session: {e}");
        }
    }

    /// Writes the provided `token` to the file at `path`, readable and
    /// writable by its owner only.
    fn save(path: &Path, token: &str) -> io::Result<()> {
        let mut opts = fs::OpenOptions::new();
        _ = opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt as _;

            _ = opts.mode(0o600);
        }
        let mut file = opts.open(path)?;

        // Mode is applied on creation only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;

            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())
    }

    /// Removes the persisted [`Session`], if any.
    fn forget(&self) -> io::Result<()> {
        match &self.path {
            Some(path) => match fs::remove_file(path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                Ok(()) | Err(_) => Ok(()),
            },
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod spec {
    use std::{env, fs, process};

    use crate::domain::user::{session::Token, Session};

    use super::{State, Store};

    fn session(token: &str) -> Session {
        Session::new(Token::new(token).unwrap(), None)
    }

    #[test]
    fn notifies_subscribers() {
        let store = Store::in_memory();
        let mut rx = store.subscribe();
        assert!(store.session().is_none());

        store.authenticate(session("t1")).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(matches!(*rx.borrow_and_update(), State::Authenticated(_)));

        store.invalidate();
        assert!(matches!(*rx.borrow_and_update(), State::Invalidated));
        assert!(store.session().is_none());
    }

    #[test]
    fn persists_across_stores() {
        let path = env::temp_dir()
            .join(format!("prm-session-test-{}", process::id()));
        _ = fs::remove_file(&path);

        let store = Store::persisted(&path);
        assert!(matches!(store.state(), State::Anonymous));
        store.authenticate(session("persisted")).unwrap();

        let restored = Store::persisted(&path);
        assert_eq!(
            restored.session().unwrap().authorization(),
            "Bearer persisted",
        );

        restored.invalidate();
        assert!(!path.exists());
        assert!(Store::persisted(&path).session().is_none());
        restored.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn persists_token_for_owner_only() {
        use std::os::unix::fs::PermissionsExt as _;

        let path = env::temp_dir()
            .join(format!("prm-session-mode-test-{}", process::id()));
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))
            .unwrap();

        let store = Store::persisted(&path);
        store.authenticate(session("secret")).unwrap();

        let meta = fs::metadata(&path).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "secret");

        store.clear().unwrap();
    }
}
