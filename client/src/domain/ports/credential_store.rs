//! Port for the persisted client state: bearer token and theme preference.
//!
//! This is the stand-in for browser local storage. Only these two values are
//! persisted; everything else the client holds is session-scoped.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Mutex;

use super::macros::define_port_error;
use crate::sync::lock;

define_port_error! {
    /// Failures raised by credential store adapters.
    pub enum CredentialStoreError {
        /// Underlying storage could not be read or written.
        Io { message: String } =>
            "credential storage i/o failed: {message}",
        /// Stored value was present but unusable.
        Corrupt { message: String } =>
            "credential storage corrupt: {message}",
    }
}

/// Port for persisting the bearer token and the UI theme preference.
///
/// All operations are synchronous; the backing stores are in-process or
/// local-disk only.
pub trait CredentialStore: Send + Sync {
    /// Load the persisted bearer token, if any.
    fn load_token(&self) -> Result<Option<String>, CredentialStoreError>;
    /// Persist the bearer token.
    fn save_token(&self, token: &str) -> Result<(), CredentialStoreError>;
    /// Remove the persisted bearer token. Removing an absent token is a
    /// no-op.
    fn clear_token(&self) -> Result<(), CredentialStoreError>;
    /// Load the persisted theme preference, if any.
    fn load_theme(&self) -> Result<Option<String>, CredentialStoreError>;
    /// Persist the theme preference.
    fn save_theme(&self, theme: &str) -> Result<(), CredentialStoreError>;
}

/// Volatile store used in tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
    theme: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load_token(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(lock(&self.token).clone())
    }

    fn save_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        *lock(&self.token) = Some(token.to_owned());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), CredentialStoreError> {
        *lock(&self.token) = None;
        Ok(())
    }

    fn load_theme(&self) -> Result<Option<String>, CredentialStoreError> {
        Ok(lock(&self.theme).clone())
    }

    fn save_theme(&self, theme: &str) -> Result<(), CredentialStoreError> {
        *lock(&self.theme) = Some(theme.to_owned());
        Ok(())
    }
}

const TOKEN_FILE: &str = "token";
const THEME_FILE: &str = "theme";

/// Store backed by one directory on disk, opened through a capability
/// handle so the process can only touch that directory.
#[derive(Debug)]
pub struct DirCredentialStore {
    dir: cap_std::fs::Dir,
}

impl DirCredentialStore {
    /// Open `path` as the credential directory. The directory must exist.
    ///
    /// # Errors
    /// Returns [`CredentialStoreError::Io`] when the directory cannot be
    /// opened.
    pub fn open(path: &Path) -> Result<Self, CredentialStoreError> {
        let dir = cap_std::fs::Dir::open_ambient_dir(path, cap_std::ambient_authority())
            .map_err(|err| CredentialStoreError::io(err.to_string()))?;
        Ok(Self { dir })
    }

    fn read_value(&self, name: &str) -> Result<Option<String>, CredentialStoreError> {
        match self.dir.read_to_string(name) {
            Ok(value) => Ok(Some(value.trim_end().to_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CredentialStoreError::io(err.to_string())),
        }
    }

    fn write_value(&self, name: &str, value: &str) -> Result<(), CredentialStoreError> {
        self.dir
            .write(name, value.as_bytes())
            .map_err(|err| CredentialStoreError::io(err.to_string()))
    }
}

impl CredentialStore for DirCredentialStore {
    fn load_token(&self) -> Result<Option<String>, CredentialStoreError> {
        self.read_value(TOKEN_FILE)
    }

    fn save_token(&self, token: &str) -> Result<(), CredentialStoreError> {
        self.write_value(TOKEN_FILE, token)
    }

    fn clear_token(&self) -> Result<(), CredentialStoreError> {
        match self.dir.remove_file(TOKEN_FILE) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CredentialStoreError::io(err.to_string())),
        }
    }

    fn load_theme(&self) -> Result<Option<String>, CredentialStoreError> {
        self.read_value(THEME_FILE)
    }

    fn save_theme(&self, theme: &str) -> Result<(), CredentialStoreError> {
        self.write_value(THEME_FILE, theme)
    }
}
