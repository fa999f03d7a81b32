//! Credentials persisted between CLI runs in `credentials.toml`.

use std::io::ErrorKind;
use std::path::PathBuf;

use workout_api::{CredentialError, CredentialStore, Credentials};

use crate::config;

/// A [`CredentialStore`] backed by a TOML file written with 0600 permissions.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store under the workout config directory.
    pub fn default_location() -> Self {
        Self::new(config::credentials_path())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, CredentialError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| CredentialError::Format(e.to_string()))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        let contents =
            toml::to_string_pretty(credentials).map_err(|e| CredentialError::Format(e.to_string()))?;
        config::write_private(&self.path, &contents)
            .map_err(|e| CredentialError::Io(std::io::Error::other(format!("{e:#}"))))
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use workout_api::SessionContext;
    use workout_api::models::{AuthResponse, User};

    use super::*;

    fn store(tmp: &tempfile::TempDir) -> FileCredentialStore {
        FileCredentialStore::new(tmp.path().join("workout").join("credentials.toml"))
    }

    #[test]
    fn missing_file_means_signed_out() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert_eq!(store(&tmp).load().unwrap(), None);
        store(&tmp).clear().unwrap();
    }

    #[test]
    fn session_survives_a_restart() {
        let tmp = tempfile::TempDir::new().unwrap();
        let auth = AuthResponse {
            token: "abc".to_string(),
            authenticated: true,
            user: Some(User {
                id: 7,
                full_name: "Ada Lovelace".to_string(),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
        };

        let first = SessionContext::new(Arc::new(store(&tmp)));
        first.sign_in(&auth).unwrap();

        let second = SessionContext::new(Arc::new(store(&tmp)));
        assert_eq!(second.token().as_deref(), Some("abc"));
        assert_eq!(second.user().map(|u| u.username), Some("ada".to_string()));

        second.sign_out().unwrap();
        assert_eq!(store(&tmp).load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn credentials_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let s = store(&tmp);
        s.save(&Credentials {
            token: "t".to_string(),
            user: None,
        })
        .unwrap();

        let meta = std::fs::metadata(tmp.path().join("workout/credentials.toml")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let s = store(&tmp);
        std::fs::create_dir_all(tmp.path().join("workout")).unwrap();
        std::fs::write(tmp.path().join("workout/credentials.toml"), "not = [valid").unwrap();
        assert!(matches!(s.load(), Err(CredentialError::Format(_))));
    }
}
