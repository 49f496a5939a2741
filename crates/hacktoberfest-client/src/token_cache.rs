//! On-disk cache for the OAuth credential
//!
//! A credential file is trusted as-is: there is no expiry check and no call
//! to GitHub to validate it. Delete the file to force re-authorization.

use crate::oauth::{Authorizer, Credential};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached credential, or authorize and persist a new one
    pub async fn obtain<A>(&self, authorizer: &A) -> Result<Credential>
    where
        A: Authorizer + ?Sized,
    {
        if let Some(credential) = self.load() {
            debug!("Using cached token from {}", self.path.display());
            return Ok(credential);
        }

        info!("No usable cached token, starting authorization");
        let credential = authorizer
            .authorize()
            .await
            .context("GitHub authorization failed")?;

        self.save(&credential)?;
        Ok(credential)
    }

    /// Read the credential file
    ///
    /// Anything other than a readable file holding a credential yields `None`.
    pub fn load(&self) -> Option<Credential> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!("Ignoring invalid token file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Write the credential as JSON, creating parent directories
    pub fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(credential)?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to create token file {}", self.path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write token file {}", self.path.display()))?;

        info!("Saved token to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::AuthError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    /// Authorizer that hands out a fixed result and counts calls
    #[derive(Clone)]
    struct MockAuthorizer {
        token: Option<&'static str>,
        call_count: Arc<Mutex<usize>>,
    }

    impl MockAuthorizer {
        fn granting(token: &'static str) -> Self {
            Self {
                token: Some(token),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        fn denying() -> Self {
            Self {
                token: None,
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl Authorizer for MockAuthorizer {
        async fn authorize(&self) -> Result<Credential, AuthError> {
            *self.call_count.lock().unwrap() += 1;
            match self.token {
                Some(token) => Ok(Credential::bearer(token)),
                None => Err(AuthError::Denied("access_denied".to_string())),
            }
        }
    }

    fn cache_in(dir: &tempfile::TempDir) -> TokenCache {
        TokenCache::new(dir.path().join(".config/hacktoberfest-cli/.token.json"))
    }

    #[tokio::test]
    async fn test_cached_token_skips_authorization() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        std::fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
        std::fs::write(cache.path(), r#"{"access_token":"cached","token_type":"bearer"}"#).unwrap();

        let authorizer = MockAuthorizer::granting("fresh");
        let credential = cache.obtain(&authorizer).await.unwrap();

        assert_eq!(credential.access_token, "cached");
        assert_eq!(authorizer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_token_authorizes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);

        let authorizer = MockAuthorizer::granting("fresh");
        let credential = cache.obtain(&authorizer).await.unwrap();

        assert_eq!(credential.access_token, "fresh");
        assert_eq!(authorizer.call_count(), 1);

        let written = std::fs::read_to_string(cache.path()).unwrap();
        let persisted: Credential = serde_json::from_str(&written).unwrap();
        assert_eq!(persisted, credential);
    }

    #[tokio::test]
    async fn test_second_run_reuses_persisted_token() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let authorizer = MockAuthorizer::granting("fresh");

        cache.obtain(&authorizer).await.unwrap();
        let again = cache.obtain(&authorizer).await.unwrap();

        assert_eq!(again.access_token, "fresh");
        assert_eq!(authorizer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_token_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        std::fs::create_dir_all(cache.path().parent().unwrap()).unwrap();
        std::fs::write(cache.path(), "{not json").unwrap();

        let authorizer = MockAuthorizer::granting("fresh");
        let credential = cache.obtain(&authorizer).await.unwrap();

        assert_eq!(credential.access_token, "fresh");
        assert_eq!(authorizer.call_count(), 1);
        assert_eq!(cache.load(), Some(credential));
    }

    #[tokio::test]
    async fn test_failed_authorization_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);

        let authorizer = MockAuthorizer::denying();
        let result = cache.obtain(&authorizer).await;

        assert!(result.is_err());
        assert!(!cache.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.save(&Credential::bearer("secret")).unwrap();

        let mode = std::fs::metadata(cache.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
