//! Credential persistence behind a small trait, so transport logic never
//! touches storage directly and tests can inject an in-memory fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;
use tokio::fs;
use tracing::debug;

/// The persisted shape: exactly the two storage keys the web dashboard keeps
/// in browser storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn access_token(&self) -> Option<String>;
    async fn refresh_token(&self) -> Option<String>;
    /// Persist a new access token. `refresh` replaces the stored refresh
    /// token when the backend rotates it; `None` keeps the existing one.
    async fn store(&self, access: &str, refresh: Option<&str>) -> io::Result<()>;
    /// Drop both tokens.
    async fn clear(&self) -> io::Result<()>;
}

/// JSON-file-backed store, the default for the CLI.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> StoredTokens {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                debug!(path = ?self.path, error = %e, "Credentials file is not valid JSON, treating as empty.");
                StoredTokens::default()
            }),
            Err(_) => StoredTokens::default(),
        }
    }

    async fn write(&self, tokens: &StoredTokens) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(tokens)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, contents).await
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Option<String> {
        self.read().await.access_token
    }

    async fn refresh_token(&self) -> Option<String> {
        self.read().await.refresh_token
    }

    async fn store(&self, access: &str, refresh: Option<&str>) -> io::Result<()> {
        let mut tokens = self.read().await;
        tokens.access_token = Some(access.to_string());
        if let Some(refresh) = refresh {
            tokens.refresh_token = Some(refresh.to_string());
        }
        self.write(&tokens).await
    }

    async fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory store for tests and for one-off invocations with `--token`.
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: RwLock<StoredTokens>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            inner: RwLock::new(StoredTokens {
                access_token: access.map(str::to_string),
                refresh_token: refresh.map(str::to_string),
            }),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Option<String> {
        self.inner.read().unwrap().access_token.clone()
    }

    async fn refresh_token(&self) -> Option<String> {
        self.inner.read().unwrap().refresh_token.clone()
    }

    async fn store(&self, access: &str, refresh: Option<&str>) -> io::Result<()> {
        let mut tokens = self.inner.write().unwrap();
        tokens.access_token = Some(access.to_string());
        if let Some(refresh) = refresh {
            tokens.refresh_token = Some(refresh.to_string());
        }
        Ok(())
    }

    async fn clear(&self) -> io::Result<()> {
        *self.inner.write().unwrap() = StoredTokens::default();
        Ok(())
    }
}
