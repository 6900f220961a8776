//! On-disk storage for binary assets.
//!
//! Assets live under `<root>/<namespace>/<key>`. Entity assets use the key
//! `<entityId>.<extension>`, thumbnails append the rendering parameters:
//! `<entityId>_w<width>_q<quality>.<format>`.

use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Avatars,
    Media,
    Products,
    Places,
    Thumbnails,
}

impl Namespace {
    pub const ALL: [Namespace; 5] = [
        Namespace::Avatars,
        Namespace::Media,
        Namespace::Products,
        Namespace::Places,
        Namespace::Thumbnails,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Avatars => "avatars",
            Namespace::Media => "media",
            Namespace::Products => "products",
            Namespace::Places => "places",
            Namespace::Thumbnails => "thumbnails",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|namespace| namespace.as_str() == s)
            .ok_or_else(|| StorageError::UnknownNamespace(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unknown storage namespace `{0}`")]
    UnknownNamespace(String),
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn entity_key(entity_id: Uuid, extension: &str) -> String {
        format!("{}.{}", entity_id, extension)
    }

    pub fn thumbnail_key(entity_id: Uuid, width: u32, format: &str, quality: u8) -> String {
        format!("{}_w{}_q{}.{}", entity_id, width, quality, format)
    }

    pub fn path(&self, namespace: Namespace, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(namespace.as_str()).join(key))
    }

    pub async fn put(&self, namespace: Namespace, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path(namespace, key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!("Stored {} bytes at {}/{}", bytes.len(), namespace, key);

        Ok(())
    }

    pub async fn get(&self, namespace: Namespace, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path(namespace, key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Missing files are not an error; returns whether something was removed.
    pub async fn remove(&self, namespace: Namespace, key: &str) -> Result<bool, StorageError> {
        let path = self.path(namespace, key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes every rendered thumbnail of an entity.
    pub async fn remove_thumbnails(&self, entity_id: Uuid) -> Result<usize, StorageError> {
        let dir = self.root.join(Namespace::Thumbnails.as_str());
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let prefix = format!("{}_w", entity_id);
        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().starts_with(&prefix) {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key.contains("..")
        || key.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    Ok(())
}

/// Maps an upload content type to the extension used in storage keys.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}
