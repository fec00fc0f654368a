use crate::persist::{Persistable, Restore};
use crate::serializer::{JsonSerializer, Serializer};
use crate::store::BlobStore;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("store error: {0}")]
    Store(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("serializer error: {0}")]
    Serializer(Box<dyn std::error::Error + Send + Sync + 'static>),
}

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, Default)]
pub struct RepositoryConfig {
    /// Prepended to every object key, to share one store between several repositories.
    pub key_prefix: Option<String>,
}

/// Routes [`Persistable`] objects into a [`BlobStore`] under their own keys,
/// and back out through the matching [`Restore`] registry object.
pub struct Repository<S, Z = JsonSerializer> {
    store: S,
    serializer: Z,
    config: RepositoryConfig,
}

impl<S> Repository<S> {
    pub fn new(store: S, config: RepositoryConfig) -> Self {
        Self::with_serializer(store, JsonSerializer, config)
    }
}

impl<S, Z> Repository<S, Z> {
    pub fn with_serializer(store: S, serializer: Z, config: RepositoryConfig) -> Self {
        Self { store, serializer, config }
    }
    pub fn store(&self) -> &S {
        &self.store
    }
    fn storage_key(&self, key: &str) -> String {
        match &self.config.key_prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key.to_string(),
        }
    }
}

impl<S, Z> Repository<S, Z>
where
    S: BlobStore,
    Z: Serializer,
{
    pub async fn save<T>(&self, value: &T) -> Result<()>
    where
        T: Persistable,
    {
        let key = self.storage_key(value.key());
        let data =
            value.persist_with(&self.serializer).map_err(|e| Error::Serializer(Box::new(e)))?;
        self.store.write(&key, data).await.map_err(|e| Error::Store(Box::new(e)))?;
        tracing::debug!(%key, "saved persistable");
        Ok(())
    }
    pub async fn get<R>(&self, restore: &R) -> Result<Option<R::Output>>
    where
        R: Restore,
    {
        let key = self.storage_key(restore.key());
        let data = self.store.read(&key).await.map_err(|e| Error::Store(Box::new(e)))?;
        tracing::trace!(%key, found = data.is_some(), "looked up persistable");
        restore
            .restore_with(&self.serializer, data.as_deref())
            .map_err(|e| Error::Serializer(Box::new(e)))
    }
    pub async fn remove<R>(&self, restore: &R) -> Result<()>
    where
        R: Restore,
    {
        let key = self.storage_key(restore.key());
        self.store.remove(&key).await.map_err(|e| Error::Store(Box::new(e)))?;
        tracing::debug!(%key, "removed persistable");
        Ok(())
    }
    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await.map_err(|e| Error::Store(Box::new(e)))?;
        tracing::debug!("cleared repository");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::Restorer;
    use crate::store::memory::MemoryBlobStore;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    struct Grant {
        code: String,
    }

    impl Persistable for Grant {
        fn key(&self) -> &'static str {
            GRANT.key()
        }
    }

    const GRANT: Restorer<Grant> = Restorer::new("Grant");

    #[tokio::test]
    async fn test_save_get_remove() {
        let repository = Repository::new(MemoryBlobStore::default(), RepositoryConfig::default());
        assert_eq!(repository.get(&GRANT).await.expect("get should succeed"), None);

        let grant = Grant { code: String::from("abc") };
        repository.save(&grant).await.expect("save should succeed");
        assert_eq!(
            repository.store().read("Grant").await.expect("read should succeed").as_deref(),
            Some(r#"{"code":"abc"}"#)
        );
        assert_eq!(repository.get(&GRANT).await.expect("get should succeed"), Some(grant));

        repository.remove(&GRANT).await.expect("remove should succeed");
        assert_eq!(repository.get(&GRANT).await.expect("get should succeed"), None);
    }

    #[tokio::test]
    async fn test_key_prefix() {
        let store = MemoryBlobStore::default();
        let repository = Repository::new(
            store.clone(),
            RepositoryConfig { key_prefix: Some(String::from("user1:")) },
        );
        repository.save(&Grant { code: String::from("abc") }).await.expect("save should succeed");
        assert_eq!(store.keys(), ["user1:Grant"]);

        let other = Repository::new(store, RepositoryConfig::default());
        assert_eq!(other.get(&GRANT).await.expect("get should succeed"), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryBlobStore::default();
        let repository = Repository::new(store.clone(), RepositoryConfig::default());
        repository.save(&Grant { code: String::from("abc") }).await.expect("save should succeed");
        assert_eq!(store.keys(), ["Grant"]);
        repository.clear().await.expect("clear should succeed");
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_blob() {
        let store = MemoryBlobStore::default();
        store.write("Grant", String::from("not json")).await.expect("write should succeed");
        let repository = Repository::new(store, RepositoryConfig::default());
        let err = repository.get(&GRANT).await.expect_err("expected to fail");
        assert!(matches!(err, Error::Serializer(_)));
    }
}
