//! The contract between persistable objects and the store that keeps them.
//!
//! A type that can be written to storage implements [`Persistable`]. Its companion
//! registry object implements [`Restore`] and carries the same key, so a stored blob
//! can be routed back to the code that knows how to rebuild it.
use crate::serializer::{JsonSerializer, Serializer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

pub trait Persistable: Serialize {
    /// The stable identifier this object is stored under.
    fn key(&self) -> &'static str;

    fn persist_with<S>(&self, serializer: &S) -> Result<String, S::Error>
    where
        S: Serializer,
    {
        serializer.to_string(self)
    }
    fn persist(&self) -> Result<String, serde_json::Error> {
        self.persist_with(&JsonSerializer)
    }
}

pub trait Restore {
    type Output;

    /// The stable identifier shared with the [`Persistable`] this restores.
    fn key(&self) -> &'static str;

    /// Rebuilds an object from its stored form. `None` input restores to `None`.
    fn restore_with<S>(
        &self,
        serializer: &S,
        data: Option<&str>,
    ) -> Result<Option<Self::Output>, S::Error>
    where
        S: Serializer;
    fn restore(&self, data: Option<&str>) -> Result<Option<Self::Output>, serde_json::Error> {
        self.restore_with(&JsonSerializer, data)
    }
}

/// A [`Restore`] registry object for any deserializable type.
pub struct Restorer<T> {
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Restorer<T> {
    pub const fn new(key: &'static str) -> Self {
        Self { key, _marker: PhantomData }
    }
}

impl<T> Clone for Restorer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Restorer<T> {}

impl<T> Debug for Restorer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Restorer").field("key", &self.key).finish()
    }
}

impl<T> Restore for Restorer<T>
where
    T: DeserializeOwned,
{
    type Output = T;

    fn key(&self) -> &'static str {
        self.key
    }
    fn restore_with<S>(&self, serializer: &S, data: Option<&str>) -> Result<Option<T>, S::Error>
    where
        S: Serializer,
    {
        data.map(|data| serializer.from_str(data)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const KEY: &str = "Sample";

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
    struct Sample {
        name: String,
        value: Option<u32>,
    }

    impl Persistable for Sample {
        fn key(&self) -> &'static str {
            KEY
        }
    }

    const RESTORE: Restorer<Sample> = Restorer::new(KEY);

    // Writes everything upper-cased, to prove the injected serializer is used.
    struct ShoutingSerializer;

    impl Serializer for ShoutingSerializer {
        type Error = serde_json::Error;

        fn to_string<T>(&self, value: &T) -> Result<String, Self::Error>
        where
            T: Serialize + ?Sized,
        {
            serde_json::to_string(value).map(|s| s.to_uppercase())
        }
        fn from_str<T>(&self, data: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            serde_json::from_str(&data.to_lowercase())
        }
    }

    #[test]
    fn test_keys_match() {
        let sample = Sample { name: String::from("a"), value: None };
        assert_eq!(sample.key(), RESTORE.key());
    }

    #[test]
    fn test_restore_none() {
        assert!(RESTORE.restore(None).expect("restore should succeed").is_none());
        assert!(RESTORE
            .restore_with(&ShoutingSerializer, None)
            .expect("restore should succeed")
            .is_none());
    }

    #[test]
    fn test_persist_restore() {
        let sample = Sample { name: String::from("abc"), value: Some(7) };
        let data = sample.persist().expect("persist should succeed");
        assert_eq!(data, r#"{"name":"abc","value":7}"#);
        assert_eq!(RESTORE.restore(Some(&data)).expect("restore should succeed"), Some(sample));
    }

    #[test]
    fn test_persist_restore_with_serializer() {
        let sample = Sample { name: String::from("abc"), value: None };
        let data = sample.persist_with(&ShoutingSerializer).expect("persist should succeed");
        assert_eq!(data, r#"{"NAME":"ABC","VALUE":NULL}"#);
        assert_eq!(
            RESTORE.restore_with(&ShoutingSerializer, Some(&data)).expect("restore should succeed"),
            Some(sample)
        );
    }

    #[test]
    fn test_restore_invalid() {
        assert!(RESTORE.restore(Some("{")).is_err());
        assert!(RESTORE.restore(Some(r#"{"value":1}"#)).is_err());
    }
}
