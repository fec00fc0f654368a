use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;

/// Converts persistable objects to and from their stored string form.
pub trait Serializer {
    type Error: Error + Send + Sync + 'static;

    fn to_string<T>(&self, value: &T) -> Result<String, Self::Error>
    where
        T: Serialize + ?Sized;
    fn from_str<T>(&self, data: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    type Error = serde_json::Error;

    fn to_string<T>(&self, value: &T) -> Result<String, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_string(value)
    }
    fn from_str<T>(&self, data: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(data)
    }
}
