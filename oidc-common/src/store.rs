pub mod memory;

use std::error::Error;
use std::future::Future;

/// Backing storage for persisted objects: serialized blobs addressed by their storage key.
///
/// Implementations only move opaque strings around; turning objects into blobs
/// and back is the job of [`Repository`](crate::Repository).
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait BlobStore {
    type Error: Error + Send + Sync + 'static;

    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, Self::Error>>;
    fn write(&self, key: &str, blob: String) -> impl Future<Output = Result<(), Self::Error>>;
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), Self::Error>>;
    fn clear(&self) -> impl Future<Output = Result<(), Self::Error>>;
}
