pub mod persist;
pub mod repository;
pub mod serializer;
pub mod store;

pub use persist::{Persistable, Restore, Restorer};
pub use repository::{Repository, RepositoryConfig};
pub use serializer::{JsonSerializer, Serializer};
pub use store::BlobStore;
