pub mod error;
pub mod identity_store;
pub mod memory_identity_store;
pub mod sqlite_identity_store;

pub use error::{DbError, Result};
pub use identity_store::{IdentityStore, StoredIdentity};
pub use memory_identity_store::MemoryIdentityStore;
pub use sqlite_identity_store::{MIGRATOR, SqliteIdentityStore};
