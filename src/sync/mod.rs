//! Entry synchronization: remote capability, local cache, and the engine
//! that reconciles them under the online/offline duality.

mod cache;
mod engine;
mod remote;

pub use cache::{CacheError, LocalCache};
pub use engine::{SyncEngine, SyncError, SyncMode};
pub use remote::{HttpRemote, ListFilter, RemoteError, RemoteStore};
