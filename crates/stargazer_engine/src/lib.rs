//! Stargazer engine: remote search, request cancellation and starred storage.
mod fetcher;
mod persist;
mod search;
mod store;
mod types;

pub use fetcher::{FetchEvents, FetchHandle};
pub use persist::write_atomically;
pub use search::{search_expression, search_url, RepoSearch, ReqwestSearch, SearchSettings};
pub use store::{FileStorage, MemoryStorage, StarredStorage, StarredStore, STARRED_KEY};
pub use types::{FailureKind, FetchError, FetchEvent, StartError, StorageError};
