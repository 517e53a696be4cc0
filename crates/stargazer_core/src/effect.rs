use crate::{RemoteQuery, Repo, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a remote search; its completion comes back as `Msg::RemoteLoaded`.
    FetchRemote { request: RequestId, query: RemoteQuery },
    /// Cancel a superseded or no longer wanted remote search.
    CancelFetch { request: RequestId },
    /// Overwrite persisted storage with the full starred set, in insertion order.
    PersistStarred(Vec<Repo>),
    /// Write the current page back to the page-number carrier.
    PageChanged(u32),
}
