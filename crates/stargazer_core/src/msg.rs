#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Session start: issue the first fetch when the remote view is active.
    Started,
    /// User asked for a specific page; values below 1 clamp to 1.
    PageRequested(i64),
    /// User clicked Next.
    NextPage,
    /// User clicked Prev.
    PrevPage,
    /// User flipped between remote results and the starred subset.
    ModeToggled,
    /// User changed the language tag (empty clears the filter).
    LanguageFilterChanged(String),
    /// User clicked the star button on a visible row.
    StarToggled(crate::RepoId),
    /// Engine completion for a remote request.
    RemoteLoaded {
        request: crate::RequestId,
        result: Result<crate::RemotePage, String>,
    },
}
