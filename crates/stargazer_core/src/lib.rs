//! Stargazer core: pure paging, starring and view state machine.
mod effect;
mod msg;
mod paging;
mod remote;
mod repo;
mod starred;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use paging::{has_more, initial_page, DEFAULT_PAGE_SIZE};
pub use remote::{RemotePage, RemoteQuery, RemoteState, RequestId};
pub use repo::{Repo, RepoId};
pub use starred::{LocalPage, StarredSet};
pub use state::{AppOptions, AppState, ViewMode, ViewState, VisiblePage};
pub use update::update;
pub use view_model::{AppViewModel, ContentView, RepoRowView, EMPTY_DEFAULT, EMPTY_STARRED_PAGE};
