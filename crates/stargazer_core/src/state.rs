use crate::paging::DEFAULT_PAGE_SIZE;
use crate::view_model::AppViewModel;
use crate::{Effect, LocalPage, RemotePage, RemoteQuery, RemoteState, Repo, RepoId, RequestId, StarredSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Remote,
    Starred,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Remote => ViewMode::Starred,
            ViewMode::Starred => ViewMode::Remote,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// 1-based.
    pub page: u32,
    pub mode: ViewMode,
    /// Empty means no filter.
    pub language_filter: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            mode: ViewMode::Remote,
            language_filter: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub initial_page: u32,
    pub page_size: u32,
    pub language_filter: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            initial_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            language_filter: String::new(),
        }
    }
}

/// The page currently on screen, tagged with the source that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisiblePage {
    Remote(RemotePage),
    Starred(LocalPage),
}

impl VisiblePage {
    pub fn items(&self) -> &[Repo] {
        match self {
            VisiblePage::Remote(page) => &page.items,
            VisiblePage::Starred(page) => &page.items,
        }
    }

    pub fn has_next_page(&self) -> bool {
        match self {
            VisiblePage::Remote(page) => page.has_more,
            VisiblePage::Starred(page) => page.has_more,
        }
    }

    pub fn total_count(&self) -> u64 {
        match self {
            VisiblePage::Remote(page) => page.total_count,
            VisiblePage::Starred(page) => page.total_count,
        }
    }
}

/// View controller state: page, mode and filter plus both sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    view: ViewState,
    page_size: u32,
    starred: StarredSet,
    remote: RemoteState,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppOptions::default(), StarredSet::new())
    }
}

impl AppState {
    pub fn new(options: AppOptions, starred: StarredSet) -> Self {
        Self {
            view: ViewState {
                page: options.initial_page.max(1),
                mode: ViewMode::Remote,
                language_filter: options.language_filter.trim().to_string(),
            },
            page_size: options.page_size.max(1),
            starred,
            remote: RemoteState::new(),
            dirty: true,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn starred(&self) -> &StarredSet {
        &self.starred
    }

    pub fn remote(&self) -> &RemoteState {
        &self.remote
    }

    pub fn visible(&self) -> VisiblePage {
        match self.view.mode {
            ViewMode::Starred => VisiblePage::Starred(self.starred.page(
                self.view.page,
                &self.view.language_filter,
                self.page_size,
            )),
            ViewMode::Remote => VisiblePage::Remote(self.remote.current().clone()),
        }
    }

    pub fn visible_repos(&self) -> Vec<Repo> {
        self.visible().items().to_vec()
    }

    pub fn has_next_page(&self) -> bool {
        self.visible().has_next_page()
    }

    /// True only while the remote source is shown and its live request is pending.
    pub fn loading(&self) -> bool {
        self.view.mode == ViewMode::Remote && self.remote.loading()
    }

    /// The remote source's error, reported only while that source is shown.
    pub fn error(&self) -> Option<&str> {
        match self.view.mode {
            ViewMode::Remote => self.remote.error(),
            ViewMode::Starred => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn remote_query(&self) -> RemoteQuery {
        RemoteQuery {
            page: self.view.page,
            page_size: self.page_size,
            language: self.view.language_filter.clone(),
        }
    }

    pub(crate) fn sync_remote(&mut self) -> Vec<Effect> {
        let query = self.remote_query();
        let active = self.view.mode == ViewMode::Remote;
        let effects = self.remote.sync(&query, active);
        if !effects.is_empty() {
            self.dirty = true;
        }
        effects
    }

    pub(crate) fn set_page(&mut self, page: u32) -> Vec<Effect> {
        let page = page.max(1);
        let mut effects = Vec::new();
        if page != self.view.page {
            self.view.page = page;
            self.dirty = true;
            effects.push(Effect::PageChanged(page));
        }
        effects.extend(self.sync_remote());
        effects
    }

    pub(crate) fn toggle_mode(&mut self) -> Vec<Effect> {
        self.view.mode = self.view.mode.toggled();
        self.dirty = true;
        let mut effects = Vec::new();
        if self.view.page != 1 {
            self.view.page = 1;
            effects.push(Effect::PageChanged(1));
        }
        effects.extend(self.sync_remote());
        effects
    }

    pub(crate) fn set_language_filter(&mut self, language: &str) -> Vec<Effect> {
        let language = language.trim();
        if language == self.view.language_filter {
            return Vec::new();
        }
        self.view.language_filter = language.to_string();
        self.dirty = true;
        self.sync_remote()
    }

    /// Resolves `id` against the visible page only; unknown ids are ignored.
    pub(crate) fn toggle_star(&mut self, id: RepoId) -> Vec<Effect> {
        let visible = self.visible();
        let Some(repo) = visible.items().iter().find(|repo| repo.id == id) else {
            return Vec::new();
        };
        self.starred = self.starred.toggle(repo);
        self.dirty = true;
        vec![Effect::PersistStarred(self.starred.repos().to_vec())]
    }

    pub(crate) fn apply_remote(&mut self, request: RequestId, result: Result<RemotePage, String>) {
        if self.remote.complete(request, result) {
            self.dirty = true;
        }
    }
}
