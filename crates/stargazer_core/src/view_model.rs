use crate::{AppState, RepoId, ViewMode};

pub const EMPTY_DEFAULT: &str = "No repositories found.";
pub const EMPTY_STARRED_PAGE: &str =
    "You don't have any starred repositories on this page. Try the previous page.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub mode: ViewMode,
    pub page: u32,
    pub language_filter: String,
    pub content: ContentView,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    /// Pagination controls are hidden while loading or showing an error.
    pub show_pagination: bool,
    pub total_count: u64,
    pub starred_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Loading,
    Error(String),
    Empty(String),
    Table(Vec<RepoRowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRowView {
    pub id: RepoId,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub starred: bool,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let view = state.view_state();
        let visible = state.visible();
        let loading = state.loading();
        let error = state.error();

        let content = if loading {
            ContentView::Loading
        } else if let Some(message) = error {
            ContentView::Error(message.to_string())
        } else if visible.items().is_empty() {
            let message = if view.mode == ViewMode::Starred && view.page > 1 {
                EMPTY_STARRED_PAGE
            } else {
                EMPTY_DEFAULT
            };
            ContentView::Empty(message.to_string())
        } else {
            let starred = state.starred();
            ContentView::Table(
                visible
                    .items()
                    .iter()
                    .map(|repo| RepoRowView {
                        id: repo.id,
                        full_name: repo.full_name.clone(),
                        html_url: repo.html_url.clone(),
                        description: repo.description.clone(),
                        language: repo.language.clone(),
                        stars: repo.stargazers_count,
                        starred: starred.contains(repo.id),
                    })
                    .collect(),
            )
        };

        Self {
            mode: view.mode,
            page: view.page,
            language_filter: view.language_filter.clone(),
            content,
            has_prev_page: view.page > 1,
            has_next_page: visible.has_next_page(),
            show_pagination: !loading && error.is_none(),
            total_count: visible.total_count(),
            starred_count: state.starred().len(),
        }
    }
}
