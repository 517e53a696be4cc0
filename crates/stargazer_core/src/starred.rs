use crate::paging::{has_more, slice_bounds};
use crate::{Repo, RepoId};

/// The user's starred repositories, at most one entry per id.
///
/// Entries keep insertion order; presentation order comes from [`StarredSet::page`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StarredSet {
    repos: Vec<Repo>,
}

/// One locally computed page over the starred set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalPage {
    pub items: Vec<Repo>,
    pub total_count: u64,
    pub has_more: bool,
}

impl StarredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from persisted entries, keeping the first entry for a repeated id.
    pub fn from_repos(repos: Vec<Repo>) -> Self {
        let mut set = Self::new();
        for repo in repos {
            if !set.contains(repo.id) {
                set.repos.push(repo);
            }
        }
        set
    }

    pub fn contains(&self, id: RepoId) -> bool {
        self.repos.iter().any(|repo| repo.id == id)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Entries in insertion order.
    pub fn repos(&self) -> &[Repo] {
        &self.repos
    }

    pub fn ids(&self) -> impl Iterator<Item = RepoId> + '_ {
        self.repos.iter().map(|repo| repo.id)
    }

    /// Returns the set with `repo` added when absent or removed when present.
    pub fn toggle(&self, repo: &Repo) -> StarredSet {
        let repos = if self.contains(repo.id) {
            self.repos
                .iter()
                .filter(|entry| entry.id != repo.id)
                .cloned()
                .collect()
        } else {
            let mut repos = self.repos.clone();
            repos.push(repo.clone());
            repos
        };
        StarredSet { repos }
    }

    /// Filters by exact language, sorts by stars descending and slices one page.
    ///
    /// An empty `language_filter` keeps every entry. Pages past the end
    /// yield an empty slice. The set itself is left untouched.
    pub fn page(&self, page: u32, language_filter: &str, page_size: u32) -> LocalPage {
        let mut filtered: Vec<&Repo> = self
            .repos
            .iter()
            .filter(|repo| {
                language_filter.is_empty() || repo.language.as_deref() == Some(language_filter)
            })
            .collect();
        // Stable: equal star counts keep their filtered order.
        filtered.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));

        let total_count = filtered.len() as u64;
        let (start, end) = slice_bounds(page, page_size, filtered.len());
        LocalPage {
            items: filtered[start..end].iter().map(|repo| (*repo).clone()).collect(),
            total_count,
            has_more: has_more(page, page_size, total_count),
        }
    }
}
