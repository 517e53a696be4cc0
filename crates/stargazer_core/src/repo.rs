use serde::{Deserialize, Serialize};

pub type RepoId = u64;

/// A repository record as returned by the search service.
///
/// Identity is `id`; the record is never mutated once obtained. Unknown
/// fields in the service payload are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: RepoId,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
}
