//! Typed model of GitHub search results
//!
//! Only the fields the search and bookmark views consume are decoded; the
//! rest of each API object is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which search endpoint to hit, and which bookmark partition a result lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchKind {
    #[default]
    Repositories,
    Users,
}

impl SearchKind {
    pub const ALL: [SearchKind; 2] = [SearchKind::Repositories, SearchKind::Users];

    /// Path segment used by `/search/{kind}`
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Repositories => "repositories",
            SearchKind::Users => "users",
        }
    }

    /// Short label for the type toggle
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Repositories => "Repos",
            SearchKind::Users => "Users",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type name outside `{repositories, users}`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown type \"{0}\" (expected repositories or users)")]
pub struct UnknownKind(pub String);

impl FromStr for SearchKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "repositories" | "repos" | "repo" => Ok(SearchKind::Repositories),
            "users" | "user" => Ok(SearchKind::Users),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

/// Owner of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

/// Item of `/search/repositories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub owner: Owner,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
}

/// Item of `/search/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    pub html_url: String,
    /// "User" or "Organization"
    #[serde(rename = "type", default)]
    pub account_type: String,
}

/// Envelope of every search response; `total_count` and friends are ignored
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub items: Vec<T>,
}

/// One search hit, tagged by the endpoint it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Repository(Repository),
    User(User),
}

impl SearchResult {
    pub fn id(&self) -> u64 {
        match self {
            SearchResult::Repository(repo) => repo.id,
            SearchResult::User(user) => user.id,
        }
    }

    pub fn kind(&self) -> SearchKind {
        match self {
            SearchResult::Repository(_) => SearchKind::Repositories,
            SearchResult::User(_) => SearchKind::Users,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SearchResult::Repository(repo) => &repo.name,
            SearchResult::User(user) => &user.login,
        }
    }
}
