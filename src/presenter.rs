//! Result cards
//!
//! Turns one search hit plus its bookmark status into a display model, and
//! implements the bookmark/remove toggle behind the card's button. Both the
//! GUI and the `search` command render from [`ResultCard`].

use std::fmt;

use crate::backend::types::{SearchKind, SearchResult};
use crate::bookmarks::{BookmarkError, BookmarkStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    /// Shown next to the title; users only
    pub avatar_url: Option<String>,
    pub links: Vec<Link>,
    /// Label/value pairs shown in the info row
    pub details: Vec<(&'static str, String)>,
    pub bookmarked: bool,
}

impl ResultCard {
    pub fn toggle_label(&self) -> &'static str {
        if self.bookmarked {
            "Remove"
        } else {
            "Bookmark"
        }
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let badge = if self.bookmarked { " [bookmarked]" } else { "" };
        writeln!(f, "{}{}", self.title, badge)?;
        if let Some(description) = &self.description {
            writeln!(f, "  {}", description)?;
        }
        for link in &self.links {
            writeln!(f, "  {}: {}", link.label, link.url)?;
        }
        let details: Vec<String> = self
            .details
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect();
        write!(f, "  {}", details.join(" | "))
    }
}

fn link(label: impl Into<String>, url: &str) -> Link {
    Link {
        label: label.into(),
        url: url.to_string(),
    }
}

pub fn present(result: &SearchResult, is_bookmarked: bool) -> ResultCard {
    match result {
        SearchResult::Repository(repo) => {
            let mut links = vec![link("Repo", &repo.html_url)];
            if let Some(homepage) = repo.homepage.as_deref().filter(|h| !h.is_empty()) {
                links.push(link("Homepage", homepage));
            }
            let owner_url = if repo.owner.html_url.is_empty() {
                &repo.html_url
            } else {
                &repo.owner.html_url
            };
            links.push(link(format!("By {}", repo.owner.login), owner_url));

            ResultCard {
                id: repo.id,
                title: repo.name.clone(),
                description: repo.description.clone().filter(|d| !d.is_empty()),
                avatar_url: None,
                links,
                details: vec![
                    ("Language", repo.language.clone().unwrap_or_default()),
                    ("Stars", repo.stargazers_count.to_string()),
                    ("Open Issues", repo.open_issues_count.to_string()),
                ],
                bookmarked: is_bookmarked,
            }
        }
        SearchResult::User(user) => ResultCard {
            id: user.id,
            title: user.login.clone(),
            description: None,
            avatar_url: Some(user.avatar_url.clone()).filter(|url| !url.is_empty()),
            links: vec![link("Profile", &user.html_url)],
            details: vec![("Type", user.account_type.clone())],
            bookmarked: is_bookmarked,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Saved,
    Removed,
}

/// Flip the bookmark status of `result` in the `kind` partition.
///
/// Membership is read from the store at call time, not from the last render.
pub fn toggle(
    store: &mut BookmarkStore,
    kind: SearchKind,
    result: &SearchResult,
) -> Result<Toggled, BookmarkError> {
    if store.is_bookmarked(kind, result.id()) {
        store.remove(kind, result.id());
        Ok(Toggled::Removed)
    } else {
        store.save(kind, result.clone())?;
        Ok(Toggled::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::{Owner, Repository, User};

    fn react() -> SearchResult {
        SearchResult::Repository(Repository {
            id: 10270250,
            name: "react".to_string(),
            full_name: "facebook/react".to_string(),
            description: Some("UI library".to_string()),
            homepage: Some("https://react.dev".to_string()),
            html_url: "https://github.com/facebook/react".to_string(),
            language: Some("JavaScript".to_string()),
            owner: Owner {
                login: "facebook".to_string(),
                avatar_url: String::new(),
                html_url: "https://github.com/facebook".to_string(),
            },
            stargazers_count: 230000,
            open_issues_count: 900,
        })
    }

    fn octocat() -> SearchResult {
        SearchResult::User(User {
            id: 583231,
            login: "octocat".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/583231?v=4".to_string(),
            html_url: "https://github.com/octocat".to_string(),
            account_type: "User".to_string(),
        })
    }

    #[test]
    fn test_repository_card() {
        let card = present(&react(), false);
        assert_eq!(card.title, "react");
        assert_eq!(card.description.as_deref(), Some("UI library"));
        let labels: Vec<&str> = card.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Repo", "Homepage", "By facebook"]);
        assert_eq!(
            card.details,
            vec![
                ("Language", "JavaScript".to_string()),
                ("Stars", "230000".to_string()),
                ("Open Issues", "900".to_string()),
            ]
        );
        assert_eq!(card.toggle_label(), "Bookmark");
        assert!(card.avatar_url.is_none());
    }

    #[test]
    fn test_missing_language_is_blank() {
        let mut result = react();
        if let SearchResult::Repository(repo) = &mut result {
            repo.language = None;
        }
        let card = present(&result, false);
        assert_eq!(card.details[0], ("Language", String::new()));
    }

    #[test]
    fn test_user_without_avatar() {
        let mut result = octocat();
        if let SearchResult::User(user) = &mut result {
            user.avatar_url.clear();
        }
        assert!(present(&result, false).avatar_url.is_none());
    }

    #[test]
    fn test_empty_homepage_has_no_link() {
        let mut result = react();
        if let SearchResult::Repository(repo) = &mut result {
            repo.homepage = Some(String::new());
        }
        let card = present(&result, false);
        assert!(card.links.iter().all(|l| l.label != "Homepage"));
    }

    #[test]
    fn test_user_card() {
        let card = present(&octocat(), true);
        assert_eq!(card.title, "octocat");
        assert_eq!(
            card.avatar_url.as_deref(),
            Some("https://avatars.githubusercontent.com/u/583231?v=4")
        );
        assert_eq!(card.links, vec![link("Profile", "https://github.com/octocat")]);
        assert_eq!(card.details, vec![("Type", "User".to_string())]);
        assert_eq!(card.toggle_label(), "Remove");
    }

    #[test]
    fn test_card_text() {
        let text = present(&octocat(), true).to_string();
        assert!(text.starts_with("octocat [bookmarked]\n"));
        assert!(text.ends_with("Type: User"));
    }

    #[test]
    fn test_toggle_saves_then_removes() {
        let mut store = BookmarkStore::new();
        let result = react();

        assert_eq!(toggle(&mut store, SearchKind::Repositories, &result), Ok(Toggled::Saved));
        assert!(store.is_bookmarked(SearchKind::Repositories, result.id()));
        assert!(present(&result, store.is_bookmarked(SearchKind::Repositories, result.id())).bookmarked);

        assert_eq!(toggle(&mut store, SearchKind::Repositories, &result), Ok(Toggled::Removed));
        assert!(!store.is_bookmarked(SearchKind::Repositories, result.id()));
    }

    #[test]
    fn test_toggle_into_wrong_partition_fails() {
        let mut store = BookmarkStore::new();
        assert!(toggle(&mut store, SearchKind::Repositories, &octocat()).is_err());
        assert!(store.is_empty());
    }
}
