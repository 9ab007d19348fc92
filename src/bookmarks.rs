//! In-memory bookmark store
//!
//! Two partitions, repositories and users, each kept in insertion order.
//! Nothing is persisted; the store lives as long as the application.

use crate::backend::types::{Repository, SearchKind, SearchResult, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookmarkError {
    #[error("Cannot bookmark a {found} result under {partition}")]
    KindMismatch {
        partition: SearchKind,
        found: SearchKind,
    },
}

#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    repositories: Vec<Repository>,
    users: Vec<User>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to the `kind` partition.
    ///
    /// Fails when the item belongs to the other partition. Saving an id that
    /// is already present appends a second entry.
    pub fn save(&mut self, kind: SearchKind, item: SearchResult) -> Result<(), BookmarkError> {
        match (kind, item) {
            (SearchKind::Repositories, SearchResult::Repository(repo)) => {
                tracing::info!("Bookmarked repository {} ({})", repo.full_name, repo.id);
                self.repositories.push(repo);
            }
            (SearchKind::Users, SearchResult::User(user)) => {
                tracing::info!("Bookmarked user {} ({})", user.login, user.id);
                self.users.push(user);
            }
            (partition, item) => {
                return Err(BookmarkError::KindMismatch {
                    partition,
                    found: item.kind(),
                });
            }
        }
        Ok(())
    }

    /// Drop every entry with `id` from the `kind` partition. Missing ids are a no-op.
    pub fn remove(&mut self, kind: SearchKind, id: u64) {
        let before = self.len(kind);
        match kind {
            SearchKind::Repositories => self.repositories.retain(|r| r.id != id),
            SearchKind::Users => self.users.retain(|u| u.id != id),
        }
        if self.len(kind) != before {
            tracing::info!("Removed {} bookmark {}", kind, id);
        }
    }

    pub fn is_bookmarked(&self, kind: SearchKind, id: u64) -> bool {
        match kind {
            SearchKind::Repositories => self.repositories.iter().any(|r| r.id == id),
            SearchKind::Users => self.users.iter().any(|u| u.id == id),
        }
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self, kind: SearchKind) -> usize {
        match kind {
            SearchKind::Repositories => self.repositories.len(),
            SearchKind::Users => self.users.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty() && self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::Owner;

    fn repo(id: u64, name: &str) -> SearchResult {
        SearchResult::Repository(Repository {
            id,
            name: name.to_string(),
            full_name: format!("someone/{}", name),
            description: None,
            homepage: None,
            html_url: format!("https://github.com/someone/{}", name),
            language: None,
            owner: Owner {
                login: "someone".to_string(),
                avatar_url: String::new(),
                html_url: "https://github.com/someone".to_string(),
            },
            stargazers_count: 0,
            open_issues_count: 0,
        })
    }

    fn user(id: u64, login: &str) -> SearchResult {
        SearchResult::User(User {
            id,
            login: login.to_string(),
            avatar_url: String::new(),
            html_url: format!("https://github.com/{}", login),
            account_type: "User".to_string(),
        })
    }

    #[test]
    fn test_save_then_remove() {
        let mut store = BookmarkStore::new();
        store.save(SearchKind::Repositories, repo(1, "react")).unwrap();
        assert!(store.is_bookmarked(SearchKind::Repositories, 1));

        store.remove(SearchKind::Repositories, 1);
        assert!(!store.is_bookmarked(SearchKind::Repositories, 1));
        assert!(store.is_empty());
    }

    #[test]
    fn test_partitions_are_independent() {
        let mut store = BookmarkStore::new();
        store.save(SearchKind::Users, user(1, "octocat")).unwrap();
        assert!(store.is_bookmarked(SearchKind::Users, 1));
        assert!(!store.is_bookmarked(SearchKind::Repositories, 1));

        store.remove(SearchKind::Repositories, 1);
        assert!(store.is_bookmarked(SearchKind::Users, 1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = BookmarkStore::new();
        store.remove(SearchKind::Users, 42);
        assert!(store.is_empty());

        store.save(SearchKind::Users, user(1, "a")).unwrap();
        store.remove(SearchKind::Users, 42);
        assert_eq!(store.len(SearchKind::Users), 1);
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut store = BookmarkStore::new();
        for (id, name) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
            store.save(SearchKind::Repositories, repo(id, name)).unwrap();
        }
        store.remove(SearchKind::Repositories, 2);

        let names: Vec<&str> = store.repositories().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_save_into_wrong_partition_fails() {
        let mut store = BookmarkStore::new();
        let err = store.save(SearchKind::Repositories, user(5, "x")).unwrap_err();
        assert_eq!(
            err,
            BookmarkError::KindMismatch {
                partition: SearchKind::Repositories,
                found: SearchKind::Users,
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_save_then_single_remove() {
        let mut store = BookmarkStore::new();
        store.save(SearchKind::Users, user(9, "dup")).unwrap();
        store.save(SearchKind::Users, user(9, "dup")).unwrap();
        assert_eq!(store.len(SearchKind::Users), 2);

        store.remove(SearchKind::Users, 9);
        assert!(!store.is_bookmarked(SearchKind::Users, 9));
    }

    #[test]
    fn test_membership_follows_last_operation() {
        // (kind, id, save?) applied in order; membership must match the last op per key
        let ops = [
            (SearchKind::Repositories, 1, true),
            (SearchKind::Users, 1, true),
            (SearchKind::Repositories, 2, true),
            (SearchKind::Repositories, 1, false),
            (SearchKind::Users, 2, false),
            (SearchKind::Repositories, 1, true),
            (SearchKind::Users, 1, false),
        ];
        let mut store = BookmarkStore::new();
        let mut expected = std::collections::HashMap::new();
        for (kind, id, save) in ops {
            if save {
                let item = match kind {
                    SearchKind::Repositories => repo(id, "r"),
                    SearchKind::Users => user(id, "u"),
                };
                store.save(kind, item).unwrap();
            } else {
                store.remove(kind, id);
            }
            expected.insert((kind, id), save);
        }
        for ((kind, id), present) in expected {
            assert_eq!(store.is_bookmarked(kind, id), present, "{} {}", kind, id);
        }
    }
}
