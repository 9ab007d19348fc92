//! Core application state and Iced Application implementation
//!
//! Two routes share one bookmark store: the search view (driven by
//! [`SearchController`]) and the bookmarks view. Controller effects are turned
//! into tasks here: the debounce timer is an abortable sleep, a fetch is a
//! request on the shared [`GitHubClient`]. User avatars are downloaded on
//! the same client and cached until the next navigation.

use std::collections::HashMap;

use iced::task::Handle;
use iced::widget::{button, column, container, image, row, scrollable, text, Space};
use iced::{Background, Border, Element, Length, Padding, Task, Theme};

use crate::backend::api::{sized_avatar_url, GitHubClient, SearchError};
use crate::backend::types::{SearchKind, SearchResult};
use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::presenter;
use crate::search::{Effect, FetchRequest, SearchController, SearchDisplay};
use crate::ui::theme::DarkTheme;
use crate::ui::{bookmarks, result_card, search_bar};

/// Edge length requested from the avatar CDN
const AVATAR_SIZE: u32 = 64;

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Search,
    Bookmarks,
}

// ============================================================================
// Application State
// ============================================================================

pub struct GhMarks {
    route: Route,
    store: BookmarkStore,
    search: SearchController,
    client: GitHubClient,
    /// Running debounce timer, aborted whenever the controller supersedes it
    debounce: Option<Handle>,
    /// Decoded avatars by user id, dropped on every navigation
    avatars: HashMap<u64, image::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    TermChanged(String),
    KindSelected(SearchKind),
    DebounceElapsed(u64),
    SearchFinished(u64, Result<Vec<SearchResult>, SearchError>),
    AvatarLoaded(u64, Result<Vec<u8>, SearchError>),
    Retry,
    ToggleBookmark(u64),
    RemoveBookmark(SearchKind, u64),
    OpenUrl(String),
}

impl GhMarks {
    pub fn new(config: &Config, client: GitHubClient) -> Self {
        Self {
            route: Route::default(),
            store: BookmarkStore::new(),
            search: SearchController::new(config.debounce),
            client,
            debounce: None,
            avatars: HashMap::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => {
                if route == self.route {
                    return Task::none();
                }
                tracing::debug!("Navigating to {:?}", route);
                self.route = route;
                self.avatars.clear();
                // Leaving or re-entering the search view starts a new session
                let effect = self.search.reset();
                let timer = self.apply(effect);
                match route {
                    Route::Bookmarks => {
                        let wanted = self
                            .store
                            .users()
                            .iter()
                            .map(|user| (user.id, user.avatar_url.clone()))
                            .collect();
                        Task::batch([timer, self.load_avatars(wanted)])
                    }
                    Route::Search => timer,
                }
            }

            Message::TermChanged(term) => {
                let effect = self.search.set_term(term);
                self.apply(effect)
            }

            Message::KindSelected(kind) => {
                let effect = self.search.set_kind(kind);
                self.apply(effect)
            }

            Message::DebounceElapsed(ticket) => {
                self.debounce = None;
                match self.search.debounce_elapsed(ticket) {
                    Some(request) => self.fetch(request),
                    None => Task::none(),
                }
            }

            Message::SearchFinished(seq, outcome) => {
                if self.search.fetch_finished(seq, outcome) {
                    tracing::debug!(
                        "Search #{} settled as {:?} with {} result(s)",
                        seq,
                        self.search.phase(),
                        self.search.results().len()
                    );
                    let wanted = self
                        .search
                        .results()
                        .iter()
                        .filter_map(|result| {
                            let card = presenter::present(result, false);
                            card.avatar_url.map(|url| (card.id, url))
                        })
                        .collect();
                    return self.load_avatars(wanted);
                }
                Task::none()
            }

            Message::AvatarLoaded(id, outcome) => {
                match outcome {
                    Ok(bytes) if self.shows_user(id) => {
                        self.avatars.insert(id, image::Handle::from_bytes(bytes));
                    }
                    Ok(_) => tracing::debug!("Dropping avatar for user {} no longer shown", id),
                    Err(e) => tracing::debug!("Avatar for user {} failed: {}", id, e),
                }
                Task::none()
            }

            Message::Retry => match self.search.retry() {
                Some(request) => self.fetch(request),
                None => Task::none(),
            },

            Message::ToggleBookmark(id) => {
                let kind = self.search.kind();
                match self.search.find(id) {
                    Some(result) => match presenter::toggle(&mut self.store, kind, result) {
                        Ok(toggled) => tracing::debug!("{:?} {} {}", toggled, kind, result.title()),
                        Err(e) => tracing::warn!("Bookmark rejected: {}", e),
                    },
                    None => tracing::warn!("No result with id {} to bookmark", id),
                }
                Task::none()
            }

            Message::RemoveBookmark(kind, id) => {
                self.store.remove(kind, id);
                Task::none()
            }

            Message::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!("Failed to open {}: {}", url, e);
                }
                Task::none()
            }
        }
    }

    /// Replace the debounce timer according to `effect`.
    fn apply(&mut self, effect: Effect) -> Task<Message> {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
        match effect {
            Effect::Cancel => Task::none(),
            Effect::Schedule { ticket, delay } => {
                let (task, handle) = Task::perform(tokio::time::sleep(delay), move |_| {
                    Message::DebounceElapsed(ticket)
                })
                .abortable();
                self.debounce = Some(handle);
                task
            }
        }
    }

    fn fetch(&self, request: FetchRequest) -> Task<Message> {
        let client = self.client.clone();
        let FetchRequest { seq, kind, term } = request;
        Task::perform(
            async move { client.search(kind, &term).await },
            move |outcome| Message::SearchFinished(seq, outcome),
        )
    }

    /// Download the avatars in `wanted` that are not cached yet.
    fn load_avatars(&self, wanted: Vec<(u64, String)>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = wanted
            .into_iter()
            .filter(|(id, url)| !url.is_empty() && !self.avatars.contains_key(id))
            .map(|(id, url)| {
                let client = self.client.clone();
                let url = sized_avatar_url(&url, AVATAR_SIZE);
                Task::perform(
                    async move { client.fetch_avatar(&url).await },
                    move |outcome| Message::AvatarLoaded(id, outcome),
                )
            })
            .collect();
        Task::batch(tasks)
    }

    /// Whether user `id` is on screen in the current route.
    fn shows_user(&self, id: u64) -> bool {
        match self.route {
            Route::Search => {
                self.search.kind() == SearchKind::Users && self.search.find(id).is_some()
            }
            Route::Bookmarks => self.store.is_bookmarked(SearchKind::Users, id),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = match self.route {
            Route::Search => self.view_search(),
            Route::Bookmarks => bookmarks::view(
                &self.store,
                &self.avatars,
                Message::RemoveBookmark,
                Message::OpenUrl,
            ),
        };

        container(
            column![
                text("GitHub Bookmarks").size(22).color(DarkTheme::TEXT),
                self.view_nav(),
                content,
            ]
            .spacing(14)
            .padding(16)
            .width(Length::Fill)
            .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DarkTheme::BACKGROUND)),
            border: Border {
                color: DarkTheme::BORDER,
                width: 1.0,
                radius: 16.0.into(),
            },
            ..Default::default()
        })
        .into()
    }

    fn view_tab(&self, label: &'static str, route: Route) -> Element<'_, Message> {
        let style: fn(&Theme, button::Status) -> button::Style = if self.route == route {
            button::primary
        } else {
            button::text
        };
        button(text(label).size(15))
            .on_press(Message::Navigate(route))
            .padding(Padding::from([6.0, 12.0]))
            .style(style)
            .into()
    }

    fn view_nav(&self) -> Element<'_, Message> {
        row![
            self.view_tab("Search", Route::Search),
            self.view_tab("Bookmarks", Route::Bookmarks),
            Space::with_width(Length::Fill),
            text(format!(
                "{} repos / {} users saved",
                self.store.len(SearchKind::Repositories),
                self.store.len(SearchKind::Users)
            ))
            .size(12)
            .color(DarkTheme::TEXT_MUTED),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center)
        .into()
    }

    fn view_search(&self) -> Element<'_, Message> {
        let kind = self.search.kind();
        let bar = search_bar::view(self.search.term(), kind, Message::TermChanged, Message::KindSelected);

        let display = self.search.display();
        let status = text(display.message()).size(14).color(DarkTheme::TEXT_MUTED);

        let body: Element<'_, Message> = match display {
            SearchDisplay::Results { items, .. } => {
                let cards: Vec<Element<'_, Message>> = items
                    .iter()
                    .map(|result| {
                        let card = presenter::present(result, self.store.is_bookmarked(kind, result.id()));
                        let avatar = self.avatars.get(&card.id).cloned();
                        result_card::view(&card, avatar, Message::ToggleBookmark(card.id), Message::OpenUrl)
                    })
                    .collect();
                scrollable(column(cards).spacing(8)).height(Length::Fill).into()
            }
            SearchDisplay::Failed { .. } => button(text("Retry").size(14))
                .on_press(Message::Retry)
                .padding(Padding::from([6.0, 14.0]))
                .style(button::secondary)
                .into(),
            SearchDisplay::Prompt | SearchDisplay::Loading | SearchDisplay::NoResults { .. } => {
                Space::with_height(0).into()
            }
        };

        column![bar, status, body].spacing(12).into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::{Owner, Repository, User};

    fn app() -> GhMarks {
        let config = Config::default();
        let client = GitHubClient::new(&config).unwrap();
        GhMarks::new(&config, client)
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

    fn ripgrep() -> SearchResult {
        SearchResult::Repository(Repository {
            id: 50461805,
            name: "ripgrep".to_string(),
            full_name: "BurntSushi/ripgrep".to_string(),
            description: None,
            homepage: None,
            html_url: "https://github.com/BurntSushi/ripgrep".to_string(),
            language: Some("Rust".to_string()),
            owner: Owner {
                login: "BurntSushi".to_string(),
                avatar_url: String::new(),
                html_url: "https://github.com/BurntSushi".to_string(),
            },
            stargazers_count: 50000,
            open_issues_count: 100,
        })
    }

    /// Drive the controller up to an in-flight request and return its seq.
    fn start_search(app: &mut GhMarks, term: &str) -> u64 {
        let Effect::Schedule { ticket, .. } = app.search.set_term(term) else {
            panic!("Expected a scheduled timer for {:?}", term);
        };
        app.search.debounce_elapsed(ticket).unwrap().seq
    }

    #[tokio::test]
    async fn test_toggle_saves_into_selected_kind() {
        let mut app = app();
        let _ = app.update(Message::KindSelected(SearchKind::Users));
        let seq = start_search(&mut app, "octo");
        let _ = app.update(Message::SearchFinished(seq, Ok(vec![octocat()])));

        let _ = app.update(Message::ToggleBookmark(583231));
        assert!(app.store.is_bookmarked(SearchKind::Users, 583231));
        assert_eq!(app.store.len(SearchKind::Repositories), 0);

        let _ = app.update(Message::ToggleBookmark(583231));
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_repository_in_default_kind() {
        let mut app = app();
        let seq = start_search(&mut app, "ripgrep");
        let _ = app.update(Message::SearchFinished(seq, Ok(vec![ripgrep()])));

        let _ = app.update(Message::ToggleBookmark(50461805));
        assert!(app.store.is_bookmarked(SearchKind::Repositories, 50461805));
        assert_eq!(app.store.len(SearchKind::Users), 0);
    }

    #[tokio::test]
    async fn test_response_after_navigate_is_ignored() {
        let mut app = app();
        let seq = start_search(&mut app, "ripgrep");

        let _ = app.update(Message::Navigate(Route::Bookmarks));
        let _ = app.update(Message::Navigate(Route::Search));
        let _ = app.update(Message::SearchFinished(seq, Ok(vec![ripgrep()])));

        assert!(app.search.results().is_empty());
        assert_eq!(app.search.display(), SearchDisplay::Prompt);
        assert_eq!(app.search.term(), "");
    }

    #[tokio::test]
    async fn test_navigate_clears_avatars() {
        let mut app = app();
        let _ = app.update(Message::KindSelected(SearchKind::Users));
        let seq = start_search(&mut app, "octo");
        let _ = app.update(Message::SearchFinished(seq, Ok(vec![octocat()])));

        let _ = app.update(Message::AvatarLoaded(583231, Ok(vec![0u8; 16])));
        assert!(app.avatars.contains_key(&583231));

        let _ = app.update(Message::Navigate(Route::Bookmarks));
        assert!(app.avatars.is_empty());
    }

    #[tokio::test]
    async fn test_avatar_for_hidden_user_is_dropped() {
        let mut app = app();
        let _ = app.update(Message::AvatarLoaded(583231, Ok(vec![0u8; 16])));
        assert!(app.avatars.is_empty());

        let _ = app.update(Message::AvatarLoaded(
            583231,
            Err(SearchError::Network("timed out".to_string())),
        ));
        assert!(app.avatars.is_empty());
    }
}
