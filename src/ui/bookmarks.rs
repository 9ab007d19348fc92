//! Bookmark list view

use std::collections::HashMap;

use iced::widget::{button, column, container, image, scrollable, text, Row, Space};
use iced::{Background, Border, Element, Length, Padding};

use super::theme::DarkTheme;
use crate::backend::types::SearchKind;
use crate::bookmarks::BookmarkStore;

struct Entry {
    kind: SearchKind,
    id: u64,
    title: String,
    url: String,
    avatar: Option<image::Handle>,
}

fn section<'a, Message: Clone + 'a>(
    heading: &'static str,
    entries: Vec<Entry>,
    on_remove: &impl Fn(SearchKind, u64) -> Message,
    on_open: &impl Fn(String) -> Message,
) -> Element<'a, Message> {
    let mut list = column![text(heading).size(16).color(DarkTheme::TEXT)].spacing(6);

    if entries.is_empty() {
        list = list.push(text("Nothing saved yet").size(13).color(DarkTheme::TEXT_MUTED));
    }

    for entry in entries {
        let mut item: Row<'a, Message> = Row::new().spacing(10).align_y(iced::Alignment::Center);
        if let Some(handle) = entry.avatar {
            item = item.push(image(handle).width(28).height(28));
        }
        item = item
            .push(
                button(text(entry.title).size(14).color(DarkTheme::TEXT))
                    .on_press(on_open(entry.url))
                    .padding(0)
                    .style(button::text),
            )
            .push(Space::with_width(Length::Fill))
            .push(
                button(text("remove").size(12).color(DarkTheme::DANGER))
                    .on_press(on_remove(entry.kind, entry.id))
                    .padding(Padding::from([4.0, 10.0]))
                    .style(button::text),
            );

        list = list.push(
            container(item)
                .padding(Padding::from([8.0, 12.0]))
                .width(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(Background::Color(DarkTheme::SURFACE)),
                    border: Border::default().rounded(8),
                    ..Default::default()
                }),
        );
    }

    list.into()
}

pub fn view<'a, Message: Clone + 'a>(
    store: &BookmarkStore,
    avatars: &HashMap<u64, image::Handle>,
    on_remove: impl Fn(SearchKind, u64) -> Message,
    on_open: impl Fn(String) -> Message,
) -> Element<'a, Message> {
    let repositories = store
        .repositories()
        .iter()
        .map(|repo| Entry {
            kind: SearchKind::Repositories,
            id: repo.id,
            title: repo.name.clone(),
            url: repo.html_url.clone(),
            avatar: None,
        })
        .collect();
    let users = store
        .users()
        .iter()
        .map(|user| Entry {
            kind: SearchKind::Users,
            id: user.id,
            title: user.login.clone(),
            url: user.html_url.clone(),
            avatar: avatars.get(&user.id).cloned(),
        })
        .collect();

    let hint = if store.is_empty() {
        "Bookmark results from the search view to keep them here"
    } else {
        ""
    };

    scrollable(
        column![
            text("My Bookmarks").size(20).color(DarkTheme::TEXT),
            text(hint).size(13).color(DarkTheme::TEXT_MUTED),
            section("Repositories", repositories, &on_remove, &on_open),
            section("Users", users, &on_remove, &on_open),
        ]
        .spacing(18),
    )
    .height(Length::Fill)
    .into()
}
