//! Search bar: type toggle plus term input

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use super::theme::DarkTheme;
use crate::backend::types::SearchKind;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

pub fn view<'a, Message: Clone + 'a>(
    term: &str,
    kind: SearchKind,
    on_input: impl Fn(String) -> Message + 'a,
    on_kind: impl Fn(SearchKind) -> Message,
) -> Element<'a, Message> {
    let toggles: Vec<Element<'a, Message>> = SearchKind::ALL
        .into_iter()
        .map(|k| {
            let style: ButtonStyle = if k == kind {
                button::primary
            } else {
                button::secondary
            };
            button(text(k.label()).size(14))
                .on_press(on_kind(k))
                .padding(Padding::from([6.0, 14.0]))
                .style(style)
                .into()
        })
        .collect();

    let input = text_input("Type to search GitHub...", term)
        .on_input(on_input)
        .padding(Padding::new(12.0))
        .size(18)
        .style(|_theme, _status| text_input::Style {
            background: Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            icon: DarkTheme::TEXT_MUTED,
            placeholder: DarkTheme::TEXT_PLACEHOLDER,
            value: DarkTheme::TEXT,
            selection: DarkTheme::PRIMARY,
        });

    let field = container(input)
        .padding(Padding::from([4.0, 8.0]))
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DarkTheme::SURFACE)),
            border: Border {
                color: DarkTheme::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        });

    column![
        row(toggles).spacing(8),
        text(format!("Search {}", kind)).size(13).color(DarkTheme::TEXT_MUTED),
        field,
    ]
    .spacing(8)
    .into()
}
