//! Card widget for a single search result

use iced::widget::{button, column, container, image, row, text, Row, Space};
use iced::{Background, Border, Element, Length, Padding, Theme};

use super::theme::DarkTheme;
use crate::presenter::ResultCard;

pub fn view<'a, Message: Clone + 'a>(
    card: &ResultCard,
    avatar: Option<image::Handle>,
    on_toggle: Message,
    on_open: impl Fn(String) -> Message,
) -> Element<'a, Message> {
    let mut header: Row<'a, Message> = Row::new().spacing(10).align_y(iced::Alignment::Center);
    if let Some(handle) = avatar {
        header = header.push(image(handle).width(32).height(32));
    }
    header = header.push(text(card.title.clone()).size(17).color(DarkTheme::TEXT));
    if card.bookmarked {
        header = header.push(text("Bookmarked").size(12).color(DarkTheme::SUCCESS));
    }

    let links: Vec<Element<'a, Message>> = card
        .links
        .iter()
        .map(|link| {
            button(text(link.label.clone()).size(12).color(DarkTheme::PRIMARY))
                .on_press(on_open(link.url.clone()))
                .padding(0)
                .style(button::text)
                .into()
        })
        .collect();

    let details: Vec<Element<'a, Message>> = card
        .details
        .iter()
        .map(|(label, value)| {
            row![
                text(format!("{}:", label)).size(12).color(DarkTheme::TEXT_MUTED),
                text(value.clone()).size(12).color(DarkTheme::TEXT),
            ]
            .spacing(4)
            .into()
        })
        .collect();

    let mut body = column![header].spacing(6);
    if let Some(description) = &card.description {
        body = body.push(text(description.clone()).size(13).color(DarkTheme::TEXT_MUTED));
    }
    body = body
        .push(row(links).spacing(14))
        .push(row(details).spacing(16));

    let style: fn(&Theme, button::Status) -> button::Style = if card.bookmarked {
        button::danger
    } else {
        button::primary
    };
    let toggle = button(text(card.toggle_label()).size(13))
        .on_press(on_toggle)
        .padding(Padding::from([6.0, 12.0]))
        .style(style);

    container(
        row![body, Space::with_width(Length::Fill), toggle]
            .spacing(12)
            .align_y(iced::Alignment::Center),
    )
    .padding(Padding::from([10.0, 12.0]))
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(DarkTheme::SURFACE)),
        border: Border::default().rounded(8),
        ..Default::default()
    })
    .into()
}
