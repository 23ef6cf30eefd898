//! Toolbar component
//!
//! Application header: section title, and a back button on every section
//! except the main menu.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use calc_core::Section;

use crate::Message;

/// Render the application header for the visible section
pub fn view_header(section: Section) -> Element<'static, Message> {
    let back: Element<'static, Message> = if section == Section::MainMenu {
        Space::new().width(0).into()
    } else {
        button(text("< Back").size(11))
            .on_press(Message::Navigate(Section::MainMenu))
            .padding(Padding::from([4, 8]))
            .style(button::secondary)
            .into()
    };

    row![
        text(section.title()).size(22),
        Space::new().width(Length::Fill),
        back,
    ]
    .align_y(Alignment::Center)
    .into()
}
