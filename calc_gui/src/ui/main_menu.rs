//! Main menu
//!
//! Entry screen with one button per calculation section.

use iced::widget::{button, column, text, Space};
use iced::{Element, Length, Padding};

use calc_core::Section;

use crate::Message;

/// Render the section picker
pub fn view() -> Element<'static, Message> {
    column![
        text("Choose a calculation group").size(14),
        Space::new().height(12),
        menu_button(Section::GearCalculations, "Teeth count, gear ratio, pitch diameter, module"),
        Space::new().height(8),
        menu_button(Section::FlangeCalculations, "Dimension C, pitch circle diameter, thickness"),
        Space::new().height(16),
        text("Esc returns here from any section.").size(10).color([0.5, 0.5, 0.5]),
    ]
    .into()
}

fn menu_button(section: Section, summary: &'static str) -> Element<'static, Message> {
    button(
        column![
            text(section.title()).size(16),
            text(summary).size(10),
        ]
        .spacing(2),
    )
    .on_press(Message::Navigate(section))
    .padding(Padding::from([10, 14]))
    .width(Length::Fill)
    .style(button::primary)
    .into()
}
