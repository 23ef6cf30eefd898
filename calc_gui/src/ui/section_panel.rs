//! Calculation section panel
//!
//! Renders the gear or flange section as a scrollable list of cards, one
//! per calculation hosted by the section.

use iced::widget::{container, scrollable, Column};
use iced::{Element, Length};

use calc_core::session::Session;
use calc_core::Section;

use super::shared::calc_card;
use crate::Message;

/// Render every calculation card of `section`
pub fn view(session: &Session, section: Section) -> Element<'_, Message> {
    let cards = section
        .calculations()
        .into_iter()
        .fold(Column::new().spacing(10), |cards, calculation| {
            cards.push(calc_card::view(session, calculation))
        });

    container(scrollable(cards.padding(4)))
        .width(Length::Fill)
        .into()
}
