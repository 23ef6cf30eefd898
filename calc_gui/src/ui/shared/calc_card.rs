//! Calculation card
//!
//! Two labeled inputs and the result of a single calculation. The result
//! is a button: pressing it copies the value and briefly shows a
//! confirmation in its place.

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Element, Length, Padding};

use calc_core::session::Session;
use calc_core::{Calculation, FieldId};

use crate::Message;

/// Render the card for `calculation`
pub fn view(session: &Session, calculation: Calculation) -> Element<'_, Message> {
    let [field_a, field_b] = calculation.inputs();
    let result = session.result(calculation);

    let label = if session.is_copied(calculation) {
        "Copied! ✓".to_string()
    } else {
        result.text.clone()
    };

    let result_text = if result.success {
        text(label).size(18).color([0.2, 0.6, 0.2])
    } else {
        text(label).size(18)
    };

    let result_button = button(result_text)
        .on_press(Message::CopyResult(calculation))
        .padding(Padding::from([6, 12]))
        .width(Length::Fill)
        .style(if result.success { button::success } else { button::secondary });

    let card = column![
        text(calculation.display_name()).size(14),
        Space::new().height(4),
        labeled_input(session, field_a),
        labeled_input(session, field_b),
        Space::new().height(4),
        result_button,
    ]
    .spacing(6);

    container(card)
        .padding(8)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

/// A field label, its text input, and an error marker while the field is
/// flagged as invalid
fn labeled_input(session: &Session, field: FieldId) -> Element<'_, Message> {
    let value = session.field_value(field).unwrap_or("");

    let marker = if session.is_field_errored(field) {
        text("invalid").size(10).color([0.8, 0.2, 0.2])
    } else {
        text("").size(10)
    };

    row![
        text(field.label()).size(11).width(Length::Fixed(140.0)),
        text_input("0", value)
            .on_input(move |s| Message::InputChanged(field, s))
            .on_submit(Message::InputSubmitted(field))
            .width(Length::Fill)
            .padding(4)
            .size(11),
        Space::new().width(6),
        marker.width(Length::Fixed(44.0)),
    ]
    .align_y(Alignment::Center)
    .into()
}
