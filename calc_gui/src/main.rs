//! # Mechanical Calculator GUI Application
//!
//! Graphical front end over `calc_core::session::Session`, built with Iced
//! for native targets and the browser (wasm32 + WebGPU).
//!
//! The GUI owns no calculator state of its own: every widget event is
//! forwarded to the session and the view is redrawn from it. A tick
//! subscription runs only while the session has pending timers and
//! advances its clock.

mod ui;

use std::time::Duration;

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{column, container, rule, Space};
use iced::{event, time, Element, Event, Length, Subscription, Task};

use calc_core::clipboard::Clipboard;
use calc_core::session::{CopyOutcome, Session};
use calc_core::validation::accepts_key;
use calc_core::{CalcResult, Calculation, CalculatorSettings, FieldId, Section};

/// Clock resolution for error flashes and the delayed flange recompute
const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Section),
    InputChanged(FieldId, String),
    InputSubmitted(FieldId),
    CopyResult(Calculation),
    Escape,
    Tick,
}

/// Captures the text of a copy so it can be written through Iced's
/// clipboard task after the session has accepted it.
#[derive(Debug, Default)]
struct PendingClipboard {
    text: Option<String>,
}

impl Clipboard for PendingClipboard {
    fn write_text(&mut self, text: &str) -> CalcResult<()> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

pub struct App {
    session: Session,
    status: String,
}

impl App {
    fn new() -> Self {
        App {
            session: Session::new(CalculatorSettings::default()),
            status: "Ready".to_string(),
        }
    }

    fn title(&self) -> String {
        format!("Mechanical Calculator - {}", self.session.current_section().title())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(section) => {
                self.session.show(section);
                self.status = section.title().to_string();
            }
            Message::InputChanged(field, value) => {
                let filtered: String = value
                    .chars()
                    .filter(|c| accepts_key(c.encode_utf8(&mut [0; 4])))
                    .collect();
                if let Err(e) = self.session.input_changed(field, &filtered) {
                    self.status = e.to_string();
                }
            }
            Message::InputSubmitted(field) => {
                if let Err(e) = self.session.commit(field) {
                    self.status = e.to_string();
                }
            }
            Message::CopyResult(calculation) => {
                let mut clipboard = PendingClipboard::default();
                let outcome = self.session.copy_result(calculation, &mut clipboard);
                tracing::debug!(%calculation, ?outcome, "copy requested");
                if let (CopyOutcome::Copied, Some(text)) = (outcome, clipboard.text) {
                    self.status = format!("Copied {}", text);
                    return iced::clipboard::write(text);
                }
            }
            Message::Escape => {
                if self.session.handle_escape() {
                    self.status = Section::MainMenu.title().to_string();
                }
            }
            Message::Tick => {
                self.session.advance(TICK);
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let section = self.session.current_section();

        let body: Element<'_, Message> = match section {
            Section::MainMenu => ui::main_menu::view(),
            Section::GearCalculations | Section::FlangeCalculations => {
                ui::section_panel::view(&self.session, section)
            }
        };

        let content = column![
            ui::toolbar::view_header(section),
            rule::horizontal(1),
            Space::new().height(8),
            body,
            Space::new().height(Length::Fill),
            rule::horizontal(1),
            ui::status_bar::view_status_bar(&self.status),
        ]
        .spacing(4);

        container(content)
            .padding(12)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: Key::Named(Named::Escape),
                ..
            }) => Some(Message::Escape),
            _ => None,
        });

        if self.session.has_pending_timers() {
            Subscription::batch([keys, time::every(TICK).map(|_| Message::Tick)])
        } else {
            keys
        }
    }
}

fn main() -> iced::Result {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    calc_core::logging::init_default_logging(calc_core::logging::DEFAULT_FILTER);
    tracing::info!("mechanical calculator loaded");

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .window_size((520.0, 720.0))
        .run()
}
