use iced::{
    widget::{button, column, container, radio, row, text, Space},
    Alignment, Element, Length,
};

use super::loading_button::LoadingButton;
use crate::{application::notification::ResultNotice, domain::DownloadOption, resources};

/// A short-lived message at the bottom of the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub text: String,
}

/// Main view state
pub struct MainView {
    pub selected: Option<DownloadOption>,
    pub button: LoadingButton,
    pub toast: Option<Toast>,
    /// In-app copy of the last result notification.
    pub last_notice: Option<ResultNotice>,
    next_toast_id: u64,
}

impl Default for MainView {
    fn default() -> Self {
        Self {
            selected: None,
            button: LoadingButton::new(),
            toast: None,
            last_notice: None,
            next_toast_id: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MainMessage {
    OptionSelected(DownloadOption),
    DownloadPressed,
    OpenNotice,
}

impl MainView {
    pub fn update(&mut self, message: MainMessage) {
        match message {
            MainMessage::OptionSelected(option) => {
                self.selected = Some(option);
            }
            MainMessage::DownloadPressed | MainMessage::OpenNotice => {
                // Will be handled by the app
            }
        }
    }

    /// Replaces the current toast and returns its id.
    pub fn show_toast(&mut self, text: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        self.toast = Some(Toast {
            id: self.next_toast_id,
            text: text.into(),
        });
        self.next_toast_id
    }

    /// Clears the toast only if it is still the one with `id`.
    pub fn expire_toast(&mut self, id: u64) {
        if self.toast.as_ref().is_some_and(|t| t.id == id) {
            self.toast = None;
        }
    }

    pub fn view(&self) -> Element<'_, MainMessage> {
        let options = DownloadOption::ALL.iter().fold(column![].spacing(16), |col, option| {
            col.push(
                radio(
                    option.description(),
                    *option,
                    self.selected,
                    MainMessage::OptionSelected,
                )
                .size(18)
                .text_size(16),
            )
        });

        let mut content = column![
            text(resources::APP_NAME).size(32),
            Space::new().height(Length::Fixed(20.0)),
            options,
            Space::new().height(Length::Fill),
        ]
        .spacing(10);

        if let Some(notice) = &self.last_notice {
            content = content.push(
                container(
                    row![
                        column![
                            text(&notice.title).size(14),
                            text(&notice.body).size(12),
                        ]
                        .width(Length::Fill),
                        button(text(&notice.action_label).size(14))
                            .on_press(MainMessage::OpenNotice)
                            .padding([6, 12]),
                    ]
                    .align_y(Alignment::Center)
                    .spacing(10),
                )
                .padding(10)
                .style(container::rounded_box),
            );
        }

        if let Some(toast) = &self.toast {
            content = content.push(
                container(text(&toast.text).size(14))
                    .padding([8, 16])
                    .center_x(Length::Fill)
                    .style(container::dark),
            );
        }

        content
            .push(self.button.view(MainMessage::DownloadPressed))
            .padding(20)
            .into()
    }
}
