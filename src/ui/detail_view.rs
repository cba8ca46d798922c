use iced::{
    widget::{button, column, row, text, Space},
    Color, Element, Length,
};

use crate::{application::notification::DetailParams, resources};

const SUCCESS_COLOR: Color = Color::from_rgb8(0x2E, 0x7D, 0x32);
const FAILED_COLOR: Color = Color::from_rgb8(0xC6, 0x28, 0x28);

/// Read-only result screen.
#[derive(Debug, Clone)]
pub struct DetailView {
    params: DetailParams,
}

#[derive(Debug, Clone)]
pub enum DetailMessage {
    OkPressed,
}

impl DetailView {
    pub fn new(params: DetailParams) -> Self {
        Self { params }
    }

    pub fn file_name(&self) -> &str {
        &self.params.file_name
    }

    pub fn status(&self) -> &str {
        &self.params.status
    }

    pub fn view(&self) -> Element<'_, DetailMessage> {
        let status_color = if self.status() == resources::SUCCESS {
            SUCCESS_COLOR
        } else {
            FAILED_COLOR
        };

        column![
            row![
                text(resources::DETAIL_FILE_NAME).size(16).width(Length::FillPortion(1)),
                text(self.file_name()).size(16).width(Length::FillPortion(2)),
            ]
            .spacing(10),
            row![
                text(resources::DETAIL_STATUS).size(16).width(Length::FillPortion(1)),
                text(self.status())
                    .size(16)
                    .color(status_color)
                    .width(Length::FillPortion(2)),
            ]
            .spacing(10),
            Space::new().height(Length::Fill),
            button(text(resources::OK).size(18).center())
                .on_press(DetailMessage::OkPressed)
                .width(Length::Fill)
                .padding([12, 20]),
        ]
        .padding(20)
        .spacing(20)
        .into()
    }
}
