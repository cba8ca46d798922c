//! Custom-drawn download button.
//!
//! The button only draws what its [`ButtonState`] says; it never changes
//! state on its own. Presses are reported through the message passed to
//! [`LoadingButton::view`] and the owner decides what happens next.

use iced::{
    mouse,
    time::Instant,
    widget::{canvas, mouse_area},
    Color, Element, Length, Point, Radians, Rectangle, Renderer, Size, Theme,
};

use super::animation::PingPong;
use crate::{domain::ButtonState, resources};

pub const CORNER_RADIUS: f32 = 10.0;
pub const HEIGHT: f32 = 60.0;
const TEXT_SIZE: f32 = 20.0;

pub const IDLE_BACKGROUND: Color = Color::from_rgb8(0x07, 0xC2, 0xAA);
pub const BUSY_BACKGROUND: Color = Color::from_rgb8(0x00, 0x43, 0x49);
pub const PROGRESS_FILL: Color = Color::from_rgb8(0x00, 0x96, 0x88);
pub const ARC_FILL: Color = Color::from_rgb(1.0, 1.0, 0.0);
const TEXT_COLOR: Color = Color::WHITE;

/// Where each layer of the button goes for a given size.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonGeometry {
    pub background: Rectangle,
    pub progress: Option<Rectangle>,
    pub arc: Option<ArcGeometry>,
    pub label_center: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub center: Point,
    pub radius: f32,
    /// Clockwise sweep from 0°, in degrees.
    pub sweep_degrees: f32,
}

pub struct LoadingButton {
    state: ButtonState,
    label: String,
    background: Color,
    progress: f32,
    enabled: bool,
    animation: Option<PingPong>,
    cache: canvas::Cache,
}

impl Default for LoadingButton {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingButton {
    pub fn new() -> Self {
        Self {
            state: ButtonState::Idle,
            label: resources::DOWNLOAD.to_string(),
            background: IDLE_BACKGROUND,
            progress: 0.0,
            enabled: true,
            animation: None,
            cache: canvas::Cache::new(),
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn set_state(&mut self, state: ButtonState) {
        tracing::debug!(from = ?self.state(), to = ?state, "Button state change");
        self.state = state;

        match state {
            ButtonState::Busy => {
                if self.animation.is_none() {
                    self.animation = Some(PingPong::new());
                }
                self.set_label(resources::BUTTON_LOADING);
                self.set_background(BUSY_BACKGROUND);
                self.enabled = false;
            }
            ButtonState::Idle => {
                self.set_label(resources::DOWNLOAD);
                self.set_background(IDLE_BACKGROUND);
                self.animation = None;
                self.progress = 0.0;
                self.enabled = true;
            }
            ButtonState::Clicked => {}
        }

        self.invalidate();
    }

    /// Advances the busy animation. Ignored while not animating.
    pub fn tick(&mut self, now: Instant) {
        if let Some(animation) = self.animation.as_mut() {
            self.progress = animation.advance(now);
            self.invalidate();
        }
    }

    pub fn geometry(&self, size: Size) -> ButtonGeometry {
        let background = Rectangle::new(Point::ORIGIN, size);
        let busy = self.state == ButtonState::Busy;

        let progress = busy.then(|| {
            Rectangle::new(
                Point::ORIGIN,
                Size::new(self.progress() * size.width, size.height),
            )
        });

        let arc = busy.then(|| {
            let inset = CORNER_RADIUS * 2.0;
            let diameter = (size.height - 2.0 * inset).max(0.0);
            let left = size.width / 1.5 + inset;
            ArcGeometry {
                center: Point::new(left + diameter / 2.0, inset + diameter / 2.0),
                radius: diameter / 2.0,
                sweep_degrees: self.progress() * 360.0,
            }
        });

        ButtonGeometry {
            background,
            progress,
            arc,
            label_center: background.center(),
        }
    }

    pub fn view<'a, Message: Clone + 'a>(&'a self, on_press: Message) -> Element<'a, Message> {
        let surface = canvas(self).width(Length::Fill).height(Length::Fixed(HEIGHT));

        if self.enabled {
            mouse_area(surface)
                .on_press(on_press)
                .interaction(mouse::Interaction::Pointer)
                .into()
        } else {
            mouse_area(surface).into()
        }
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
        self.invalidate();
    }

    fn set_background(&mut self, color: Color) {
        self.background = color;
        self.invalidate();
    }

    fn invalidate(&self) {
        self.cache.clear();
    }

    fn draw_layers(&self, frame: &mut canvas::Frame) {
        let geometry = self.geometry(frame.size());

        frame.fill(
            &canvas::Path::rounded_rectangle(
                geometry.background.position(),
                geometry.background.size(),
                CORNER_RADIUS.into(),
            ),
            self.background,
        );

        if let Some(progress) = geometry.progress.filter(|p| p.width > 0.0) {
            frame.fill(
                &canvas::Path::rounded_rectangle(
                    progress.position(),
                    progress.size(),
                    CORNER_RADIUS.into(),
                ),
                PROGRESS_FILL,
            );
        }

        if let Some(arc) = geometry.arc.filter(|a| a.radius > 0.0 && a.sweep_degrees > 0.0) {
            let slice = canvas::Path::new(|builder| {
                builder.arc(canvas::path::Arc {
                    center: arc.center,
                    radius: arc.radius,
                    start_angle: Radians(0.0),
                    end_angle: Radians(arc.sweep_degrees.to_radians()),
                });
                builder.line_to(arc.center);
                builder.close();
            });
            frame.fill(&slice, ARC_FILL);
        }

        frame.fill_text(canvas::Text {
            content: self.label.clone(),
            position: geometry.label_center,
            color: TEXT_COLOR,
            size: TEXT_SIZE.into(),
            align_x: iced::alignment::Horizontal::Center.into(),
            align_y: iced::alignment::Vertical::Center,
            ..canvas::Text::default()
        });
    }
}

impl<Message> canvas::Program<Message> for LoadingButton {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let layers = self
            .cache
            .draw(renderer, bounds.size(), |frame| self.draw_layers(frame));
        vec![layers]
    }
}
