mod api;
mod app;
mod application;
mod config;
mod domain;
mod resources;
mod ui;

use iced::{window, Size};

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = config::AppConfig::from_env();
    tracing::info!(
        destination = %config.destination().display(),
        "LoadApp starting"
    );

    application::notification::init_channel(&config.channel);

    iced::application(
        move || app::LoadApp::new(config.clone()),
        app::update,
        app::view,
    )
    .title(resources::APP_NAME)
    .subscription(app::subscription)
    .window(window::Settings {
        size: Size::new(420.0, 640.0),
        ..Default::default()
    })
    .run()
}
