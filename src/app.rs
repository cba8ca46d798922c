use std::sync::Arc;
use std::time::Duration;

use iced::{time::Instant, Subscription, Task};

use crate::{
    api::{DownloadRequest, HttpClient},
    application::{
        notification::{self, DesktopNotifier, DetailParams, Notifier},
        DownloadManager,
    },
    config::AppConfig,
    domain::{ButtonState, DownloadId, DownloadOption, DownloadResult, DownloadStatus},
    resources,
    ui::{DetailMessage, DetailView, MainMessage, MainView},
};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Interval between animation ticks while the button is busy.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub enum Screen {
    Main,
    Detail(DetailView),
}

/// The request currently in flight. Replaced on every new download.
struct InFlight {
    id: DownloadId,
    option: DownloadOption,
}

pub struct LoadApp {
    screen: Screen,
    main: MainView,
    config: AppConfig,
    downloads: DownloadManager,
    notifier: Arc<dyn Notifier>,
    in_flight: Option<InFlight>,
    locate: fn(DownloadOption) -> &'static str,
}

impl LoadApp {
    pub fn new(config: AppConfig) -> Self {
        let downloads = DownloadManager::new(HttpClient::new(&config.user_agent));
        Self::with_parts(config, downloads, Arc::new(DesktopNotifier))
    }

    pub fn with_parts(
        config: AppConfig,
        downloads: DownloadManager,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            screen: Screen::Main,
            main: MainView::default(),
            config,
            downloads,
            notifier,
            in_flight: None,
            locate: DownloadOption::url,
        }
    }

    /// Replaces how an option is turned into the URL to fetch.
    #[cfg(test)]
    fn with_locator(mut self, locate: fn(DownloadOption) -> &'static str) -> Self {
        self.locate = locate;
        self
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Main(MainMessage),
    Detail(DetailMessage),
    AnimationTick(Instant),
    /// Completion signal for one enqueued download.
    DownloadFinished(DownloadId),
    /// The posted notification's action resolved.
    NotificationActivated(Option<DetailParams>),
    ToastExpired(u64),
}

pub fn update(app: &mut LoadApp, message: Message) -> Task<Message> {
    match message {
        Message::Main(main_msg) => {
            app.main.update(main_msg.clone());

            match main_msg {
                MainMessage::DownloadPressed => return start_download(app),
                MainMessage::OpenNotice => {
                    if let Some(notice) = &app.main.last_notice {
                        app.screen = Screen::Detail(DetailView::new(notice.params.clone()));
                    }
                }
                MainMessage::OptionSelected(_) => {}
            }
        }
        Message::Detail(DetailMessage::OkPressed) => {
            app.screen = Screen::Main;
        }
        Message::AnimationTick(now) => {
            app.main.button.tick(now);
        }
        Message::DownloadFinished(id) => {
            let Some(in_flight) = app.in_flight.take_if(|f| f.id == id) else {
                let status = app.downloads.take_status(id);
                tracing::debug!(%id, ?status, "Ignoring completion for a request that is no longer tracked");
                return Task::none();
            };

            let destination = app.downloads.request(id).map(|r| r.destination);
            let succeeded = match app.downloads.take_status(id) {
                Some(DownloadStatus::Successful { bytes }) => {
                    tracing::info!(%id, bytes, ?destination, "Download succeeded");
                    true
                }
                Some(DownloadStatus::Failed { reason }) => {
                    tracing::info!(%id, %reason, "Download failed");
                    false
                }
                other => {
                    tracing::warn!(%id, status = ?other, "Completion signalled before a final status");
                    false
                }
            };
            return finish_download(app, in_flight.option, succeeded);
        }
        Message::NotificationActivated(Some(params)) => {
            tracing::info!("Opening detail screen from notification");
            app.screen = Screen::Detail(DetailView::new(params));
        }
        Message::NotificationActivated(None) => {}
        Message::ToastExpired(id) => {
            app.main.expire_toast(id);
        }
    }
    Task::none()
}

fn start_download(app: &mut LoadApp) -> Task<Message> {
    if !app.main.button.is_enabled() {
        return Task::none();
    }

    let Some(option) = app.main.selected else {
        app.main.button.set_state(ButtonState::Idle);
        return show_toast(app, resources::NO_SELECTED_ITEM);
    };

    app.main.button.set_state(ButtonState::Busy);
    let toast = show_toast(app, option.started_message());

    let request = DownloadRequest::new((app.locate)(option), app.config.destination());
    match app.downloads.enqueue(request) {
        Ok(enqueued) => {
            app.in_flight = Some(InFlight {
                id: enqueued.id,
                option,
            });
            Task::batch([
                toast,
                Task::perform(enqueued.completion, Message::DownloadFinished),
            ])
        }
        Err(e) => {
            tracing::warn!(%option, "Could not enqueue download: {}", e);
            app.in_flight = None;
            Task::batch([toast, finish_download(app, option, false)])
        }
    }
}

fn finish_download(app: &mut LoadApp, option: DownloadOption, succeeded: bool) -> Task<Message> {
    let result = DownloadResult::new(option.description(), succeeded);
    let (notice, action) = notification::dispatch(app.notifier.as_ref(), &result);

    app.main.last_notice = Some(notice);
    app.main.selected = None;
    app.main.button.set_state(ButtonState::Idle);

    Task::perform(action, Message::NotificationActivated)
}

fn show_toast(app: &mut LoadApp, text: &str) -> Task<Message> {
    let id = app.main.show_toast(text);
    Task::perform(
        async move {
            tokio::time::sleep(TOAST_DURATION).await;
            id
        },
        Message::ToastExpired,
    )
}

pub fn view(app: &LoadApp) -> iced::Element<'_, Message> {
    match &app.screen {
        Screen::Main => app.main.view().map(Message::Main),
        Screen::Detail(detail) => detail.view().map(Message::Detail),
    }
}

fn wants_ticks(app: &LoadApp) -> bool {
    app.main.button.is_animating()
}

pub fn subscription(app: &LoadApp) -> Subscription<Message> {
    if wants_ticks(app) {
        iced::time::every(FRAME_INTERVAL).map(Message::AnimationTick)
    } else {
        Subscription::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::notification::tests::{DeferredNotifier, RecordingNotifier};
    use std::sync::atomic::Ordering;

    fn test_app() -> (LoadApp, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let config = AppConfig {
            download_dir: std::env::temp_dir().join("load-app-tests"),
            ..Default::default()
        };
        let downloads = DownloadManager::new(HttpClient::new("load-app-test"));
        let app = LoadApp::with_parts(config, downloads, Arc::new(notifier.clone()));
        (app, notifier)
    }

    fn press(app: &mut LoadApp) {
        let _ = update(app, Message::Main(MainMessage::DownloadPressed));
    }

    fn select(app: &mut LoadApp, option: DownloadOption) {
        let _ = update(app, Message::Main(MainMessage::OptionSelected(option)));
    }

    #[test]
    fn test_press_without_selection_never_enqueues() {
        let (mut app, notifier) = test_app();

        press(&mut app);

        assert_eq!(app.downloads.request_count(), 0);
        assert!(app.in_flight.is_none());
        assert_eq!(app.main.button.state(), ButtonState::Idle);
        assert!(app.main.button.is_enabled());
        assert_eq!(
            app.main.toast.as_ref().map(|t| t.text.as_str()),
            Some(resources::NO_SELECTED_ITEM)
        );
        assert!(notifier.posted.lock().is_empty());
    }

    #[test]
    fn test_each_option_enqueues_its_own_url() {
        for option in DownloadOption::ALL {
            let (mut app, _) = test_app();
            select(&mut app, option);
            press(&mut app);

            let id = app.in_flight.as_ref().map(|f| f.id).unwrap();
            let request = app.downloads.request(id).unwrap();
            assert_eq!(request.url, option.url());
            assert_eq!(request.destination, app.config.destination());
            assert_eq!(app.downloads.request_count(), 1);
        }
    }

    #[test]
    fn test_busy_button_ignores_presses() {
        let (mut app, _) = test_app();
        select(&mut app, DownloadOption::Glide);
        press(&mut app);
        press(&mut app);

        assert_eq!(app.downloads.request_count(), 1);
    }

    #[test]
    fn test_failed_download_notifies_and_resets() {
        let (mut app, notifier) = test_app();

        select(&mut app, DownloadOption::LoadApp);
        press(&mut app);
        assert_eq!(app.main.button.state(), ButtonState::Busy);
        assert_eq!(app.main.button.label(), resources::BUTTON_LOADING);
        assert!(!app.main.button.is_enabled());

        let id = app.in_flight.as_ref().map(|f| f.id).unwrap();
        app.downloads.record(
            id,
            DownloadStatus::Failed {
                reason: "connection reset".into(),
            },
        );
        let _ = update(&mut app, Message::DownloadFinished(id));

        let posted = notifier.posted.lock();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].params.file_name, resources::LOAD_APP_TEXT);
        assert_eq!(posted[0].params.status, resources::FAILED);

        assert_eq!(app.main.button.state(), ButtonState::Idle);
        assert_eq!(app.main.button.progress(), 0.0);
        assert!(app.main.button.is_enabled());
        assert!(app.main.selected.is_none());
        assert!(app.in_flight.is_none());
    }

    #[test]
    fn test_successful_download_reports_success() {
        let (mut app, notifier) = test_app();
        select(&mut app, DownloadOption::Retrofit);
        press(&mut app);

        let id = app.in_flight.as_ref().map(|f| f.id).unwrap();
        app.downloads
            .record(id, DownloadStatus::Successful { bytes: 1024 });
        let _ = update(&mut app, Message::DownloadFinished(id));

        assert_eq!(notifier.posted.lock()[0].params.status, resources::SUCCESS);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let (mut app, notifier) = test_app();
        select(&mut app, DownloadOption::Glide);
        press(&mut app);
        let id = app.in_flight.as_ref().map(|f| f.id).unwrap();

        let _ = update(&mut app, Message::DownloadFinished(DownloadId(id.0 + 100)));

        assert!(notifier.posted.lock().is_empty());
        assert_eq!(app.main.button.state(), ButtonState::Busy);
    }

    #[test]
    fn test_rejected_request_is_reported_as_failure() {
        let (app, notifier) = test_app();
        let mut app = app.with_locator(|_| "::not-a-url::");

        select(&mut app, DownloadOption::Glide);
        press(&mut app);

        assert!(app.in_flight.is_none());
        assert_eq!(app.downloads.request_count(), 0);
        let posted = notifier.posted.lock();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].params.file_name, resources::GLIDE_TEXT);
        assert_eq!(posted[0].params.status, resources::FAILED);
        assert_eq!(app.main.button.state(), ButtonState::Idle);
        assert!(app.main.button.is_enabled());
        assert!(app.main.selected.is_none());
    }

    #[test]
    fn test_finished_request_is_forgotten() {
        let (mut app, _) = test_app();
        select(&mut app, DownloadOption::Glide);
        press(&mut app);
        let id = app.in_flight.as_ref().map(|f| f.id).unwrap();
        app.downloads.record(id, DownloadStatus::Successful { bytes: 1 });

        let _ = update(&mut app, Message::DownloadFinished(id));

        assert_eq!(app.downloads.request_count(), 0);
        assert_eq!(app.downloads.query(id), None);
    }

    #[test]
    fn test_completion_updates_ui_before_notification_is_posted() {
        let notifier = DeferredNotifier::default();
        let config = AppConfig {
            download_dir: std::env::temp_dir().join("load-app-tests"),
            ..Default::default()
        };
        let downloads = DownloadManager::new(HttpClient::new("load-app-test"));
        let mut app = LoadApp::with_parts(config, downloads, Arc::new(notifier.clone()));
        select(&mut app, DownloadOption::Retrofit);
        press(&mut app);
        let id = app.in_flight.as_ref().map(|f| f.id).unwrap();
        app.downloads.record(id, DownloadStatus::Successful { bytes: 1 });

        let _task = update(&mut app, Message::DownloadFinished(id));

        assert_eq!(notifier.shown.load(Ordering::SeqCst), 0);
        assert_eq!(app.main.button.state(), ButtonState::Idle);
        assert_eq!(
            app.main.last_notice.as_ref().map(|n| n.params.status.as_str()),
            Some(resources::SUCCESS)
        );
    }

    #[test]
    fn test_notification_action_opens_detail_and_ok_returns() {
        let (mut app, _) = test_app();
        let params = DetailParams {
            file_name: resources::GLIDE_TEXT.into(),
            status: resources::SUCCESS.into(),
        };

        let _ = update(&mut app, Message::NotificationActivated(Some(params)));
        match &app.screen {
            Screen::Detail(detail) => {
                assert_eq!(detail.file_name(), resources::GLIDE_TEXT);
                assert_eq!(detail.status(), resources::SUCCESS);
            }
            Screen::Main => panic!("expected detail screen"),
        }

        let _ = update(&mut app, Message::Detail(DetailMessage::OkPressed));
        assert!(matches!(app.screen, Screen::Main));
    }

    #[test]
    fn test_in_app_notice_opens_detail() {
        let (mut app, _) = test_app();
        select(&mut app, DownloadOption::Glide);
        press(&mut app);
        let id = app.in_flight.as_ref().map(|f| f.id).unwrap();
        app.downloads.record(id, DownloadStatus::Successful { bytes: 1 });
        let _ = update(&mut app, Message::DownloadFinished(id));

        let _ = update(&mut app, Message::Main(MainMessage::OpenNotice));

        assert!(matches!(&app.screen, Screen::Detail(d) if d.file_name() == resources::GLIDE_TEXT));
    }

    #[test]
    fn test_ticks_wanted_only_while_busy() {
        let (mut app, _) = test_app();
        assert!(!wants_ticks(&app));

        select(&mut app, DownloadOption::Glide);
        press(&mut app);
        assert!(wants_ticks(&app));

        let id = app.in_flight.as_ref().map(|f| f.id).unwrap();
        app.downloads.record(id, DownloadStatus::Successful { bytes: 1 });
        let _ = update(&mut app, Message::DownloadFinished(id));
        assert!(!wants_ticks(&app));
    }

    #[test]
    fn test_ticks_advance_progress_while_busy() {
        let (mut app, _) = test_app();
        select(&mut app, DownloadOption::Glide);
        press(&mut app);

        let now = Instant::now();
        let _ = update(&mut app, Message::AnimationTick(now));
        let _ = update(
            &mut app,
            Message::AnimationTick(now + Duration::from_millis(375)),
        );
        assert_eq!(app.main.button.progress(), 0.5);
    }
}
