//! Result notifications and the navigation payload they carry.
//!
//! The desktop has no notification channels, so a channel here is the
//! application name plus a stable id that every posted notification reuses.
//! [`init_channel`] must run once at startup; repeated calls are no-ops.

use std::sync::OnceLock;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    config::ChannelConfig,
    domain::{AppError, DownloadResult},
    resources,
};

/// Extras key for the file description.
pub const EXTRA_FILE_NAME: &str = "fileName";
/// Extras key for the localized status label.
pub const EXTRA_STATUS: &str = "status";

/// Freedesktop servers report a click on the notification body as this action.
#[cfg(all(unix, not(target_os = "macos")))]
const ACTION_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
}

static CHANNEL: OnceLock<NotificationChannel> = OnceLock::new();

/// Creates the process-wide notification channel on first call and returns
/// the existing one afterwards.
pub fn init_channel(config: &ChannelConfig) -> &'static NotificationChannel {
    CHANNEL.get_or_init(|| {
        tracing::info!(id = %config.id, "Notification channel created");
        NotificationChannel {
            id: config.id.clone(),
            name: config.name.clone(),
        }
    })
}

fn channel() -> NotificationChannel {
    CHANNEL.get().cloned().unwrap_or_else(|| NotificationChannel {
        id: resources::NOTIFICATION_CHANNEL_ID.to_string(),
        name: resources::NOTIFICATION_CHANNEL_NAME.to_string(),
    })
}

/// Parameters for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailParams {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub status: String,
}

impl DetailParams {
    pub fn from_result(result: &DownloadResult) -> Self {
        Self {
            file_name: result.file_description.clone(),
            status: result.status_label().to_string(),
        }
    }

    pub fn to_extras(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Missing keys read as empty strings.
    pub fn from_extras(extras: &Map<String, Value>) -> Self {
        let get = |key: &str| {
            extras
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            file_name: get(EXTRA_FILE_NAME),
            status: get(EXTRA_STATUS),
        }
    }
}

/// A fully built notification, independent of how it gets shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultNotice {
    pub channel_id: String,
    pub app_name: String,
    pub title: String,
    pub body: String,
    pub action_label: String,
    pub params: DetailParams,
}

impl ResultNotice {
    pub fn new(result: &DownloadResult) -> Self {
        let channel = channel();
        Self {
            channel_id: channel.id,
            app_name: channel.name,
            title: resources::NOTIFICATION_TITLE.to_string(),
            body: resources::NOTIFICATION_DESCRIPTION.to_string(),
            action_label: resources::ACTION_NOTIFICATION_DOWNLOAD.to_string(),
            params: DetailParams::from_result(result),
        }
    }
}

/// Resolves with the payload if the user activates the notification action.
pub type ActionFuture = BoxFuture<'static, Option<DetailParams>>;

/// Posts a notice when polled, then waits for its action.
pub type PostFuture = BoxFuture<'static, Result<Option<DetailParams>, AppError>>;

/// Posting does no work until the returned future is polled, so callers on
/// the UI thread never block on the notification service.
pub trait Notifier: Send + Sync {
    fn post(&self, notice: &ResultNotice) -> PostFuture;
}

/// Builds a notice for `result` and hands it to `notifier`.
///
/// The notice is returned at once; the post itself happens when the action
/// future is polled. Failures are logged and dropped.
pub fn dispatch(notifier: &dyn Notifier, result: &DownloadResult) -> (ResultNotice, ActionFuture) {
    let notice = ResultNotice::new(result);
    let posting = notifier.post(&notice);
    let channel = notice.channel_id.clone();
    let status = notice.params.status.clone();

    let action = async move {
        match posting.await {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!(%channel, %status, "Failed to post notification: {}", e);
                None
            }
        }
    }
    .boxed();
    (notice, action)
}

/// Posts through the desktop notification service.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    #[cfg(all(unix, not(target_os = "macos")))]
    fn post(&self, notice: &ResultNotice) -> PostFuture {
        let notice = notice.clone();
        async move {
            tokio::task::spawn_blocking(move || {
                let handle = notify_rust::Notification::new()
                    .appname(&notice.app_name)
                    .summary(&notice.title)
                    .body(&notice.body)
                    .action(ACTION_ID, &notice.action_label)
                    .show()
                    .map_err(|e| AppError::Notification(e.to_string()))?;
                tracing::info!(
                    channel = %notice.channel_id,
                    status = %notice.params.status,
                    "Notification posted"
                );

                let extras = notice.params.to_extras();
                let mut activated = false;
                handle.wait_for_action(|action| {
                    activated = action == ACTION_ID;
                });
                Ok(activated.then(|| DetailParams::from_extras(&extras)))
            })
            .await
            .map_err(|e| AppError::Notification(e.to_string()))?
        }
        .boxed()
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn post(&self, notice: &ResultNotice) -> PostFuture {
        let notice = notice.clone();
        async move {
            tokio::task::spawn_blocking(move || {
                notify_rust::Notification::new()
                    .appname(&notice.app_name)
                    .summary(&notice.title)
                    .body(&notice.body)
                    .show()
                    .map_err(|e| AppError::Notification(e.to_string()))?;
                tracing::info!(
                    channel = %notice.channel_id,
                    status = %notice.params.status,
                    "Notification posted"
                );
                Ok(None)
            })
            .await
            .map_err(|e| AppError::Notification(e.to_string()))?
        }
        .boxed()
    }
}
