//! Toast notifications for success and failure of user actions.

use std::time::Duration;

use api::ApiError;
use dioxus::prelude::*;

use crate::platform::sleep;

const AUTO_DISMISS: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default)]
pub struct Notifications {
    pub entries: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, kind: NotificationKind, title: &str, description: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(Notification {
            id,
            kind,
            title: title.to_string(),
            description: description.to_string(),
        });
        id
    }

    /// Error entry titled with the error code, showing the server's message.
    pub fn push_api_error(&mut self, err: &ApiError) -> u64 {
        tracing::warn!("{}: {}", err.code(), err.message());
        self.push(NotificationKind::Error, err.code(), err.message())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

pub fn notify_success(notifications: &mut Signal<Notifications>, title: &str, description: &str) {
    tracing::info!("{}: {}", title, description);
    notifications
        .write()
        .push(NotificationKind::Success, title, description);
}

pub fn notify_error(notifications: &mut Signal<Notifications>, title: &str, description: &str) {
    tracing::warn!("{}: {}", title, description);
    notifications
        .write()
        .push(NotificationKind::Error, title, description);
}

/// Error toast titled with the error code, showing the server's message.
pub fn notify_api_error(notifications: &mut Signal<Notifications>, err: &ApiError) {
    notifications.write().push_api_error(err);
}

/// Provides the notification queue and renders it on top of `children`.
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let notifications = use_signal(Notifications::default);
    use_context_provider(|| notifications);

    let entries = notifications().entries.clone();

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for entry in entries {
                Toast { key: "{entry.id}", notification: entry }
            }
        }
    }
}

#[component]
fn Toast(notification: Notification) -> Element {
    let mut notifications = use_notifications();
    let id = notification.id;

    use_future(move || async move {
        sleep(AUTO_DISMISS).await;
        notifications.write().dismiss(id);
    });

    rsx! {
        div {
            class: match notification.kind {
                NotificationKind::Success => "toast success",
                NotificationKind::Error => "toast error",
            },
            role: "status",
            div {
                class: "toast-text",
                strong { "{notification.title}" }
                span { "{notification.description}" }
            }
            button {
                class: "toast-close",
                onclick: move |_| notifications.write().dismiss(id),
                "×"
            }
        }
    }
}
