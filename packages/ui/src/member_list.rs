//! The member list and its loading states.

use api::{ApiError, Member, SessionService};
use dioxus::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::auth::{use_api, use_member_events, use_session};
use crate::create_member_drawer::CreateMemberDrawer;
use crate::member_card::MemberCard;
use crate::notifications::{use_notifications, Notifications};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Error { code: String, message: String },
    Empty,
    Loaded(Vec<Member>),
}

impl ListState {
    pub fn from_result(result: Result<Vec<Member>, ApiError>) -> Self {
        match result {
            Ok(members) if members.is_empty() => ListState::Empty,
            Ok(members) => ListState::Loaded(members),
            Err(e) => ListState::Error {
                code: e.code().to_string(),
                message: e.message().to_string(),
            },
        }
    }

    /// State to show while a fetch is in flight. A loaded list stays on screen
    /// during a re-fetch so open drawers are not torn down.
    pub fn begin_fetch(&self) -> Self {
        match self {
            ListState::Loaded(members) => ListState::Loaded(members.clone()),
            _ => ListState::Loading,
        }
    }

    /// Only settled states offer the "Create Member" entry point.
    pub fn shows_create_entry(&self) -> bool {
        !matches!(self, ListState::Idle | ListState::Loading)
    }
}

/// Surface a failed fetch as a toast, and end the session if the server refused its token.
pub(crate) fn report_fetch_failure(
    notifications: &mut Notifications,
    session: &SessionService,
    err: &ApiError,
) {
    warn!("Failed to fetch members: {}", err);
    notifications.push_api_error(err);
    session.end_if_unauthorized(err);
}

/// Fetches the members on mount and again after every member change.
#[component]
pub fn MemberList() -> Element {
    let api = use_api();
    let session = use_session();
    let events = use_member_events();
    let mut notifications = use_notifications();
    let mut state = use_signal(ListState::default);

    use_future(move || {
        let api = api.clone();
        let session = session.clone();
        let mut rx = events.subscribe();
        async move {
            loop {
                let next = state.peek().begin_fetch();
                state.set(next);
                let result = api.list_members().await;
                match &result {
                    Ok(members) => debug!("Fetched {} members", members.len()),
                    Err(e) => report_fetch_failure(&mut notifications.write(), &session, e),
                }
                state.set(ListState::from_result(result));

                match rx.recv().await {
                    Ok(event) => info!("Refreshing members after {:?}", event),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Member list skipped {} events", skipped)
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    });

    let current = state();

    rsx! {
        section {
            class: "member-list",
            if current.shows_create_entry() {
                CreateMemberDrawer {}
            }
            match current {
                ListState::Idle => rsx! {},
                ListState::Loading => rsx! {
                    div { class: "spinner", role: "progressbar", "Loading..." }
                },
                ListState::Error { code, message } => rsx! {
                    div {
                        class: "alert alert-error",
                        role: "alert",
                        strong { "There was an error!" }
                        p { "{code}: {message}" }
                    }
                },
                ListState::Empty => rsx! {
                    div { class: "alert alert-warning", "No members exist" }
                },
                ListState::Loaded(members) => rsx! {
                    div {
                        class: "member-grid",
                        for member in members {
                            MemberCard { key: "{member.id}", member }
                        }
                    }
                },
            }
        }
    }
}
