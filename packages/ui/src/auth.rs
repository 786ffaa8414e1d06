//! Authentication context and hooks for the UI.

use std::time::Duration;

use api::{ApiClient, ClientConfig, MemberEvents, SessionMember, SessionService};
use dioxus::prelude::*;
use tracing::{error, info};

use crate::notifications::{notify_error, use_notifications};
use crate::platform::{make_token_store, sleep};

const EXPIRY_CHECK_INTERVAL: Duration = Duration::from_secs(15);

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub member: Option<SessionMember>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.member.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the member logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_session() -> SessionService {
    use_context::<SessionService>()
}

pub fn use_member_events() -> MemberEvents {
    use_context::<MemberEvents>()
}

/// Provider component that owns the API client, the session and the member event
/// channel, and exposes them through context.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let api = use_hook(|| ApiClient::new(ClientConfig::from_env(), make_token_store()));
    let session = use_hook(|| {
        let session = SessionService::for_client(&api);
        session.init();
        session
    });
    let events = use_hook(MemberEvents::new);
    let mut auth_state = use_signal(|| AuthState {
        member: session.member(),
    });

    use_context_provider(|| api.clone());
    use_context_provider(|| session.clone());
    use_context_provider(|| events.clone());
    use_context_provider(|| auth_state);

    // Mirror every session change into the signal
    let watched = session.clone();
    use_future(move || {
        let session = watched.clone();
        async move {
            let mut rx = session.subscribe();
            while rx.changed().await.is_ok() {
                let member = rx.borrow_and_update().clone();
                auth_state.set(AuthState { member });
            }
        }
    });

    // Tokens can expire while the app is open
    let expiring = session.clone();
    use_future(move || {
        let session = expiring.clone();
        async move {
            loop {
                sleep(EXPIRY_CHECK_INTERVAL).await;
                session.expire_if_due();
            }
        }
    });

    use_drop(move || session.teardown());

    rsx! {
        {children}
    }
}

/// Button to log out the current member.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();
    let mut notifications = use_notifications();

    let onclick = move |_: MouseEvent| match session.logout() {
        Ok(()) => info!("Signed out"),
        Err(e) => {
            error!("Failed to clear session: {}", e);
            notify_error(&mut notifications, "Sign out failed", &e.to_string());
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
