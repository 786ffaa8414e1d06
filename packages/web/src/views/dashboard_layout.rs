use dioxus::prelude::*;
use ui::{use_auth, use_session, LogoutButton};

use crate::Route;

/// Header and navigation around every dashboard page.
/// Visitors without a session are sent back to the login page.
#[component]
pub fn DashboardLayout() -> Element {
    let auth = use_auth();
    let session = use_session();
    let nav = use_navigator();

    // Re-check the token itself: it may have expired since the signal last changed
    use_effect(move || {
        if !auth().is_authenticated() || !session.is_authenticated() {
            nav.replace(Route::Login {});
        }
    });

    let Some(member) = auth().member else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "dashboard",
            header {
                class: "dashboard-header",
                nav {
                    class: "dashboard-nav",
                    Link { to: Route::Dashboard {}, "Home" }
                    Link { to: Route::Members {}, "Members" }
                }
                div {
                    class: "dashboard-user",
                    span { "{member.username}" }
                    for role in member.roles.iter() {
                        span { key: "{role}", class: "role-badge", "{role}" }
                    }
                    LogoutButton { class: "btn btn-secondary" }
                }
            }
            main {
                class: "dashboard-content",
                Outlet::<Route> {}
            }
        }
    }
}
