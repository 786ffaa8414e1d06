//! Signup page. A successful registration logs the new member in.

use dioxus::prelude::*;
use tracing::warn;
use ui::{notify_error, use_auth, use_notifications, use_session, CreateMemberForm};

use crate::Route;

#[component]
pub fn Signup() -> Element {
    let auth = use_auth();
    let session = use_session();
    let nav = use_navigator();
    let mut notifications = use_notifications();

    use_effect(move || {
        if auth().is_authenticated() {
            nav.replace(Route::Dashboard {});
        }
    });

    let on_registered = move |token: Option<String>| {
        let Some(token) = token else {
            warn!("Signup response carried no token");
            nav.push(Route::Login {});
            return;
        };
        match session.complete_signup(&token) {
            Ok(_) => {
                nav.replace(Route::Dashboard {});
            }
            Err(e) => {
                warn!("Could not start session after signup: {}", e);
                notify_error(&mut notifications, "Signup", &e.to_string());
                nav.push(Route::Login {});
            }
        }
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Register for an account" }
                CreateMemberForm {
                    submit_label: "Signup",
                    on_success: on_registered,
                }
                p {
                    class: "auth-switch",
                    "Have an account? "
                    Link { to: Route::Login {}, "Login now." }
                }
            }
        }
    }
}
