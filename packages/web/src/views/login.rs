//! Login page.

use dioxus::prelude::*;
use ui::{use_auth, LoginForm};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already logged in: go straight to the dashboard
    use_effect(move || {
        if auth().is_authenticated() {
            nav.replace(Route::Dashboard {});
        }
    });

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Sign in to your account" }
                LoginForm {
                    on_success: move |_| {
                        nav.replace(Route::Dashboard {});
                    },
                }
                p {
                    class: "auth-switch",
                    "Don't have an account? "
                    Link { to: Route::Signup {}, "Signup now." }
                }
            }
        }
    }
}
