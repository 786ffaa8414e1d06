use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let username = auth()
        .member
        .map(|m| m.username)
        .unwrap_or_default();

    rsx! {
        h1 { "Dashboard" }
        p { "Welcome back, {username}." }
        Link { to: Route::Members {}, "Manage members" }
    }
}
