use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn PageNotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "auth-page",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Login {}, "Back to login" }
        }
    }
}
