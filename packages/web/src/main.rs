use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{AuthProvider, NotificationProvider};
use views::{Dashboard, DashboardLayout, Login, Members, PageNotFound, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[layout(DashboardLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/dashboard/members")]
        Members {},
    #[end_layout]
    #[route("/:..segments")]
    PageNotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("Logger already initialized: {e}");
    }
    tracing::info!("Starting dashboard");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }

        NotificationProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}
