use dioxus::prelude::*;

/// A side panel over a dimmed backdrop.
/// Clicking the backdrop, the close button or the footer button triggers `on_close`.
#[component]
pub fn Drawer(open: bool, title: String, on_close: EventHandler<()>, children: Element) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        div {
            class: "drawer-backdrop",
            onclick: move |_| on_close.call(()),
            aside {
                class: "drawer",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                header {
                    class: "drawer-header",
                    h2 { "{title}" }
                    button {
                        class: "drawer-close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "drawer-body", {children} }
                footer {
                    class: "drawer-footer",
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
