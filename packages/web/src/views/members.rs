use dioxus::prelude::*;
use ui::MemberList;

#[component]
pub fn Members() -> Element {
    rsx! {
        h1 { "Members" }
        MemberList {}
    }
}
