use dioxus::prelude::*;

use crate::components::Drawer;
use crate::member_form::CreateMemberForm;

/// "Create Member" button with its drawer. The drawer closes after a successful save.
#[component]
pub fn CreateMemberDrawer() -> Element {
    let mut open = use_signal(|| false);

    rsx! {
        button {
            class: "btn btn-primary create-member",
            onclick: move |_| open.set(true),
            "+ Create Member"
        }
        Drawer {
            open: open(),
            title: "Create new member",
            on_close: move |_| open.set(false),
            CreateMemberForm {
                on_success: move |_| open.set(false),
            }
        }
    }
}
