//! One member in the list: picture, details, update drawer and delete action.

use api::{mutations, Member};
use dioxus::prelude::*;

use crate::auth::{use_api, use_member_events};
use crate::components::Drawer;
use crate::member_form::UpdateMemberForm;
use crate::notifications::{notify_api_error, notify_success, use_notifications};
use crate::profile_image::ProfileImageDropzone;

/// Up to two uppercase initials for the avatar fallback.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Image source for a member. The image id is appended so a new upload
/// is not served from the browser cache.
pub fn profile_image_src(base: &str, member: &Member) -> Option<String> {
    member
        .profile_image_id
        .as_ref()
        .map(|image_id| format!("{base}?v={image_id}"))
}

#[component]
pub fn MemberCard(member: Member) -> Element {
    let api = use_api();
    let events = use_member_events();
    let mut notifications = use_notifications();
    let mut drawer_open = use_signal(|| false);
    let mut confirming = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let id = member.id;
    let image_src = profile_image_src(&api.profile_image_url(id), &member);
    let preview_src = image_src.clone();
    let avatar = initials(&member.name);
    let gender = member.gender.map(|g| g.label()).unwrap_or("Unknown");

    let name = member.name.clone();
    let delete = move |_: MouseEvent| {
        let api = api.clone();
        let events = events.clone();
        let name = name.clone();
        spawn(async move {
            deleting.set(true);
            match mutations::delete_member(&api, &events, id).await {
                Ok(()) => notify_success(
                    &mut notifications,
                    "Member deleted",
                    &format!("{name} was successfully deleted"),
                ),
                Err(e) => notify_api_error(&mut notifications, &e),
            }
            deleting.set(false);
            confirming.set(false);
        });
    };

    rsx! {
        article {
            class: "member-card",
            div {
                class: "member-avatar",
                if let Some(src) = image_src {
                    img { src: "{src}", alt: "{member.name}" }
                } else {
                    span { "{avatar}" }
                }
            }
            div {
                class: "member-details",
                h3 { "{member.name}" }
                span { class: "member-id", "#{member.id}" }
                p { "{member.email}" }
                p { "Age {member.age} | {gender}" }
            }
            div {
                class: "member-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| drawer_open.set(true),
                    "Update"
                }
                if confirming() {
                    button {
                        class: "btn btn-danger",
                        disabled: deleting(),
                        onclick: delete,
                        "Delete {member.name}"
                    }
                    button {
                        class: "btn btn-secondary",
                        disabled: deleting(),
                        onclick: move |_| confirming.set(false),
                        "Cancel"
                    }
                } else {
                    button {
                        class: "btn btn-danger",
                        onclick: move |_| confirming.set(true),
                        "Delete"
                    }
                }
            }
            Drawer {
                open: drawer_open(),
                title: "Update {member.name}",
                on_close: move |_| drawer_open.set(false),
                if let Some(src) = preview_src {
                    img {
                        class: "profile-preview",
                        src: "{src}",
                        alt: "Current profile picture of {member.name}",
                    }
                }
                ProfileImageDropzone { member_id: id }
                UpdateMemberForm { member: member.clone() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(profile_image_id: Option<&str>) -> Member {
        Member {
            id: 7,
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            age: 30,
            gender: None,
            roles: vec![],
            username: "jane@x.com".to_string(),
            profile_image_id: profile_image_id.map(str::to_string),
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Jane Doe"), "JD");
        assert_eq!(initials("  ada   lovelace byron "), "AL");
        assert_eq!(initials("Émile"), "É");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_profile_image_src_busts_cache() {
        let base = "http://localhost:8080/api/v1/members/7/profile-image";
        assert_eq!(profile_image_src(base, &member(None)), None);
        assert_eq!(
            profile_image_src(base, &member(Some("abc"))).as_deref(),
            Some("http://localhost:8080/api/v1/members/7/profile-image?v=abc")
        );
    }
}
