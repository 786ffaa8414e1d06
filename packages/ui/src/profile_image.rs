//! Drag-and-drop / file-picker upload of a member's profile picture.

use std::sync::Arc;

use api::{mutations, ApiClient, MemberEvents};
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use tracing::warn;

use crate::auth::{use_api, use_member_events};
use crate::notifications::{notify_error, notify_success, use_notifications, Notifications};

const UPLOAD_FAILED: &str = "Failed to upload the image!";

/// Upload the first of the given files as the member's profile picture.
async fn upload_first(
    files: Arc<dyn FileEngine>,
    api: ApiClient,
    events: MemberEvents,
    member_id: i64,
    mut notifications: Signal<Notifications>,
) {
    let Some(file_name) = files.files().into_iter().next() else {
        return;
    };
    let Some(bytes) = files.read_file(&file_name).await else {
        warn!("Could not read {}", file_name);
        notify_error(&mut notifications, "Error", UPLOAD_FAILED);
        return;
    };

    match mutations::upload_profile_image(&api, &events, member_id, &file_name, bytes).await {
        Ok(()) => notify_success(&mut notifications, "Success", "Profile picture uploaded"),
        Err(e) => {
            warn!("Profile image upload for member {} failed: {}", member_id, e);
            notify_error(&mut notifications, "Error", UPLOAD_FAILED);
        }
    }
}

/// Drop zone that also opens a file picker when clicked.
#[component]
pub fn ProfileImageDropzone(member_id: i64) -> Element {
    let api = use_api();
    let events = use_member_events();
    let notifications = use_notifications();
    let mut hovering = use_signal(|| false);
    let mut uploading = use_signal(|| false);

    let start_upload = move |files: Option<Arc<dyn FileEngine>>| {
        let Some(files) = files else {
            return;
        };
        let api = api.clone();
        let events = events.clone();
        spawn(async move {
            uploading.set(true);
            upload_first(files, api, events, member_id, notifications).await;
            uploading.set(false);
        });
    };
    let on_pick = start_upload.clone();
    let on_drop = start_upload;

    let input_id = format!("profile-image-{member_id}");

    rsx! {
        label {
            r#for: "{input_id}",
            class: if hovering() { "dropzone active" } else { "dropzone" },
            ondragover: move |evt: DragEvent| {
                evt.prevent_default();
                hovering.set(true);
            },
            ondragleave: move |_| hovering.set(false),
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                hovering.set(false);
                on_drop(evt.files());
            },
            input {
                id: "{input_id}",
                r#type: "file",
                accept: "image/*",
                class: "visually-hidden",
                onchange: move |evt: FormEvent| on_pick(evt.files()),
            }
            if uploading() {
                "Uploading..."
            } else if hovering() {
                "Drop the picture here..."
            } else {
                "Drag 'n' drop profile picture here, or click to select picture"
            }
        }
    }
}
