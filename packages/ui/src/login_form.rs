//! Email/password login form.

use std::collections::HashSet;

use api::{Field, LoginDraft, SessionError, SessionMember};
use dioxus::prelude::*;
use tracing::warn;

use crate::auth::{use_api, use_session};
use crate::components::{visible_error, Submission, TextField};
use crate::notifications::{notify_api_error, notify_error, use_notifications};

/// Login form. Calls `on_success` with the new session member once the token is stored.
#[component]
pub fn LoginForm(on_success: EventHandler<SessionMember>) -> Element {
    let api = use_api();
    let session = use_session();
    let mut notifications = use_notifications();

    let mut draft = use_signal(LoginDraft::default);
    let mut touched = use_signal(HashSet::<Field>::new);
    let mut submission = use_signal(Submission::default);

    let errors = draft.read().validate();
    let can_submit = errors.is_valid() && !submission.read().in_flight();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Ok(credentials) = draft.read().to_request() else {
            touched.set([Field::Username, Field::Password].into_iter().collect());
            return;
        };
        let api = api.clone();
        let session = session.clone();
        if !submission.write().begin() {
            return;
        }
        spawn(async move {
            match session.login(&api, &credentials).await {
                Ok(member) => on_success.call(member),
                Err(SessionError::Auth(e)) => notify_api_error(&mut notifications, &e),
                Err(e) => {
                    warn!("Login succeeded but the session could not start: {}", e);
                    notify_error(&mut notifications, "Login failed", &e.to_string());
                }
            }
            submission.write().finish();
        });
    };

    rsx! {
        form {
            class: "form",
            onsubmit: handle_submit,
            TextField {
                id: "username",
                label: "Email",
                input_type: "email",
                placeholder: "hello@example.com",
                value: draft.read().username.clone(),
                error: visible_error(&errors, &touched.read(), Field::Username),
                oninput: move |value| draft.write().username = value,
                onblur: move |_| { touched.write().insert(Field::Username); },
            }
            TextField {
                id: "password",
                label: "Password",
                input_type: "password",
                placeholder: "Type your password",
                value: draft.read().password.clone(),
                error: visible_error(&errors, &touched.read(), Field::Password),
                oninput: move |value| draft.write().password = value,
                onblur: move |_| { touched.write().insert(Field::Password); },
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: !can_submit,
                if submission.read().in_flight() { "Signing in..." } else { "Login" }
            }
        }
    }
}
