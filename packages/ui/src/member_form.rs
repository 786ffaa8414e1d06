//! Create and update forms for members.

use std::collections::HashSet;

use api::{mutations, Field, Gender, Member, RegistrationDraft, UpdateDraft};
use dioxus::prelude::*;

use crate::auth::{use_api, use_member_events};
use crate::components::{visible_error, Submission, TextField};
use crate::notifications::{notify_api_error, notify_success, use_notifications};

/// Create a member. `on_success` receives the token issued for the new member;
/// the signup page uses it to start a session, the dashboard ignores it.
#[component]
pub fn CreateMemberForm(
    on_success: EventHandler<Option<String>>,
    #[props(default = "Submit".to_string())] submit_label: String,
) -> Element {
    let api = use_api();
    let events = use_member_events();
    let mut notifications = use_notifications();

    let mut draft = use_signal(RegistrationDraft::default);
    let mut touched = use_signal(HashSet::<Field>::new);
    let mut submission = use_signal(Submission::default);

    let errors = draft.read().validate();
    let can_submit = errors.is_valid() && !submission.read().in_flight();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match draft.read().to_request() {
            Ok(request) => request,
            Err(invalid) => {
                touched.write().extend(invalid.fields());
                return;
            }
        };
        let api = api.clone();
        let events = events.clone();
        if !submission.write().begin() {
            return;
        }
        spawn(async move {
            match mutations::create_member(&api, &events, &request).await {
                Ok(token) => {
                    notify_success(
                        &mut notifications,
                        "Member saved",
                        &format!("{} was successfully saved", request.name),
                    );
                    draft.set(RegistrationDraft::default());
                    touched.write().clear();
                    on_success.call(token);
                }
                Err(e) => notify_api_error(&mut notifications, &e),
            }
            submission.write().finish();
        });
    };

    let field_error = move |field: Field| visible_error(&errors, &touched.read(), field);

    rsx! {
        form {
            class: "form",
            onsubmit: handle_submit,
            TextField {
                id: "name",
                label: "Name",
                placeholder: "Jane",
                value: draft.read().name.clone(),
                error: field_error(Field::Name),
                oninput: move |value| draft.write().name = value,
                onblur: move |_| { touched.write().insert(Field::Name); },
            }
            TextField {
                id: "email",
                label: "Email Address",
                input_type: "email",
                placeholder: "jane@example.com",
                value: draft.read().email.clone(),
                error: field_error(Field::Email),
                oninput: move |value| draft.write().email = value,
                onblur: move |_| { touched.write().insert(Field::Email); },
            }
            TextField {
                id: "age",
                label: "Age",
                input_type: "number",
                placeholder: "20",
                value: draft.read().age.clone(),
                error: field_error(Field::Age),
                oninput: move |value| draft.write().age = value,
                onblur: move |_| { touched.write().insert(Field::Age); },
            }
            TextField {
                id: "password",
                label: "Password",
                input_type: "password",
                placeholder: "Pick a secure password",
                value: draft.read().password.clone(),
                error: field_error(Field::Password),
                oninput: move |value| draft.write().password = value,
                onblur: move |_| { touched.write().insert(Field::Password); },
            }
            GenderSelect {
                value: draft.read().gender.clone(),
                error: field_error(Field::Gender),
                onchange: move |value| draft.write().gender = value,
                onblur: move |_| { touched.write().insert(Field::Gender); },
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: !can_submit,
                "{submit_label}"
            }
        }
    }
}

#[component]
fn GenderSelect(
    value: String,
    error: String,
    onchange: EventHandler<String>,
    onblur: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "field",
            label { r#for: "gender", "Gender" }
            select {
                id: "gender",
                name: "gender",
                class: if error.is_empty() { "input" } else { "input invalid" },
                value: "{value}",
                onchange: move |evt: FormEvent| onchange.call(evt.value()),
                onblur: move |_| onblur.call(()),
                option { value: "", "Select a gender" }
                for (wire, label) in Gender::ALL.iter().map(|g| (g.as_str(), g.label())) {
                    option {
                        key: "{wire}",
                        value: wire,
                        selected: value == wire,
                        "{label}"
                    }
                }
            }
            if !error.is_empty() {
                div { class: "field-error", role: "alert", "{error}" }
            }
        }
    }
}

/// Edit an existing member's name, email and age.
/// Submitting requires at least one change from the values the form was mounted with;
/// remount (close and reopen the drawer) to pick up a fresher copy of the member.
#[component]
pub fn UpdateMemberForm(member: Member) -> Element {
    let api = use_api();
    let events = use_member_events();
    let mut notifications = use_notifications();

    let id = member.id;
    let mut initial = use_signal(|| UpdateDraft::from(&member));
    let mut draft = use_signal(|| UpdateDraft::from(&member));
    let mut touched = use_signal(HashSet::<Field>::new);
    let mut submission = use_signal(Submission::default);

    let errors = draft.read().validate();
    let dirty = draft.read().is_dirty(&initial.read());
    let can_submit = errors.is_valid() && dirty && !submission.read().in_flight();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if !draft.read().is_dirty(&initial.read()) {
            return;
        }
        let request = match draft.read().to_request() {
            Ok(request) => request,
            Err(invalid) => {
                touched.write().extend(invalid.fields());
                return;
            }
        };
        let submitted = draft();
        let api = api.clone();
        let events = events.clone();
        if !submission.write().begin() {
            return;
        }
        spawn(async move {
            match mutations::update_member(&api, &events, id, &request).await {
                Ok(()) => {
                    initial.set(submitted);
                    notify_success(
                        &mut notifications,
                        "Member updated",
                        &format!("{} was successfully updated", request.name),
                    );
                }
                Err(e) => notify_api_error(&mut notifications, &e),
            }
            submission.write().finish();
        });
    };

    let field_error = move |field: Field| visible_error(&errors, &touched.read(), field);

    rsx! {
        form {
            class: "form",
            onsubmit: handle_submit,
            TextField {
                id: "name-{id}",
                label: "Name",
                value: draft.read().name.clone(),
                error: field_error(Field::Name),
                oninput: move |value| draft.write().name = value,
                onblur: move |_| { touched.write().insert(Field::Name); },
            }
            TextField {
                id: "email-{id}",
                label: "Email Address",
                input_type: "email",
                value: draft.read().email.clone(),
                error: field_error(Field::Email),
                oninput: move |value| draft.write().email = value,
                onblur: move |_| { touched.write().insert(Field::Email); },
            }
            TextField {
                id: "age-{id}",
                label: "Age",
                input_type: "number",
                value: draft.read().age.clone(),
                error: field_error(Field::Age),
                oninput: move |value| draft.write().age = value,
                onblur: move |_| { touched.write().insert(Field::Age); },
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: !can_submit,
                "Submit"
            }
        }
    }
}
