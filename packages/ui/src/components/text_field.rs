use std::collections::HashSet;

use api::{Field, FieldErrors};
use dioxus::prelude::*;

/// Labelled input with an inline validation message.
#[component]
pub fn TextField(
    id: String,
    label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
    value: String,
    /// Empty when there is nothing to report.
    #[props(default)]
    error: String,
    oninput: EventHandler<String>,
    onblur: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "field",
            label { r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                name: "{id}",
                class: if error.is_empty() { "input" } else { "input invalid" },
                r#type: "{input_type}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
                onblur: move |_| onblur.call(()),
            }
            if !error.is_empty() {
                div { class: "field-error", role: "alert", "{error}" }
            }
        }
    }
}

/// The message to show for `field`: only once the user has left the field.
pub fn visible_error(errors: &FieldErrors, touched: &HashSet<Field>, field: Field) -> String {
    if touched.contains(&field) {
        errors.get(field).unwrap_or_default().to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::LoginDraft;

    #[test]
    fn test_errors_hidden_until_touched() {
        let errors = LoginDraft::default().validate();
        let mut touched = HashSet::new();
        assert_eq!(visible_error(&errors, &touched, Field::Username), "");

        touched.insert(Field::Username);
        assert_eq!(
            visible_error(&errors, &touched, Field::Username),
            "Email is required"
        );
        assert_eq!(visible_error(&errors, &touched, Field::Password), "");
    }
}
