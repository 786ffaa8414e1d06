//! # Form validation
//!
//! Each form in the UI edits a *draft* of raw strings. A draft's `validate()` is a
//! pure function returning [`FieldErrors`]; the form disables submit while it is
//! non-empty and shows each message next to its field. Requests can only be built
//! from a draft through `to_request()`, which fails with the same errors, so an
//! invalid record never reaches [`crate::ApiClient`].
//!
//! | Draft | Fields | Produces |
//! |-------|--------|----------|
//! | [`RegistrationDraft`] | name, email, age, password, gender | [`MemberRegistrationRequest`] |
//! | [`UpdateDraft`] | name, email, age | [`MemberUpdateRequest`] |
//! | [`LoginDraft`] | username, password | [`LoginRequest`] |

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Gender, LoginRequest, Member, MemberRegistrationRequest, MemberUpdateRequest};

pub const NAME_MAX_CHARS: usize = 15;
pub const PASSWORD_MAX_CHARS: usize = 20;
pub const AGE_MIN: i32 = 16;
pub const AGE_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Age,
    Password,
    Gender,
    Username,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
            Field::Password => "password",
            Field::Gender => "gender",
            Field::Username => "username",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn check(&mut self, field: Field, result: Option<&'static str>) {
        if let Some(message) = result {
            self.0.insert(field, message);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

pub fn check_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("Required")
    } else if name.chars().count() > NAME_MAX_CHARS {
        Some("Must be 15 characters or less")
    } else {
        None
    }
}

pub fn check_email(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Required")
    } else if !is_valid_email(email) {
        Some("Must be a valid email")
    } else {
        None
    }
}

pub fn check_age(age: &str) -> Option<&'static str> {
    let age = age.trim();
    if age.is_empty() {
        return Some("Required");
    }
    match age.parse::<i32>() {
        Err(_) => Some("Must be a whole number"),
        Ok(a) if a < AGE_MIN => Some("Must be at least 16 years of age"),
        Ok(a) if a > AGE_MAX => Some("Must be 100 years of age or less"),
        Ok(_) => None,
    }
}

pub fn check_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Password is required")
    } else if password.chars().count() > PASSWORD_MAX_CHARS {
        Some("Password cannot be more than 20 characters")
    } else {
        None
    }
}

pub fn check_gender(gender: &str) -> Option<&'static str> {
    match Gender::parse(gender) {
        Some(_) => None,
        None => Some("Required"),
    }
}

/// Structural email check: `local@domain.tld`, no whitespace, one `@`,
/// dot-separated domain labels of letters, digits and inner hyphens.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

fn parse_age(age: &str) -> i32 {
    age.trim().parse().unwrap_or_default()
}

/// Signup / "Create Member" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub age: String,
    pub password: String,
    pub gender: String,
}

impl RegistrationDraft {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        errors.check(Field::Name, check_name(&self.name));
        errors.check(Field::Email, check_email(&self.email));
        errors.check(Field::Age, check_age(&self.age));
        errors.check(Field::Password, check_password(&self.password));
        errors.check(Field::Gender, check_gender(&self.gender));
        errors
    }

    pub fn to_request(&self) -> Result<MemberRegistrationRequest, FieldErrors> {
        let errors = self.validate();
        if !errors.is_valid() {
            return Err(errors);
        }
        let Some(gender) = Gender::parse(&self.gender) else {
            return Err(errors);
        };
        Ok(MemberRegistrationRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: parse_age(&self.age),
            password: self.password.clone(),
            gender,
        })
    }
}

/// Update form, seeded from the member being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDraft {
    pub name: String,
    pub email: String,
    pub age: String,
    pub gender: Option<Gender>,
}

impl From<&Member> for UpdateDraft {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            age: member.age.to_string(),
            gender: member.gender,
        }
    }
}

impl UpdateDraft {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        errors.check(Field::Name, check_name(&self.name));
        errors.check(Field::Email, check_email(&self.email));
        errors.check(Field::Age, check_age(&self.age));
        errors
    }

    /// Whether any field differs from `initial`. Unchanged drafts are not submitted.
    pub fn is_dirty(&self, initial: &UpdateDraft) -> bool {
        self.name != initial.name
            || self.email != initial.email
            || self.age.trim() != initial.age.trim()
    }

    pub fn to_request(&self) -> Result<MemberUpdateRequest, FieldErrors> {
        let errors = self.validate();
        if !errors.is_valid() {
            return Err(errors);
        }
        Ok(MemberUpdateRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: parse_age(&self.age),
            gender: self.gender,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub username: String,
    pub password: String,
}

impl LoginDraft {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        let username = if self.username.trim().is_empty() {
            Some("Email is required")
        } else if !is_valid_email(&self.username) {
            Some("Must be valid email")
        } else {
            None
        };
        errors.check(Field::Username, username);
        errors.check(Field::Password, check_password(&self.password));
        errors
    }

    pub fn to_request(&self) -> Result<LoginRequest, FieldErrors> {
        let errors = self.validate();
        if !errors.is_valid() {
            return Err(errors);
        }
        Ok(LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
