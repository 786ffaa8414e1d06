//! # Member records as served by `/api/v1/members`
//!
//! ## [`Member`]
//!
//! The read model returned by the list and detail endpoints. Fields are camelCase on
//! the wire:
//!
//! - `id` — server-assigned, never changes.
//! - `name`, `email`, `age` — editable profile fields. `email` doubles as the login
//!   username, which the server also echoes back as `username`.
//! - `gender` — `MALE` or `FEMALE`; may be absent on older records.
//! - `roles` — granted authorities, e.g. `ROLE_USER`.
//! - `profileImageId` — set once an image has been uploaded. The image itself is
//!   fetched through [`crate::ApiClient::profile_image_url`].
//!
//! ## Requests
//!
//! [`MemberRegistrationRequest`] creates a member (signup or the "Create Member"
//! drawer) and carries the password. [`MemberUpdateRequest`] only touches profile
//! fields. Both are normally produced from a validated draft in
//! [`crate::validation`], never assembled by hand in the UI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Wire value, also used as the `<option>` value in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// A member as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile_image_id: Option<String>,
}

impl Member {
    pub fn has_profile_image(&self) -> bool {
        self.profile_image_id.is_some()
    }
}

/// Body of `POST /api/v1/members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub password: String,
    pub gender: Gender,
}

/// Body of `PUT /api/v1/members/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberUpdateRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl From<&Member> for MemberUpdateRequest {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            age: member.age,
            gender: member.gender,
        }
    }
}
