//! Login request and response bodies for `/api/v1/auth/login`.

use serde::{Deserialize, Serialize};

use super::Member;

/// Credentials sent to the login endpoint. `username` is the member's email.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Successful login: the issued token plus the authenticated member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    #[serde(default)]
    pub token: String,
    #[serde(rename = "memberDTO", default)]
    pub member: Option<Member>,
}
