//! Wire models for the member API.

mod auth;
mod member;

pub use auth::{AuthenticationResponse, LoginRequest};
pub use member::{Gender, Member, MemberRegistrationRequest, MemberUpdateRequest};
