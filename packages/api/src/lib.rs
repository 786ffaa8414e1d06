//! # API crate — member service client core
//!
//! Everything the dashboard needs to talk to the member service, with no UI in it.
//! The `ui` crate and the `web` app build on these types; the tests here run natively
//! against an in-process fake server.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: one async method per REST endpoint, bearer token read per request |
//! | [`config`] | [`ClientConfig`]: base URL, token storage key, timeout; build-time and runtime env |
//! | [`error`] | [`ApiError`]: status-classified failures carrying the server's message |
//! | [`events`] | [`MemberEvents`]: broadcast channel from member mutations to list views |
//! | [`models`] | Wire types: [`Member`], registration/update/login requests, auth response |
//! | [`mutations`] | Create/update/delete/upload that publish a [`MemberEvent`] on success |
//! | [`session`] | [`SessionService`]: login, signup completion, logout, observable member |
//! | [`token`] | Unverified JWT claim decoding and the platform clock |
//! | [`validation`] | Pure per-form rule sets returning [`FieldErrors`] |

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod mutations;
pub mod session;
pub mod token;
pub mod validation;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use events::{MemberEvent, MemberEvents};
pub use models::{
    AuthenticationResponse, Gender, LoginRequest, Member, MemberRegistrationRequest,
    MemberUpdateRequest,
};
pub use session::{SessionError, SessionMember, SessionService};
pub use validation::{Field, FieldErrors, LoginDraft, RegistrationDraft, UpdateDraft};
