//! This crate contains all shared UI for the dashboard.

use dioxus::prelude::*;

pub mod components;

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod platform;
pub use platform::make_token_store;

mod auth;
pub use auth::{
    use_api, use_auth, use_member_events, use_session, AuthProvider, AuthState, LogoutButton,
};

pub mod notifications;
pub use notifications::{
    notify_api_error, notify_error, notify_success, use_notifications, NotificationProvider,
};

mod login_form;
pub use login_form::LoginForm;

mod member_form;
pub use member_form::{CreateMemberForm, UpdateMemberForm};

mod profile_image;
pub use profile_image::ProfileImageDropzone;

mod member_card;
pub use member_card::MemberCard;

mod member_list;
pub use member_list::{ListState, MemberList};

mod create_member_drawer;
pub use create_member_drawer::CreateMemberDrawer;
