//! This crate contains all shared UI for the dashboard.

use dioxus::prelude::*;

pub mod components;
pub mod flows;
pub mod form;
pub mod listing;
pub mod upload;
pub mod validation;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");

mod auth;
pub use auth::{make_session, sign_in, sign_out, use_auth, AuthProvider, AuthState};

mod client;
pub use client::{make_client, use_client, use_config, DashboardClient};

mod notice;
pub use notice::{use_notice, ConfirmDialog, Notice, NoticeKind, NoticeProvider};
