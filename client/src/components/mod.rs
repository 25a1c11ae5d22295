//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render account screens while reading shared state from Leptos
//! context providers and calling the core's submit flows.

pub mod app_sidebar;
pub mod login_card;
pub mod notice_tray;
pub mod profile_sheet;
pub mod register_card;
