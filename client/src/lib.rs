//! # client
//!
//! Leptos client-side-rendered front end for the Swine Profiteer account
//! service: login, registration, and a dashboard shell with profile editing.
//!
//! All API access goes through the `profiteer` core. This crate supplies the
//! browser pieces it cannot: the `gloo-net` transport, the signal-backed
//! session store, and the views.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
