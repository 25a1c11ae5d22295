//! Network integration for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! The core crate owns URL resolution, headers, and error translation; this
//! module only moves bytes through `fetch` with the session cookie attached.

pub mod browser;
