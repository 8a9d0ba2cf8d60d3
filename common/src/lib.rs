//! Shared model and editor logic for the restaurant email composer.
//!
//! Everything in this crate is plain Rust so that the backend relay and the
//! yew frontend can share it, and so that it can be tested without a browser.

pub mod document;
pub mod model;
pub mod preview;
pub mod requests;
pub mod sse;
