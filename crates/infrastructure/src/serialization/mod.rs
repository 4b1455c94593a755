//! JSON helpers for displaying and exchanging request data.
//!
//! Pretty output uses 2-space indentation, matching how responses are shown
//! to the user.

mod json;

pub use json::*;
