//! RESTLab Domain - Core business types
//!
//! This crate defines the domain model for the RESTLab API client:
//! tabs, request composition, response envelopes and saved requests.
//! All types here are pure Rust with no I/O dependencies.

pub mod catalog;
pub mod error;
pub mod id;
pub mod request;
pub mod response;
pub mod settings;
pub mod tab;

pub use catalog::{DEFAULT_GROUP, GroupTarget, RequestSnapshot, SaveOutcome, SavedGroups};
pub use error::{DomainError, DomainResult};
pub use id::{TabId, generate_id};
pub use response::{EnvelopeStatus, ResponseEnvelope};
pub use settings::ThemeMode;
pub use tab::{DEFAULT_RAW_BODY, Tab, TabEdit};
