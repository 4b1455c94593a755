//! RESTLab Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (persistent store, HTTP client)
//! - The tab store, request dispatcher and saved-request catalog
//! - The workbench that wires them together

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod ports;
pub mod settings;
pub mod tab_store;
pub mod workbench;

#[cfg(test)]
mod test_support;

pub use catalog::SavedRequestCatalog;
pub use dispatch::{
    DispatchError, DispatchRequest, FETCH_FAILED, ValidationError, compose, normalize,
};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError, KeyValueStore, StoreError};
pub use settings::ThemeSettings;
pub use tab_store::TabStore;
pub use workbench::Workbench;
