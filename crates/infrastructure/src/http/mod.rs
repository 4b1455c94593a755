//! HTTP infrastructure utilities.
//!
//! This module provides:
//! - Body building for raw JSON, url-encoded and multipart bodies
//! - Loading files for multipart file fields

mod body_builder;
mod file_loader;

pub use body_builder::{BodyBuildError, BuiltBody, build_body};
pub use file_loader::{FileLoadError, load_file_handle};
