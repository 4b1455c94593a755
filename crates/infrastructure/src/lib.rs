//! RESTLab Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod http;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestHttpClient;
pub use http::{BodyBuildError, BuiltBody, FileLoadError, build_body, load_file_handle};
pub use persistence::{FileKeyValueStore, MemoryKeyValueStore};
pub use serialization::{SerializationError, to_json_pretty};
