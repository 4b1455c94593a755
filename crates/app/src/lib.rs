//! RESTLab headless workbench.
//!
//! Configuration and text rendering used by the `restlab` binary.

pub mod config;
pub mod presentation;

pub use config::{AppConfig, ConfigError, DATA_DIR_ENV, EPHEMERAL_ENV, Storage};
pub use presentation::{render_envelope, render_sidebar, render_tab_strip};
