//! Annotation editor WASM API
//!
//! This module provides the JavaScript-facing API. It owns the session and
//! exposes commands and derived views over it.
//!
//! # Module Structure
//!
//! - `helpers`: Serialization, logging macros and session access
//! - `types`: Result structures returned to JavaScript
//! - `core`: The exported functions

pub mod helpers;
pub mod types;
pub mod core;

pub use self::core::*;
