//! Shared helpers for WASM API operations
//!
//! This module contains common patterns for serialization, error handling,
//! logging and access to the shared session across all API operations.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

use crate::models::{Session, SessionError, Transition};

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        ::log::debug!("[WASM] {}", format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        ::log::info!("[WASM] {}", format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        ::log::warn!("[WASM] ⚠️ {}", format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        ::log::error!("[WASM] ❌ {}", format!($($arg)*))
    };
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Session Access
// ============================================================================

/// Lock the shared session, turning a poisoned lock into a JS error
pub fn lock_session(session: &Mutex<Session>) -> Result<MutexGuard<'_, Session>, JsValue> {
    session.lock().map_err(|e| {
        wasm_error!("Session lock poisoned: {}", e);
        JsValue::from_str("Session lock poisoned")
    })
}

/// Run one command against the session held in `slot`
///
/// The current value is moved out, the command produces the next value, and
/// the next value is stored back before the result is returned. With the
/// slot behind a mutex this makes every command atomic.
pub fn apply<T>(slot: &mut Session, command: impl FnOnce(Session) -> Transition<T>) -> Result<T, SessionError> {
    let current = std::mem::take(slot);
    let (next, result) = command(current);
    *slot = next;
    result
}
