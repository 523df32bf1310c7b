//! WASM API for the annotation editor
//!
//! The session (document text plus annotations) lives here, behind a mutex.
//! Every exported mutation locks it, applies exactly one command and stores
//! the resulting value, so derived views are always computed from a settled
//! session.

use lazy_static::lazy_static;
use std::sync::Mutex;
use wasm_bindgen::prelude::*;

use super::helpers::{apply, deserialize, lock_session, serialize};
use super::types::{AddAnnotationResult, AnnotationListItem, AnnotationTypeInfo, CommandResult, MismatchReport};
use crate::diagnostics::drift_summary;
use crate::markdown::tokenize;
use crate::models::{AnnotationType, AnnotationUpdate, Session};
use crate::renderers::export::{annotated_markdown, full_payload, ExportOptions};
use crate::storage::{SessionStore, StorageConfig};
use crate::text::{Direction, TextRange};
use crate::{wasm_error, wasm_info, wasm_log, wasm_warn};

// WASM-owned session storage (canonical source of truth)
lazy_static! {
    static ref SESSION: Mutex<Session> = Mutex::new(Session::new());
}

#[cfg(target_arch = "wasm32")]
fn store() -> impl SessionStore {
    crate::storage::LocalStorageStore::new(&StorageConfig::default())
}

#[cfg(not(target_arch = "wasm32"))]
fn store() -> impl SessionStore {
    crate::storage::FileStore::in_dir(std::env::temp_dir(), &StorageConfig::default())
}

fn parse_type(kind: &str) -> Result<AnnotationType, JsValue> {
    kind.parse::<AnnotationType>().map_err(|e| {
        wasm_error!("{}", e);
        JsValue::from_str(&e.to_string())
    })
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// Replace the document text; annotations keep their offsets
#[wasm_bindgen(js_name = setDocument)]
pub fn set_document(text: String) -> Result<(), JsValue> {
    let mut session = lock_session(&SESSION)?;
    wasm_log!("setDocument: {} bytes", text.len());
    let current = std::mem::take(&mut *session);
    *session = current.set_document(text);
    Ok(())
}

/// Current session record `{ markdown, annotations, updatedAt }`
#[wasm_bindgen(js_name = getSession)]
pub fn get_session() -> Result<JsValue, JsValue> {
    let session = lock_session(&SESSION)?;
    serialize(&*session, "Failed to serialize session")
}

/// Restore the persisted session, if any; returns whether one was found
#[wasm_bindgen(js_name = loadSession)]
pub fn load_session() -> Result<bool, JsValue> {
    let loaded = store().load();
    let found = loaded.is_some();
    if let Some(saved) = loaded {
        wasm_info!("Restored session with {} annotation(s)", saved.annotations.len());
        *lock_session(&SESSION)? = saved;
    }
    Ok(found)
}

/// Persist the current session (best effort)
#[wasm_bindgen(js_name = saveSession)]
pub fn save_session() -> Result<(), JsValue> {
    let session = lock_session(&SESSION)?;
    store().save(&session);
    Ok(())
}

/// Reset to an empty session and forget the persisted copy
#[wasm_bindgen(js_name = clearSession)]
pub fn clear_session() -> Result<(), JsValue> {
    let mut session = lock_session(&SESSION)?;
    let current = std::mem::take(&mut *session);
    *session = current.clear();
    store().clear();
    wasm_info!("Session cleared");
    Ok(())
}

// ============================================================================
// Annotation commands
// ============================================================================

/// Create an annotation over `start..end`
///
/// Returns `{ success, id?, error? }`. Overlapping selections are rejected;
/// empty selections succeed without creating anything.
#[wasm_bindgen(js_name = addAnnotation)]
pub fn add_annotation(start: usize, end: usize, kind: &str, comment: String) -> Result<JsValue, JsValue> {
    wasm_info!("addAnnotation called: start={}, end={}, type={}", start, end, kind);
    let kind = parse_type(kind)?;

    let mut session = lock_session(&SESSION)?;
    let result = apply(&mut session, |s| s.add_annotation(TextRange::new(start, end), kind, comment));
    if let Err(err) = &result {
        wasm_warn!("  Annotation rejected: {}", err);
    }

    serialize(&AddAnnotationResult::from(result), "Failed to serialize add result")
}

/// Patch the type and/or comment of an annotation
///
/// `update_js` is `{ type?, comment? }`.
#[wasm_bindgen(js_name = updateAnnotation)]
pub fn update_annotation(id: &str, update_js: JsValue) -> Result<JsValue, JsValue> {
    let update: AnnotationUpdate = deserialize(update_js, "Failed to deserialize annotation update")?;
    let mut session = lock_session(&SESSION)?;
    let result = apply(&mut session, |s| s.update_annotation(id, update));
    serialize(&CommandResult::from(&result), "Failed to serialize update result")
}

/// Replace range, type and comment of an annotation, re-taking its snapshot
#[wasm_bindgen(js_name = replaceAnnotation)]
pub fn replace_annotation(id: &str, start: usize, end: usize, kind: &str, comment: String) -> Result<JsValue, JsValue> {
    let kind = parse_type(kind)?;
    let mut session = lock_session(&SESSION)?;
    let result = apply(&mut session, |s| {
        s.replace_annotation(id, TextRange::new(start, end), kind, comment)
    });
    serialize(&CommandResult::from(&result), "Failed to serialize replace result")
}

#[wasm_bindgen(js_name = deleteAnnotation)]
pub fn delete_annotation(id: &str) -> Result<JsValue, JsValue> {
    let mut session = lock_session(&SESSION)?;
    let result = apply(&mut session, |s| s.delete_annotation(id));
    serialize(&CommandResult::from(&result), "Failed to serialize delete result")
}

/// Check a candidate range against the current annotations
#[wasm_bindgen(js_name = hasOverlap)]
pub fn has_overlap(start: usize, end: usize, exclude_id: Option<String>) -> Result<bool, JsValue> {
    let session = lock_session(&SESSION)?;
    Ok(session
        .annotations
        .overlaps(TextRange::new(start, end), exclude_id.as_deref()))
}

// ============================================================================
// Derived views
// ============================================================================

/// Tokenize arbitrary markdown into style spans
#[wasm_bindgen(js_name = tokenizeMarkdown)]
pub fn tokenize_markdown(text: &str) -> Result<JsValue, JsValue> {
    serialize(&tokenize(text), "Failed to serialize spans")
}

/// Segments of the current document with their display nodes
#[wasm_bindgen(js_name = renderDocument)]
pub fn render_document() -> Result<JsValue, JsValue> {
    let session = lock_session(&SESSION)?;
    let rendered = session.render();
    wasm_log!("renderDocument: {} segment(s)", rendered.len());
    serialize(&rendered, "Failed to serialize rendered segments")
}

/// Annotations whose snapshot no longer matches the document
#[wasm_bindgen(js_name = findMismatches)]
pub fn find_mismatches() -> Result<JsValue, JsValue> {
    let session = lock_session(&SESSION)?;
    let mismatches = session.mismatches();
    let report = MismatchReport {
        count: mismatches.len(),
        summary: drift_summary(mismatches.len()),
        mismatches,
    };
    serialize(&report, "Failed to serialize mismatch report")
}

/// Drift marks and banner line `{ marks, summary? }`
#[wasm_bindgen(js_name = getDiagnostics)]
pub fn get_diagnostics() -> Result<JsValue, JsValue> {
    let session = lock_session(&SESSION)?;
    let diagnostics = session.diagnostics();
    wasm_log!("getDiagnostics: {} mark(s)", diagnostics.len());
    serialize(&diagnostics, "Failed to serialize diagnostics")
}

/// Annotation types for the type picker `[{ type, label, description, cssClass }]`
#[wasm_bindgen(js_name = annotationTypes)]
pub fn annotation_types() -> Result<JsValue, JsValue> {
    let entries: Vec<AnnotationTypeInfo> = AnnotationType::ALL.into_iter().map(Into::into).collect();
    serialize(&entries, "Failed to serialize annotation types")
}

/// Annotation list rows in document order, previews cut at `preview_chars`
#[wasm_bindgen(js_name = listAnnotations)]
pub fn list_annotations(preview_chars: usize) -> Result<JsValue, JsValue> {
    let session = lock_session(&SESSION)?;
    let rows: Vec<AnnotationListItem> = session
        .sorted_annotations()
        .into_iter()
        .map(|annotation| AnnotationListItem::new(annotation, preview_chars))
        .collect();
    serialize(&rows, "Failed to serialize annotation list")
}

/// Annotation under a click offset, or `undefined`
#[wasm_bindgen(js_name = annotationAt)]
pub fn annotation_at(offset: usize) -> Result<JsValue, JsValue> {
    let session = lock_session(&SESSION)?;
    serialize(&session.annotation_at(offset), "Failed to serialize annotation")
}

/// Next or previous annotation in document order, wrapping around
#[wasm_bindgen(js_name = navigateAnnotation)]
pub fn navigate_annotation(from_id: &str, forward: bool) -> Result<JsValue, JsValue> {
    let direction = if forward { Direction::Next } else { Direction::Previous };
    let session = lock_session(&SESSION)?;
    serialize(&session.navigate(from_id, direction), "Failed to serialize annotation")
}

// ============================================================================
// Export
// ============================================================================

#[wasm_bindgen(js_name = exportAnnotatedMarkdown)]
pub fn export_annotated_markdown() -> Result<String, JsValue> {
    let session = lock_session(&SESSION)?;
    Ok(annotated_markdown(&session.document, session.annotations.as_slice()))
}

/// Full reviewer payload; `options_js` is `{ instructionsPosition?, includeIndex? }`
#[wasm_bindgen(js_name = exportPayload)]
pub fn export_payload(options_js: JsValue) -> Result<String, JsValue> {
    let options: ExportOptions = if options_js.is_undefined() || options_js.is_null() {
        ExportOptions::default()
    } else {
        deserialize(options_js, "Failed to deserialize export options")?
    };

    let session = lock_session(&SESSION)?;
    full_payload(&session.document, session.annotations.as_slice(), &options).map_err(|e| {
        wasm_error!("Export failed: {}", e);
        JsValue::from_str(&e.to_string())
    })
}
