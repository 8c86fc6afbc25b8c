//! HTTP route handlers for the playground.
//!
//! Each handler locks the workspace, performs one user action and releases
//! it. Confirmations travel in the request body; when one is needed but was
//! not given, the handler answers `409 Conflict` with the question so the page
//! can ask the user and retry.

use crate::clipboard::ReportedWrite;
use crate::error::PlaygroundError;
use crate::export::content_disposition;
use crate::models::{DisplayMode, Field, FontSize};
use crate::prompt::Answers;
use crate::store::SledSnapshotStore;
use crate::templates::render_playground;
use crate::workspace::Workspace;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::warn;

type Session<'a> = MutexGuard<'a, Workspace<SledSnapshotStore>>;

fn session(state: &AppState) -> Session<'_> {
    state
        .workspace
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

impl IntoResponse for PlaygroundError {
    fn into_response(self) -> Response {
        let status = match self {
            PlaygroundError::UnknownField(_) | PlaygroundError::EmptySnapshotName => {
                StatusCode::BAD_REQUEST
            }
            PlaygroundError::Storage(_)
            | PlaygroundError::Serialization(_)
            | PlaygroundError::CorruptIndex(_) => {
                warn!(error = %self, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

fn confirmation_required(answers: &Answers) -> Response {
    let prompt = answers.declined_prompt().unwrap_or_default();
    (StatusCode::CONFLICT, axum::Json(json!({ "prompt": prompt }))).into_response()
}

// ============================================================================
// Page and State
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let ws = session(&state);
    let names = ws.snapshot_names().unwrap_or_else(|e| {
        warn!(error = %e, "Cannot read snapshot index");
        Vec::new()
    });

    Html(render_playground(
        ws.bundle(),
        ws.editor().preferences(),
        &names,
        ws.preview(),
    ))
}

pub async fn state(State(state): State<Arc<AppState>>) -> Result<Response, PlaygroundError> {
    let ws = session(&state);
    let names = ws.snapshot_names()?;

    Ok(axum::Json(json!({
        "bundle": ws.bundle(),
        "preferences": ws.editor().preferences(),
        "names": names,
        "copied": ws.copied(Instant::now()),
    }))
    .into_response())
}

// ============================================================================
// Editing
// ============================================================================

#[derive(Deserialize)]
pub struct UpdateFieldBody {
    pub text: String,
}

pub async fn update_field(
    Path(field): Path<String>,
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<UpdateFieldBody>,
) -> Result<StatusCode, PlaygroundError> {
    let field: Field = field.parse()?;
    session(&state).update_field(field, body.text);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_active_field(
    Path(field): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, PlaygroundError> {
    let field: Field = field.parse()?;
    let mut ws = session(&state);
    ws.set_active_field(field);
    Ok(axum::Json(*ws.editor().preferences()).into_response())
}

#[derive(Deserialize, Default)]
pub struct ConfirmBody {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn reset_all(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ConfirmBody>,
) -> Response {
    let mut ws = session(&state);
    let mut answers = Answers::confirmed(body.confirm);

    if !ws.reset_all(&mut answers) {
        return confirmation_required(&answers);
    }

    axum::Json(json!({
        "bundle": ws.bundle(),
        "preferences": ws.editor().preferences(),
    }))
    .into_response()
}

pub async fn reset_field(
    Path(field): Path<String>,
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ConfirmBody>,
) -> Result<Response, PlaygroundError> {
    let field: Field = field.parse()?;
    let mut ws = session(&state);
    let mut answers = Answers::confirmed(body.confirm);

    if !ws.reset_field(field, &mut answers) {
        return Ok(confirmation_required(&answers));
    }

    Ok(axum::Json(json!({
        "bundle": ws.bundle(),
        "preferences": ws.editor().preferences(),
    }))
    .into_response())
}

// ============================================================================
// Preview
// ============================================================================

pub async fn run(State(state): State<Arc<AppState>>) -> Response {
    let mut ws = session(&state);
    let document = ws.run().to_string();
    axum::Json(json!({ "document": document })).into_response()
}

#[derive(Deserialize)]
pub struct DisplayBody {
    pub mode: DisplayMode,
}

pub async fn set_display_mode(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<DisplayBody>,
) -> Response {
    let mut ws = session(&state);
    ws.set_display_mode(body.mode);
    axum::Json(*ws.editor().preferences()).into_response()
}

pub async fn zoom(
    Path(direction): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let mut ws = session(&state);
    let document = match direction.as_str() {
        "in" => ws.zoom_in().map(str::to_string),
        "out" => ws.zoom_out().map(str::to_string),
        _ => return (StatusCode::BAD_REQUEST, "Zoom direction must be in or out").into_response(),
    };

    axum::Json(json!({
        "preferences": ws.editor().preferences(),
        "document": document,
    }))
    .into_response()
}

#[derive(Deserialize)]
pub struct PreviewFontBody {
    pub px: u32,
}

/// Out-of-range sizes are clamped. The preview is recomposed only when the
/// size actually changed.
pub async fn set_preview_font_size(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<PreviewFontBody>,
) -> Response {
    let mut ws = session(&state);
    let document = ws
        .set_preview_font_size(FontSize::clamped(body.px))
        .map(str::to_string);

    axum::Json(json!({
        "preferences": ws.editor().preferences(),
        "document": document,
    }))
    .into_response()
}

// ============================================================================
// Snapshots
// ============================================================================

pub async fn list_snapshots(
    State(state): State<Arc<AppState>>,
) -> Result<Response, PlaygroundError> {
    let names = session(&state).snapshot_names()?;
    Ok(axum::Json(json!({ "names": names })).into_response())
}

#[derive(Deserialize)]
pub struct SaveSnapshotBody {
    pub name: Option<String>,
}

pub async fn save_snapshot(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<SaveSnapshotBody>,
) -> Result<Response, PlaygroundError> {
    let mut ws = session(&state);
    let saved = ws.save_snapshot(&mut Answers::with_text(body.name))?;
    let names = ws.snapshot_names()?;
    Ok(axum::Json(json!({ "saved": saved, "names": names })).into_response())
}

pub async fn load_snapshot(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, PlaygroundError> {
    let mut ws = session(&state);
    let loaded = ws.load_snapshot(&name)?;
    Ok(axum::Json(json!({ "loaded": loaded, "bundle": ws.bundle() })).into_response())
}

pub async fn delete_snapshot(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ConfirmBody>,
) -> Result<Response, PlaygroundError> {
    let mut ws = session(&state);
    let mut answers = Answers::confirmed(body.confirm);
    let deleted = ws.delete_snapshot(&name, &mut answers)?;

    if answers.declined_prompt().is_some() {
        return Ok(confirmation_required(&answers));
    }

    let names = ws.snapshot_names()?;
    Ok(axum::Json(json!({ "deleted": deleted, "names": names })).into_response())
}

// ============================================================================
// Clipboard and Export
// ============================================================================

#[derive(Deserialize)]
pub struct CopyReport {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// First half of a copy: the text the page should put on the clipboard.
pub async fn copy(State(state): State<Arc<AppState>>) -> Response {
    let ws = session(&state);
    axum::Json(json!({
        "field": ws.editor().active_field(),
        "text": ws.editor().active_text(),
    }))
    .into_response()
}

/// Second half: the page reports how its clipboard write went.
pub async fn copy_ack(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<CopyReport>,
) -> Response {
    let mut clipboard = ReportedWrite::new(body.ok, body.error);
    let copied = session(&state).copy_active_field(&mut clipboard, Instant::now());
    axum::Json(json!({ "copied": copied, "text": clipboard.written })).into_response()
}

pub async fn export(State(state): State<Arc<AppState>>) -> Result<Response, PlaygroundError> {
    let json = session(&state).export()?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition()),
        ],
        json,
    )
        .into_response())
}
