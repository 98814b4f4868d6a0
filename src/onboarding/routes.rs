//! REST endpoints for driving onboarding and reading app state.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::appstate::store::AppStateStore;
use crate::error::FlowError;
use crate::gate::resolve;

use super::flow::OnboardingFlow;
use super::model::{Gender, Profile};
use super::state::OnboardingStep;

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub flow: Arc<OnboardingFlow>,
    pub store: Arc<AppStateStore>,
}

/// Onboarding status returned by the REST endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStatus {
    pub onboarded: bool,
    pub loading: bool,
    pub step: OnboardingStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/profile", get(get_profile))
        .route("/api/onboarding/phone", post(submit_phone))
        .route("/api/onboarding/code", post(submit_code))
        .route("/api/onboarding/basic-info", post(submit_basic_info))
        .route("/api/onboarding/preferences", post(submit_preferences))
        .route("/api/onboarding/restart", post(restart_flow))
        .route("/api/app/reset", post(reset_app))
        .route("/api/app/screen", get(get_screen))
        .with_state(state)
}

/// Map a flow error to its HTTP response: validation failures are 422,
/// out-of-order submissions are 409.
fn flow_error_response(err: &FlowError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        FlowError::StepMismatch { .. } => StatusCode::CONFLICT,
        FlowError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(serde_json::json!({"error": err.to_string()})))
}

fn step_response(step: OnboardingStep) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({"step": step})))
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "heartline"
    }))
}

// ── Status ──────────────────────────────────────────────────────────────

/// GET /api/onboarding/status
///
/// Returns the current onboarding status: the persisted onboarded flag,
/// the step the active flow is on, and the profile (if any).
async fn get_status(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    let step = state.flow.step().await;
    Json(OnboardingStatus {
        onboarded: snapshot.onboarded,
        loading: snapshot.loading,
        step,
        profile: snapshot.profile,
    })
}

/// GET /api/onboarding/profile
///
/// Returns the full profile, or 404 if onboarding has never completed.
async fn get_profile(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    match state.store.profile().await {
        Some(profile) => Json(serde_json::to_value(profile).unwrap_or_default()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "No profile exists yet"})),
        )
            .into_response(),
    }
}

// ── Flow steps ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PhoneRequest {
    phone: String,
}

/// POST /api/onboarding/phone
async fn submit_phone(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<PhoneRequest>,
) -> impl IntoResponse {
    match state.flow.submit_phone(&body.phone).await {
        Ok(step) => step_response(step),
        Err(e) => flow_error_response(&e),
    }
}

#[derive(Deserialize)]
struct CodeRequest {
    code: String,
}

/// POST /api/onboarding/code
async fn submit_code(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<CodeRequest>,
) -> impl IntoResponse {
    match state.flow.submit_code(&body.code).await {
        Ok(step) => step_response(step),
        Err(e) => flow_error_response(&e),
    }
}

#[derive(Deserialize)]
struct BasicInfoRequest {
    name: String,
    city: String,
    #[serde(default)]
    dob: Option<String>,
}

/// POST /api/onboarding/basic-info
async fn submit_basic_info(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<BasicInfoRequest>,
) -> impl IntoResponse {
    match state
        .flow
        .submit_basic_info(&body.name, &body.city, body.dob)
        .await
    {
        Ok(step) => step_response(step),
        Err(e) => flow_error_response(&e),
    }
}

#[derive(Deserialize)]
struct PreferencesRequest {
    #[serde(default)]
    gender: Option<Gender>,
    #[serde(default)]
    looking_for: Option<String>,
}

/// POST /api/onboarding/preferences
async fn submit_preferences(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<PreferencesRequest>,
) -> impl IntoResponse {
    match state
        .flow
        .submit_preferences(body.gender, body.looking_for)
        .await
    {
        Ok(step) => step_response(step),
        Err(e) => flow_error_response(&e),
    }
}

/// POST /api/onboarding/restart
///
/// Discards the in-progress draft. Saved app state is untouched.
async fn restart_flow(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    state.flow.restart().await;
    step_response(OnboardingStep::Phone)
}

// ── App state ───────────────────────────────────────────────────────────

/// POST /api/app/reset
///
/// Clears the saved app state and restarts the flow from the first step.
async fn reset_app(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    state.store.reset_onboarding().await;
    state.flow.restart().await;
    (StatusCode::OK, Json(serde_json::json!({"status": "reset"})))
}

/// GET /api/app/screen
///
/// The root the app should show: null while loading, then either
/// `onboarding` or `main`.
async fn get_screen(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let snapshot = state.store.snapshot().await;
    Json(serde_json::json!({
        "screen": resolve(&snapshot),
        "loading": snapshot.loading,
    }))
}
