//! Axum route handlers for the optimize relay.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::optimize::prompts::build_optimize_prompt;
use crate::state::AppState;

pub const MISSING_JOB_DESCRIPTION: &str = "Job description is required";
pub const JOB_DESCRIPTION_TOO_LARGE: &str = "Job description is too large";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    #[serde(rename = "jobDescription", default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/optimize
///
/// Wraps the job description in the optimization prompt and returns the
/// model's rewrite. One upstream call per request, never retried.
pub async fn handle_optimize(
    State(state): State<AppState>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => Some(request),
        // Oversized bodies keep their own status; the field may well be present.
        Err(JsonRejection::BytesRejection(rejection))
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
        {
            return Err(AppError::PayloadTooLarge(
                JOB_DESCRIPTION_TOO_LARGE.to_string(),
            ));
        }
        Err(_) => None,
    };

    let job_description = request
        .and_then(|request| request.job_description)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_JOB_DESCRIPTION.to_string()))?;

    let request_id = Uuid::new_v4();
    info!(
        "Optimizing job description: request_id={request_id} chars={}",
        job_description.chars().count()
    );

    let prompt = build_optimize_prompt(&job_description);
    let optimized = state.llm.complete(&prompt).await?;

    info!(
        "Optimization complete: request_id={request_id} chars={}",
        optimized.chars().count()
    );

    Ok(Json(OptimizeResponse { optimized }))
}

/// Any non-POST method on /api/optimize.
pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
