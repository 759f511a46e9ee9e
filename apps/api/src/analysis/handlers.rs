//! Axum route handler for the Analysis Gateway.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::analysis::analyzer::analyze;
use crate::analysis::input::{AnalysisInput, AnalyzeRequest};
use crate::errors::AppError;
use crate::models::AssessmentRecord;
use crate::state::AppState;

/// POST /api/gemini
///
/// Accepts `{ name?, image? }` and answers with an assessment record.
/// 200 on any upstream answer (parsed or default record). Anything else
/// (nothing to analyze, a body that is not JSON, bad image data, a failed
/// upstream call) is 500 with the default record plus a generic `error`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AssessmentRecord>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let input = AnalysisInput::try_from(request)?;

    let span = tracing::info_span!("analysis", request_id = %Uuid::new_v4(), kind = input.kind());
    async move {
        info!("Forwarding {} analysis to upstream model", input.kind());
        let record = analyze(state.llm.as_ref(), &input).await?;
        Ok::<_, AppError>(Json(record))
    }
    .instrument(span)
    .await
}
