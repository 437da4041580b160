use crate::error::AppError;
use crate::models::MatchRequest;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use types::matching::MatchResult;
use types::validation::validate_records;

pub async fn create_match(
    State(state): State<AppState>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<MatchResult>>), AppError> {
    // Axum rejects malformed JSON with a mix of 400/415/422; callers only see 400,
    // apart from 413 for bodies over the size limit.
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "rejected match request body");
        AppError::from(rejection)
    })?;

    if let Err(err) = validate_records(&request.bookings, &request.claims) {
        tracing::warn!(error = %err, "rejected match request records");
        return Err(err.into());
    }

    let results = state.engine.match_records(&request.bookings, &request.claims);

    tracing::info!(
        bookings = request.bookings.len(),
        claims = request.claims.len(),
        matches = results.len(),
        "matched records"
    );

    Ok((StatusCode::CREATED, Json(results)))
}
