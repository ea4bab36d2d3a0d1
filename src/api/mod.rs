use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::catalog::Catalog;
use crate::engine::overs::{is_legal_overs, next_ball, prev_ball};
use crate::engine::what_if::WhatIfDeltas;
use crate::engine::PredictionEngine;
use crate::error::PredictError;
use crate::state::models::MatchInput;

#[derive(Clone)]
pub struct AppState {
    pub engine: PredictionEngine,
    pub catalog: Arc<Catalog>,
}

/// Build the Axum router for the prediction API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/catalog", get(catalog_handler))
        .route("/api/overs/step", get(overs_step_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/what-if", post(what_if_handler))
        .route("/api/session", get(session_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Map a core error onto an HTTP status and message.
fn error_response(err: PredictError) -> (StatusCode, String) {
    let status = match err {
        PredictError::InvalidMatchup { .. } | PredictError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        PredictError::NoBasePrediction => StatusCode::CONFLICT,
        PredictError::ModelInference(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}

/// GET /api/catalog
async fn catalog_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.as_ref().clone())
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StepDirection {
    Next,
    Prev,
}

#[derive(Debug, Deserialize)]
struct StepQuery {
    overs: f64,
    direction: StepDirection,
}

#[derive(Debug, Serialize)]
struct StepResponse {
    overs: f64,
}

/// Step a legal overs value one ball forward or back. Stepping forward from
/// the last ball of the innings is rejected.
fn step_overs(query: &StepQuery) -> Result<f64, PredictError> {
    if !is_legal_overs(query.overs) {
        return Err(PredictError::InvalidInput(format!(
            "overs {} is not a legal value",
            query.overs
        )));
    }
    let stepped = match query.direction {
        StepDirection::Next => next_ball(query.overs),
        StepDirection::Prev => prev_ball(query.overs),
    };
    if !is_legal_overs(stepped) {
        return Err(PredictError::InvalidInput(format!(
            "no legal overs value after {}",
            query.overs
        )));
    }
    Ok(stepped)
}

/// GET /api/overs/step?overs=12.6&direction=next
async fn overs_step_handler(
    Query(query): Query<StepQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    step_overs(&query)
        .map(|overs| Json(StepResponse { overs }))
        .map_err(error_response)
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MatchInput>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .engine
        .predict(&input)
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/what-if
async fn what_if_handler(
    State(state): State<Arc<AppState>>,
    Json(deltas): Json<WhatIfDeltas>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .engine
        .what_if(&deltas)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/session
async fn session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .engine
        .session()
        .snapshot()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "No prediction yet".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_statuses() {
        let cases = [
            (PredictError::InvalidMatchup { team: "India".into() }, StatusCode::BAD_REQUEST),
            (PredictError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (PredictError::NoBasePrediction, StatusCode::CONFLICT),
            (PredictError::ModelInference("down".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            let (status, body) = error_response(err.clone());
            assert_eq!(status, expected);
            assert_eq!(body, err.to_string());
        }
    }

    #[test]
    fn overs_step_moves_one_ball() {
        let q = |overs, direction| StepQuery { overs, direction };
        assert_eq!(step_overs(&q(12.6, StepDirection::Next)).unwrap(), 13.1);
        assert_eq!(step_overs(&q(13.1, StepDirection::Prev)).unwrap(), 12.6);
        assert_eq!(step_overs(&q(0.1, StepDirection::Prev)).unwrap(), 0.1);
        assert!(step_overs(&q(19.6, StepDirection::Next)).is_err());
        assert!(step_overs(&q(12.0, StepDirection::Next)).is_err());
    }

    #[test]
    fn matchup_message_names_the_team() {
        let (_, body) = error_response(PredictError::InvalidMatchup { team: "Nepal".into() });
        assert!(body.contains("Nepal"));
        assert!(body.contains("must be different"));
    }
}
