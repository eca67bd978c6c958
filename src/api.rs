use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::warn;

use crate::blend::BlendedPredictor;
use crate::features::PredictorInput;

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<BlendedPredictor>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/predict", post(predict))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct PredictResp {
    name: String,
    probability: f64,
    message: String,
}

#[derive(serde::Serialize)]
struct ErrorResp {
    error: String,
}

/// One submission: clamp inputs to widget ranges, run the blended pass,
/// format the score. A failed model call is terminal for this request only.
async fn predict(
    State(state): State<AppState>,
    Json(body): Json<PredictorInput>,
) -> Result<Json<PredictResp>, (StatusCode, Json<ErrorResp>)> {
    let input = body.clamped();
    let name = input.display_name().to_string();

    match state.predictor.predict(&input) {
        Ok(score) => Ok(Json(PredictResp {
            message: format!("Probability for {name}: {score}%"),
            probability: score.value(),
            name,
        })),
        Err(e) => {
            warn!(error = %e, "prediction failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResp {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
