use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    app_state::AppState,
    scoring::{BANK_VERSION, TextAnalyzer},
};

/// Fixed input the liveness probe scores.
pub const HEALTH_SAMPLE: &str = "This is a test sentence.";

const EXPECTED_KEYS: [&str; 3] = ["sensationalism", "writingStyle", "clickbait"];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub analyzer: String,
    pub pattern_bank_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_keys: Vec<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Run the analyzer on [`HEALTH_SAMPLE`] and check every expected key comes
/// back as a number in `[0, 100]`.
pub fn check_analyzer_health(analyzer: &(dyn TextAnalyzer + Send + Sync)) -> HealthResponse {
    let result = analyzer.analyze_text(HEALTH_SAMPLE);

    let missing_keys: Vec<String> = match serde_json::to_value(result) {
        Ok(value) => EXPECTED_KEYS
            .iter()
            .filter(|key| {
                !value
                    .get(**key)
                    .and_then(serde_json::Value::as_f64)
                    .is_some_and(|score| (0.0..=100.0).contains(&score))
            })
            .map(|key| key.to_string())
            .collect(),
        Err(e) => {
            error!(error = %e, "could not serialize health sample result");
            EXPECTED_KEYS.iter().map(|key| key.to_string()).collect()
        }
    };

    let healthy = missing_keys.is_empty();
    HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        analyzer: if healthy { "ok" } else { "failing" }.to_string(),
        pattern_bank_version: BANK_VERSION.to_string(),
        missing_keys,
    }
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 503, description = "Analyzer is not producing scores", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let response = check_analyzer_health(state.analyzer.as_ref());

    if response.is_healthy() {
        info!("Health check passed");
        Ok(Json(response))
    } else {
        error!(missing = ?response.missing_keys, "Analyzer health check failed");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
