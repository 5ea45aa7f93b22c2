use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    analysis::dtos::{AnalyzeRequest, ErrorResponse, UrlTrustRequest},
    app_state::AppState,
    scoring::{AnalysisReport, AnalysisResult},
    url_trust::{self, UrlAssessment},
};

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

#[utoipa::path(
    post,
    path = "/api/writing-style",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Writing-style scores", body = AnalysisResult),
        (status = 400, description = "Missing or oversized content", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    )
)]
pub async fn analyze_writing_style(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let result = state.analyzer.analyze_text(&payload.content);
    if result.is_zero() {
        // Either the input was too short or the engine fell back after a failure
        warn!(
            chars = payload.content.chars().count(),
            "Writing-style analysis returned all zeros"
        );
    } else {
        info!(
            sensationalism = result.sensationalism,
            writing_style = result.writing_style,
            clickbait = result.clickbait,
            "Writing-style analysis complete"
        );
    }

    (StatusCode::OK, Json(result)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/writing-style/details",
    tag = "analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Scores with text statistics and degradations", body = AnalysisReport),
        (status = 400, description = "Missing or oversized content", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    )
)]
pub async fn analyze_writing_style_details(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    let report = state.analyzer.analyze(&payload.content);
    if !report.degradations.is_empty() {
        warn!(
            degradations = ?report.degradations.iter().map(|d| d.kind).collect::<Vec<_>>(),
            "Analysis completed with degradations"
        );
    }

    (StatusCode::OK, Json(report)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/url-trust",
    tag = "analysis",
    request_body = UrlTrustRequest,
    responses(
        (status = 200, description = "URL trust assessment", body = UrlAssessment),
        (status = 400, description = "Missing or unparseable URL", body = ErrorResponse),
        (status = 429, description = "Rate limit exceeded", body = ErrorResponse)
    )
)]
pub async fn assess_url_trust(Json(payload): Json<UrlTrustRequest>) -> Response {
    if let Err(error) = payload.validate() {
        return bad_request(error);
    }

    match url_trust::assess_url(&payload.url, payload.safe_browsing_flagged) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(e) => {
            info!(error = %e, "Rejected URL trust request");
            bad_request(e.to_string())
        }
    }
}
