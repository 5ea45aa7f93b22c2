use axum::Json;
use utoipa::OpenApi;

use crate::{
    analysis::{
        dtos::{AnalyzeRequest, ErrorResponse, UrlTrustRequest},
        handlers,
    },
    health::{self, HealthResponse},
    scoring::{
        AnalysisReport, AnalysisResult, Category, CategoryMatch, CategoryMatches, Degradation,
        DegradationKind, StyleFactors, TextStatistics,
    },
    url_trust::{UrlAssessment, UrlSignal},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "vartha",
        description = "Malayalam news writing-style and URL trust analysis"
    ),
    paths(
        health::health_check,
        handlers::analyze_writing_style,
        handlers::analyze_writing_style_details,
        handlers::assess_url_trust,
    ),
    components(schemas(
        AnalyzeRequest,
        UrlTrustRequest,
        ErrorResponse,
        HealthResponse,
        AnalysisResult,
        AnalysisReport,
        TextStatistics,
        StyleFactors,
        CategoryMatch,
        CategoryMatches,
        Category,
        Degradation,
        DegradationKind,
        UrlAssessment,
        UrlSignal,
    )),
    tags(
        (name = "analysis", description = "Writing-style scoring and URL trust"),
        (name = "health", description = "Liveness probes")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
