use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use talent_ai::chat::{collect_reply, ChatTranscript};
use talent_ai::domain::{ChatMessage, Employee, ForecastPeriod, Role, SkillGap, TrainingProgram};
use talent_ai::error::AppError;
use talent_ai::insights::{
    baseline_forecast, forecast_workforce, match_programs, rank_successors, recommend_programs,
    simulate_succession, skill_gap_analysis,
};

pub fn talent_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/directory", get(directory_endpoint))
        .route(
            "/api/v1/succession/candidates",
            post(succession_candidates_endpoint),
        )
        .route(
            "/api/v1/succession/simulate",
            post(succession_simulate_endpoint),
        )
        .route("/api/v1/skill-gaps", post(skill_gaps_endpoint))
        .route(
            "/api/v1/development/recommendations",
            post(recommendations_endpoint),
        )
        .route("/api/v1/forecast", post(forecast_endpoint))
        .route("/api/v1/chat", post(chat_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryQuery {
    #[serde(default = "default_employee_count")]
    pub(crate) employees: usize,
    #[serde(default = "default_role_count")]
    pub(crate) roles: usize,
    #[serde(default = "default_program_count")]
    pub(crate) programs: usize,
}

fn default_employee_count() -> usize {
    50
}

fn default_role_count() -> usize {
    10
}

fn default_program_count() -> usize {
    8
}

#[derive(Debug, Serialize)]
pub(crate) struct DirectoryResponse {
    pub(crate) employees: Vec<Employee>,
    pub(crate) roles: Vec<Role>,
    pub(crate) programs: Vec<TrainingProgram>,
}

pub(crate) async fn directory_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Json<DirectoryResponse> {
    let mut directory = state.directory.lock().expect("directory mutex poisoned");
    Json(DirectoryResponse {
        employees: directory.employees(query.employees),
        roles: directory.roles(query.roles),
        programs: directory.programs(query.programs),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuccessionCandidatesRequest {
    pub(crate) role: Role,
    pub(crate) employees: Vec<Employee>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SuccessionCandidatesResponse {
    pub(crate) candidates: Vec<Employee>,
}

pub(crate) async fn succession_candidates_endpoint(
    Json(payload): Json<SuccessionCandidatesRequest>,
) -> Json<SuccessionCandidatesResponse> {
    let candidates = rank_successors(&payload.employees, &payload.role);
    Json(SuccessionCandidatesResponse { candidates })
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuccessionSimulateRequest {
    pub(crate) role: Role,
    pub(crate) candidate: Employee,
}

#[derive(Debug, Serialize)]
pub(crate) struct SuccessionSimulateResponse {
    pub(crate) analysis: String,
}

pub(crate) async fn succession_simulate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SuccessionSimulateRequest>,
) -> Result<Json<SuccessionSimulateResponse>, AppError> {
    let model = state.model()?;
    let analysis = simulate_succession(
        model.as_ref(),
        &payload.role,
        &payload.candidate,
        &state.organization,
    )
    .await?;
    Ok(Json(SuccessionSimulateResponse { analysis }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SkillGapRequest {
    pub(crate) employee: Employee,
    pub(crate) desired_role_title: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SkillGapResponse {
    pub(crate) gaps: Vec<SkillGap>,
}

pub(crate) async fn skill_gaps_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<SkillGapRequest>,
) -> Result<Json<SkillGapResponse>, AppError> {
    let model = state.model()?;
    let gaps = skill_gap_analysis(model.as_ref(), &payload.employee, &payload.desired_role_title)
        .await?;
    Ok(Json(SkillGapResponse { gaps }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecommendationsRequest {
    pub(crate) employee: Employee,
    #[serde(default)]
    pub(crate) competency_gaps: Vec<String>,
    pub(crate) programs: Vec<TrainingProgram>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecommendationsResponse {
    pub(crate) narrative: String,
    pub(crate) programs: Vec<TrainingProgram>,
    /// True when the programs came from the no-match fallback and should be
    /// presented as a weak match rather than a genuine recommendation.
    pub(crate) weak_match: bool,
}

pub(crate) async fn recommendations_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let model = state.model()?;
    let narrative = recommend_programs(
        model.as_ref(),
        &payload.employee,
        &payload.competency_gaps,
        &state.organization,
    )
    .await?;

    let matches = match_programs(&narrative, &payload.programs, &mut rand::thread_rng());
    let weak_match = matches.is_weak();
    let programs = matches.programs().into_iter().cloned().collect();

    Ok(Json(RecommendationsResponse {
        narrative,
        programs,
        weak_match,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ForecastRequest {
    pub(crate) organizational_growth: String,
    pub(crate) market_trends: String,
    #[serde(default)]
    pub(crate) current_forecast: Option<Vec<ForecastPeriod>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForecastResponse {
    pub(crate) narrative: String,
    pub(crate) forecast: Vec<ForecastPeriod>,
}

pub(crate) async fn forecast_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, AppError> {
    let model = state.model()?;
    let current = payload.current_forecast.unwrap_or_else(baseline_forecast);

    let forecast = forecast_workforce(
        model.as_ref(),
        &payload.organizational_growth,
        &payload.market_trends,
        Some(current.as_slice()),
        &state.organization,
    )
    .await?;

    let series = forecast.updated_forecast.unwrap_or(current);
    Ok(Json(ForecastResponse {
        narrative: forecast.narrative,
        forecast: series,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatResponse {
    pub(crate) transcript: Vec<ChatMessage>,
}

pub(crate) async fn chat_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let model = state.model()?;
    let transcript = ChatTranscript::from_messages(payload.history).push_user(payload.message);

    // The full transcript conditions the reply. Stream failures surface
    // inside the transcript as a system message so the conversation stays
    // renderable.
    let transcript = match model.stream_chat(transcript.messages()).await {
        Ok(chunks) => collect_reply(transcript, chunks).await,
        Err(err) => {
            tracing::error!(error = %err, "chat request failed before streaming started");
            transcript.push_system(format!("The assistant is unavailable: {err}"))
        }
    };

    Ok(Json(ChatResponse {
        transcript: transcript.into_messages(),
    }))
}
