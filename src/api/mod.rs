use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::{MAX_ANNUAL_RATE_PERCENT, MAX_PLAN_YEARS, PlanDefaults, ServerConfig};
use crate::core::{
    ChartHeights, ComparisonRow, Instrument, InstrumentCatalog, PlanError, PlanSummary,
    ProjectionInput, Recommendation, normalized_heights, plan, suggest,
};

#[derive(Debug, Clone, Copy)]
struct AppState {
    catalog: &'static InstrumentCatalog,
    defaults: PlanDefaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlanPayload {
    target_amount: Option<f64>,
    years: Option<f64>,
    #[serde(alias = "annualRatePercent")]
    rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuggestionsPayload {
    amount: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    #[serde(flatten)]
    summary: PlanSummary,
    chart: Vec<ChartHeights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct SuggestionsResponse<'a> {
    amount: f64,
    suggestions: Recommendation<'a>,
}

#[derive(Debug, Serialize)]
struct InstrumentsResponse<'a> {
    instruments: &'a [Instrument],
}

#[derive(Debug, Serialize)]
struct ComparisonResponse {
    rows: Vec<ComparisonRow>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(catalog: &'static InstrumentCatalog, defaults: PlanDefaults) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .route(
            "/api/suggestions",
            get(suggestions_get_handler).post(suggestions_post_handler),
        )
        .route("/api/instruments", get(instruments_handler))
        .route("/api/instruments/:id", get(instrument_handler))
        .route("/api/comparison", get(comparison_handler))
        .fallback(not_found_handler)
        .with_state(AppState { catalog, defaults })
}

pub async fn run_http_server(
    config: ServerConfig,
    defaults: PlanDefaults,
) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let app = router(InstrumentCatalog::standard(), defaults);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "SIP planner API listening");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<PlanPayload>,
) -> Response {
    plan_handler_impl(state, payload)
}

async fn plan_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<PlanPayload>,
) -> Response {
    plan_handler_impl(state, payload)
}

fn plan_handler_impl(state: AppState, payload: PlanPayload) -> Response {
    debug!(?payload, "plan request");
    json_response(StatusCode::OK, build_plan_response(payload, state.defaults))
}

async fn suggestions_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<SuggestionsPayload>,
) -> Response {
    suggestions_handler_impl(state, payload)
}

async fn suggestions_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<SuggestionsPayload>,
) -> Response {
    suggestions_handler_impl(state, payload)
}

fn suggestions_handler_impl(state: AppState, payload: SuggestionsPayload) -> Response {
    debug!(?payload, "suggestions request");
    json_response(
        StatusCode::OK,
        build_suggestions_response(state.catalog, payload),
    )
}

async fn instruments_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        InstrumentsResponse {
            instruments: state.catalog.list_all(),
        },
    )
}

async fn instrument_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.catalog.lookup(&id) {
        Ok(instrument) => json_response(StatusCode::OK, instrument),
        Err(err @ PlanError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, &err.to_string())
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

async fn comparison_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        ComparisonResponse {
            rows: state.catalog.comparison_rows(),
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn plan_input_from_json(json: &str, defaults: PlanDefaults) -> Result<ProjectionInput, String> {
    let payload = serde_json::from_str::<PlanPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    plan_input_from_payload(payload, defaults)
}

fn plan_input_from_payload(
    payload: PlanPayload,
    defaults: PlanDefaults,
) -> Result<ProjectionInput, String> {
    let years = match payload.years {
        Some(v) => whole_years(v)?,
        None => defaults.years,
    };

    let annual_rate_percent = payload.rate.unwrap_or(defaults.annual_rate_percent);
    if annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
        return Err(format!(
            "rate must be at most {MAX_ANNUAL_RATE_PERCENT}%, got {annual_rate_percent}"
        ));
    }

    Ok(ProjectionInput {
        target_amount: payload.target_amount.unwrap_or(defaults.target_amount),
        years,
        annual_rate_percent,
    })
}

fn whole_years(value: f64) -> Result<u32, String> {
    if !value.is_finite()
        || value < 1.0
        || value.fract() != 0.0
        || value > f64::from(MAX_PLAN_YEARS)
    {
        return Err(format!(
            "years must be a whole number between 1 and {MAX_PLAN_YEARS}, got {value}"
        ));
    }
    Ok(value as u32)
}

// Invalid input is reported alongside a zeroed plan rather than as an HTTP error.
fn build_plan_response(payload: PlanPayload, defaults: PlanDefaults) -> PlanResponse {
    let outcome = plan_input_from_payload(payload, defaults)
        .and_then(|input| plan(input).map_err(|e| e.to_string()));

    match outcome {
        Ok(summary) => PlanResponse {
            chart: normalized_heights(&summary.growth),
            summary,
            error: None,
        },
        Err(msg) => {
            warn!(error = %msg, "rejected plan input");
            PlanResponse {
                summary: PlanSummary::zeroed(),
                chart: Vec::new(),
                error: Some(msg),
            }
        }
    }
}

fn build_suggestions_response(
    catalog: &InstrumentCatalog,
    payload: SuggestionsPayload,
) -> SuggestionsResponse<'_> {
    let amount = payload.amount.unwrap_or(0.0);
    SuggestionsResponse {
        amount,
        suggestions: suggest(catalog, amount),
    }
}
