//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::cache::{analysis_key, chart_key, dashboard_key, ViewCache, DASHBOARD_KEY};
use crate::config::DashboardConfig;
use crate::db::{AnalysisStore, PostgresStore};
use crate::error::{DashboardError, Result};
use crate::metrics::Metrics;
use crate::pipeline::{PipelineExecutor, PipelineRequest, ProcessPipeline, Symbol};
use crate::services::AnalysisService;
use crate::signals::VariantRequest;
use crate::views::{analysis_view, chart_view};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub analyses: Option<Arc<AnalysisService>>,
    pub cache: Arc<ViewCache>,
    pub pipeline: Option<Arc<dyn PipelineExecutor>>,
    pub revalidation_secret: Option<Arc<str>>,
}

impl AppState {
    /// State with no store and no pipeline; data routes answer 503 until set.
    pub fn new(metrics: Arc<Metrics>, config: &DashboardConfig) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            analyses: None,
            cache: Arc::new(ViewCache::new(config.view_cache_ttl)),
            pipeline: None,
            revalidation_secret: config.revalidation_secret.as_deref().map(Arc::from),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn AnalysisStore>) -> Self {
        self.analyses = Some(Arc::new(AnalysisService::new(store)));
        self
    }

    pub fn with_pipeline(mut self, pipeline: Arc<dyn PipelineExecutor>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    fn analyses(&self) -> Result<&AnalysisService> {
        self.analyses
            .as_deref()
            .ok_or(DashboardError::NotConfigured("analysis store"))
    }

    async fn cached(&self, key: &str) -> Option<Value> {
        let hit = self.cache.get(key).await;
        if hit.is_some() {
            self.metrics.view_cache_hits_total.inc();
        } else {
            self.metrics.view_cache_misses_total.inc();
        }
        hit
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let health = state.health.read().await;
    Json(json!({
        "status": health.status,
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "service": "signalscope-api",
        "store": state.analyses.is_some(),
        "pipeline": state.pipeline.is_some(),
    }))
}

pub async fn metrics_handler(
    State(state): State<AppState>,
) -> std::result::Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

fn to_value<T: Serialize>(view: &T) -> Result<Value> {
    Ok(serde_json::to_value(view)?)
}

async fn dashboard(State(state): State<AppState>) -> Result<Json<Value>> {
    let key = dashboard_key();
    if let Some(view) = state.cached(&key).await {
        return Ok(Json(view));
    }

    let stamp = state.cache.stamp(DASHBOARD_KEY).await;
    let view = to_value(&state.analyses()?.dashboard().await?)?;
    state.cache.insert(key, view.clone(), &stamp).await;
    Ok(Json(view))
}

async fn list_symbols(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.analyses()?.symbols().await?))
}

/// Latest analysis for one symbol.
///
/// A symbol that was never analysed is a 404 with `{"error":"not_found"}`,
/// which the page renders as its empty state.
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Value>> {
    let symbol = Symbol::parse(&symbol)?;
    let key = analysis_key(symbol.as_str());
    if let Some(view) = state.cached(&key).await {
        return Ok(Json(view));
    }

    let stamp = state.cache.stamp(symbol.as_str()).await;
    let full = state
        .analyses()?
        .full_analysis(symbol.as_str())
        .await?
        .ok_or_else(|| DashboardError::NotFound(format!("analysis for {}", symbol)))?;

    let view = to_value(&analysis_view(full))?;
    state.cache.insert(key, view.clone(), &stamp).await;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    variant: Option<String>,
}

async fn get_chart(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Value>> {
    let symbol = Symbol::parse(&symbol)?;
    let request: VariantRequest = query
        .variant
        .unwrap_or_default()
        .parse()
        .map_err(DashboardError::InvalidRequest)?;
    let requested = match request {
        VariantRequest::Auto => "auto",
        VariantRequest::Force(variant) => variant.as_str(),
    };

    let key = chart_key(symbol.as_str(), requested);
    if let Some(view) = state.cached(&key).await {
        return Ok(Json(view));
    }

    let stamp = state.cache.stamp(symbol.as_str()).await;
    let full = state
        .analyses()?
        .full_analysis(symbol.as_str())
        .await?
        .ok_or_else(|| DashboardError::NotFound(format!("analysis for {}", symbol)))?;

    let view = to_value(&chart_view(&full.signals, request))?;
    state.cache.insert(key, view.clone(), &stamp).await;
    Ok(Json(view))
}

/// Run the pipeline for a validated batch, then drop the affected views.
async fn trigger_pipeline(
    State(state): State<AppState>,
    Json(request): Json<PipelineRequest>,
) -> Result<Json<Value>> {
    let symbols = request.symbols.validate()?;
    let pipeline = state
        .pipeline
        .clone()
        .ok_or(DashboardError::NotConfigured("analysis pipeline"))?;

    state.metrics.pipeline_runs_total.inc();
    let output = match pipeline.run(&symbols, request.with_ai).await {
        Ok(output) => output,
        Err(e) => {
            state.metrics.pipeline_failures_total.inc();
            return Err(e);
        }
    };

    for symbol in &symbols {
        state.cache.invalidate_symbol(symbol.as_str()).await;
    }
    state.cache.invalidate_dashboard().await;

    info!(symbols = symbols.len(), with_ai = request.with_ai, "Pipeline run completed");
    Ok(Json(json!({
        "success": true,
        "symbols": symbols,
        "with_ai": request.with_ai,
        "output": output.stdout,
    })))
}

#[derive(Debug, Deserialize)]
struct RevalidateRequest {
    secret: String,
    tag: Option<String>,
    path: Option<String>,
}

/// What a revalidation request names: a dashboard view or one symbol's views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevalidateTarget {
    Dashboard,
    Analysis(Symbol),
}

impl RevalidateTarget {
    /// `dashboard` or `analysis:<SYMBOL>`
    pub fn from_tag(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        if tag == "dashboard" {
            return Ok(RevalidateTarget::Dashboard);
        }
        match tag.strip_prefix("analysis:") {
            Some(symbol) => Ok(RevalidateTarget::Analysis(Symbol::parse(symbol)?)),
            None => Err(DashboardError::InvalidRequest(format!("unknown tag: {}", tag))),
        }
    }

    /// `/` or `/analysis/<SYMBOL>`
    pub fn from_path(path: &str) -> Result<Self> {
        let path = path.trim();
        if path == "/" {
            return Ok(RevalidateTarget::Dashboard);
        }
        match path.strip_prefix("/analysis/") {
            Some(symbol) => Ok(RevalidateTarget::Analysis(Symbol::parse(symbol)?)),
            None => Err(DashboardError::InvalidRequest(format!("unknown path: {}", path))),
        }
    }
}

/// Compares digests, so timing does not reveal how much of the secret matched.
fn secret_matches(expected: &str, supplied: &str) -> bool {
    Sha256::digest(expected.as_bytes()) == Sha256::digest(supplied.as_bytes())
}

async fn revalidate(
    State(state): State<AppState>,
    Json(request): Json<RevalidateRequest>,
) -> Result<Json<Value>> {
    match state.revalidation_secret.as_deref() {
        Some(secret) if secret_matches(secret, &request.secret) => {}
        _ => {
            warn!("Rejected revalidation request");
            return Err(DashboardError::Unauthorized);
        }
    }

    let mut targets = Vec::new();
    if let Some(tag) = request.tag.as_deref() {
        targets.push(RevalidateTarget::from_tag(tag)?);
    }
    if let Some(path) = request.path.as_deref() {
        targets.push(RevalidateTarget::from_path(path)?);
    }
    if targets.is_empty() {
        return Err(DashboardError::InvalidRequest(
            "either tag or path is required".to_string(),
        ));
    }

    for target in &targets {
        match target {
            RevalidateTarget::Dashboard => {
                state.cache.invalidate_dashboard().await;
            }
            RevalidateTarget::Analysis(symbol) => {
                state.cache.invalidate_symbol(symbol.as_str()).await;
            }
        }
    }

    info!(targets = targets.len(), "Views revalidated");
    Ok(Json(json!({
        "revalidated": true,
        "now": chrono::Utc::now().timestamp_millis(),
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/dashboard", get(dashboard))
        .route("/api/symbols", get(list_symbols))
        .route("/api/analysis/{symbol}", get(get_analysis))
        .route("/api/analysis/{symbol}/chart", get(get_chart))
        .route("/api/pipeline", post(trigger_pipeline))
        .route("/api/revalidate", post(revalidate))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    config: DashboardConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let mut state = AppState::new(metrics.clone(), &config);

    // The API still serves health and metrics without a store
    match config.database_url.as_deref() {
        Some(url) => match PostgresStore::connect_with_retry(url).await {
            Ok(store) => {
                info!("Postgres connected for API server");
                metrics.database_connected.set(1.0);
                state = state.with_store(Arc::new(store));
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Failed to connect to Postgres - data endpoints will be unavailable"
                );
                metrics.database_connected.set(0.0);
            }
        },
        None => warn!("DATABASE_URL not set - data endpoints will be unavailable"),
    }

    match config.pipeline.clone() {
        Some(pipeline) => {
            info!(working_dir = %pipeline.working_dir.display(), "Analysis pipeline configured");
            state = state.with_pipeline(Arc::new(ProcessPipeline::new(pipeline)));
        }
        None => warn!("PIPELINE_PATH not set - pipeline trigger will be unavailable"),
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
