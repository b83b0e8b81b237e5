use attrition_agent::config::AppConfig;
use attrition_agent::error::AppError;
use attrition_agent::telemetry;
use attrition_agent::workflows::attrition::{
    read_records, read_records_from_path, AttritionCycleService, ConsoleNotifier, CycleSummary,
    InMemoryAttritionRepository, RiskEngine, RiskThresholds,
};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

type CycleService = AttritionCycleService<InMemoryAttritionRepository, ConsoleNotifier>;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    service: Arc<CycleService>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Attrition Agent",
    about = "Score employee attrition risk and dispatch retention alerts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run assessment cycles from the command line
    Cycle {
        #[command(subcommand)]
        command: CycleCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum CycleCommand {
    /// Run one assessment cycle over a CSV roster export
    Run(CycleRunArgs),
}

#[derive(Args, Debug)]
struct CycleRunArgs {
    /// Path to the roster CSV export
    #[arg(long)]
    csv: PathBuf,
    /// Assessment date for the cycle (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct CycleRequest {
    csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct CycleResponse {
    today: NaiveDate,
    thresholds: RiskThresholds,
    summary: CycleSummary,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Cycle {
            command: CycleCommand::Run(args),
        } => run_cycle_command(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

fn build_service(thresholds: RiskThresholds) -> Arc<CycleService> {
    Arc::new(AttritionCycleService::new(
        Arc::new(InMemoryAttritionRepository::default()),
        Arc::new(ConsoleNotifier::default()),
        RiskEngine::new(thresholds),
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        service: build_service(config.thresholds),
    };

    let app = build_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "attrition agent ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/attrition/cycle", post(cycle_endpoint))
        .with_state(state)
}

fn run_cycle_command(args: CycleRunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let records = read_records_from_path(&args.csv)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let service = build_service(config.thresholds);
    let summary = service.run_cycle(&records, today);

    render_cycle_summary(&summary, today, &config.thresholds);
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn cycle_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<CycleRequest>,
) -> Result<Json<CycleResponse>, AppError> {
    execute_cycle(&state.service, payload).map(Json)
}

fn execute_cycle(
    service: &CycleService,
    request: CycleRequest,
) -> Result<CycleResponse, AppError> {
    let records = read_records(Cursor::new(request.csv.into_bytes()))?;
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());

    let summary = service.run_cycle(&records, today);

    Ok(CycleResponse {
        today,
        thresholds: *service.engine().thresholds(),
        summary,
    })
}

fn render_cycle_summary(summary: &CycleSummary, today: NaiveDate, thresholds: &RiskThresholds) {
    println!("Attrition assessment cycle ({today})");
    println!(
        "Thresholds: high >= {}, medium >= {}",
        thresholds.high(),
        thresholds.medium()
    );

    println!("\nEmployees");
    for outcome in &summary.outcomes {
        println!(
            "- {} ({}) score {} -> {} [{}] factors: {}",
            outcome.name,
            outcome.employee_id,
            outcome.score,
            outcome.action.label(),
            outcome.status.label(),
            outcome.factors.join(", ")
        );
    }

    println!(
        "\nProcessed {}, skipped {}, alerts sent {}, check-ins scheduled {}, monitored {}",
        summary.processed,
        summary.skipped,
        summary.alerts_sent,
        summary.check_ins_scheduled,
        summary.monitored
    );
    if summary.failed_notifications > 0 || summary.persistence_failures > 0 {
        println!(
            "Failures: {} notifications, {} persistence",
            summary.failed_notifications, summary.persistence_failures
        );
    }
}
