use axum::{
    Router,
    body::Bytes,
    extract::{Json, Path, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    DEFAULT_ANNUAL_RETURN, DEFAULT_MONTHLY_AMOUNT, DEFAULT_YEARS, HabitImpact, PresetSummary,
    RawFounder, RawScenario, RawSimulationInput, SimulationResult, find_preset, habit_impact,
    lenient_number, list_presets, run_preset, run_simulation,
};
use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(
    name = "seedling",
    about = "Generational wealth projection: baseline vs habit-change scenario across a family tree",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "SEEDLING_BIND", default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Run one simulation and print the response JSON
    Simulate(SimulateArgs),
    /// List the built-in founder presets
    Presets,
    /// Run a built-in preset against a $100/month habit change
    Preset {
        name: String,
        #[arg(long)]
        generations: Option<f64>,
        #[arg(long)]
        pretty: bool,
    },
    /// Compound a monthly habit change over time
    Habit {
        #[arg(
            long,
            default_value_t = DEFAULT_MONTHLY_AMOUNT,
            allow_negative_numbers = true
        )]
        monthly_amount: f64,
        #[arg(long, default_value_t = DEFAULT_YEARS)]
        years: u32,
        #[arg(
            long,
            default_value_t = DEFAULT_ANNUAL_RETURN,
            help = "Annual return as a fraction, e.g. 0.07"
        )]
        annual_return: f64,
    },
}

/// Every field is optional; anything left out falls back to the engine defaults.
#[derive(Args, Debug, Default)]
pub struct SimulateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<f64>,
    #[arg(long)]
    pub income: Option<f64>,
    #[arg(long)]
    pub savings: Option<f64>,
    #[arg(long)]
    pub debt: Option<f64>,
    #[arg(long, help = "high_school, some_college, bachelors, masters or doctorate")]
    pub education: Option<String>,
    #[arg(long)]
    pub financial_literacy: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub monthly_habit_change: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub generations: Option<f64>,
    #[arg(long)]
    pub pretty: bool,
}

impl From<&SimulateArgs> for RawSimulationInput {
    fn from(args: &SimulateArgs) -> Self {
        RawSimulationInput {
            founder: RawFounder {
                name: args.name.clone(),
                age: args.age,
                income: args.income,
                savings: args.savings,
                debt: args.debt,
                education: args.education.clone(),
                financial_literacy: args.financial_literacy,
            },
            scenario: RawScenario {
                monthly_habit_change: args.monthly_habit_change,
            },
            num_generations: args.generations,
        }
    }
}

/// Flat query-string form of a simulation request.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimulateQuery {
    name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    age: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    income: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    savings: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    debt: Option<f64>,
    education: Option<String>,
    #[serde(deserialize_with = "lenient_number", alias = "financialLiteracy")]
    financial_literacy: Option<f64>,
    #[serde(deserialize_with = "lenient_number", alias = "monthlyHabitChange")]
    monthly_habit_change: Option<f64>,
    #[serde(
        deserialize_with = "lenient_number",
        alias = "numGenerations",
        alias = "generations"
    )]
    num_generations: Option<f64>,
}

impl From<SimulateQuery> for RawSimulationInput {
    fn from(query: SimulateQuery) -> Self {
        RawSimulationInput {
            founder: RawFounder {
                name: query.name,
                age: query.age,
                income: query.income,
                savings: query.savings,
                debt: query.debt,
                education: query.education,
                financial_literacy: query.financial_literacy,
            },
            scenario: RawScenario {
                monthly_habit_change: query.monthly_habit_change,
            },
            num_generations: query.num_generations,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PresetPayload {
    #[serde(alias = "presetName")]
    preset_name: String,
    #[serde(
        deserialize_with = "lenient_number",
        alias = "numGenerations",
        alias = "generations"
    )]
    num_generations: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HabitPayload {
    #[serde(deserialize_with = "lenient_number", alias = "monthlyAmount")]
    monthly_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    years: Option<f64>,
    #[serde(deserialize_with = "lenient_number", alias = "annualReturn")]
    annual_return: Option<f64>,
}

impl HabitPayload {
    fn evaluate(&self) -> HabitImpact {
        let years = self
            .years
            .map(|y| y.max(0.0).trunc() as u32)
            .unwrap_or(DEFAULT_YEARS);
        habit_impact(
            self.monthly_amount.unwrap_or(DEFAULT_MONTHLY_AMOUNT),
            years,
            self.annual_return.unwrap_or(DEFAULT_ANNUAL_RETURN),
        )
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct PresetListResponse {
    presets: Vec<PresetSummary>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::UnknownPreset(_) => StatusCode::NOT_FOUND,
            Error::InvalidBind(_) | Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, &self.to_string())
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { bind } => {
            let addr = bind
                .parse::<SocketAddr>()
                .map_err(|_| Error::InvalidBind(bind.clone()))?;
            run_http_server(addr).await
        }
        Command::Simulate(args) => {
            let result = run_simulation(&RawSimulationInput::from(&args));
            print_json(&result, args.pretty)
        }
        Command::Presets => print_json(
            &PresetListResponse {
                presets: list_presets(),
            },
            true,
        ),
        Command::Preset {
            name,
            generations,
            pretty,
        } => print_json(&run_preset(&name, generations)?, pretty),
        Command::Habit {
            monthly_amount,
            years,
            annual_return,
        } => print_json(&habit_impact(monthly_amount, years, annual_return), true),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .route("/api/simulate/preset", post(preset_simulate_handler))
        .route("/api/presets", get(presets_handler))
        .route("/api/presets/:name", get(preset_detail_handler))
        .route(
            "/api/calculate/habit-impact",
            get(habit_get_handler).post(habit_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "seedling API listening");
    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "healthy",
            service: "seedling",
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(query): Query<SimulateQuery>) -> Response {
    simulate_handler_impl(query.into())
}

async fn simulate_post_handler(body: Bytes) -> Response {
    simulate_handler_impl(raw_input_from_body(&body))
}

fn simulate_handler_impl(raw: RawSimulationInput) -> Response {
    let result: SimulationResult = run_simulation(&raw);
    info!(
        members = result.summary.baseline.total_members,
        percent_change = result.summary.difference.percent_change,
        "simulation served"
    );
    json_response(StatusCode::OK, result)
}

/// Unreadable bodies degrade to an all-defaults request instead of a 4xx.
fn raw_input_from_body(body: &[u8]) -> RawSimulationInput {
    if body.iter().all(u8::is_ascii_whitespace) {
        return RawSimulationInput::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable simulate body, using defaults");
        RawSimulationInput::default()
    })
}

async fn presets_handler() -> Response {
    json_response(
        StatusCode::OK,
        PresetListResponse {
            presets: list_presets(),
        },
    )
}

async fn preset_detail_handler(Path(name): Path<String>) -> Response {
    match find_preset(&name) {
        Ok(preset) => json_response(StatusCode::OK, preset.detail()),
        Err(e) => {
            warn!(preset = %name, "unknown preset requested");
            e.into_response()
        }
    }
}

async fn preset_simulate_handler(body: Bytes) -> Response {
    let payload: PresetPayload = match decode_body(&body) {
        Ok(payload) => payload,
        Err(e) => return e.into_response(),
    };
    match run_preset(&payload.preset_name, payload.num_generations) {
        Ok(run) => json_response(StatusCode::OK, run),
        Err(e) => {
            warn!(preset = %payload.preset_name, "unknown preset simulation requested");
            e.into_response()
        }
    }
}

async fn habit_get_handler(Query(payload): Query<HabitPayload>) -> Response {
    json_response(StatusCode::OK, payload.evaluate())
}

async fn habit_post_handler(body: Bytes) -> Response {
    match decode_body::<HabitPayload>(&body) {
        Ok(payload) => json_response(StatusCode::OK, payload.evaluate()),
        Err(e) => e.into_response(),
    }
}

/// Decodes a JSON body regardless of `Content-Type`; an empty body means all defaults.
fn decode_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
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
