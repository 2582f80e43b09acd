//! AWS Lambda handler for contribution growth projections
//!
//! Accepts a plan as JSON and returns the future value, the sampled schedule and
//! an optional rate sensitivity.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::NaiveDate;
use contribution_growth::{
    ContributionPlan, ContributionTiming, FrequencySpec, ProjectionConfig, ScenarioRunner,
    Sampling, ScheduleRow, SeriesMode,
};
use contribution_growth::projection::ProjectionSummary;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// Input for the projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Annual rate, compounded annually (0.10 = 10%)
    pub annual_rate: f64,

    /// Amount contributed each period
    pub contribution_amount: f64,

    /// Frequency name or periods per year (default: monthly)
    #[serde(default)]
    pub frequency: FrequencySpec,

    /// Horizon in years
    pub duration_years: f64,

    /// "start" or "end" (default: end)
    #[serde(default)]
    pub timing: ContributionTiming,

    /// Return a sampled schedule rather than just the horizon value (default: true)
    #[serde(default = "default_sampled")]
    pub sampled: bool,

    /// Even sampling grid in points per year; once per period when absent
    #[serde(default)]
    pub samples_per_year: Option<f64>,

    /// Date the schedule starts from
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Additional annual rates to project the same plan at
    #[serde(default)]
    pub rate_sensitivity: Vec<f64>,
}

fn default_sampled() -> bool { true }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub future_value: f64,
    pub per_period_rate: f64,
    pub contributions_per_year: f64,
    pub total_periods: f64,
    pub summary: ProjectionSummary,
    pub schedule: Vec<ScheduleRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sensitivity: Vec<SensitivityPoint>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct SensitivityPoint {
    pub annual_rate: f64,
    pub future_value: f64,
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    // Parse request body
    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let plan = ContributionPlan::new(
        request.annual_rate,
        request.contribution_amount,
        request.frequency,
        request.duration_years,
    )
    .with_timing(request.timing);

    let mode = if !request.sampled {
        SeriesMode::Total
    } else if let Some(per_year) = request.samples_per_year {
        match Sampling::per_year(per_year, request.duration_years) {
            Ok(sampling) => SeriesMode::Sampled(sampling),
            Err(e) => return error_response(400, &e.to_string()),
        }
    } else {
        SeriesMode::Sampled(Sampling::EachPeriod)
    };

    let runner = ScenarioRunner::new(ProjectionConfig {
        mode,
        start_date: request.start_date,
    });

    let result = match runner.run(&plan) {
        Ok(r) => r,
        Err(e) => return error_response(400, &e.to_string()),
    };

    let mut sensitivity = Vec::with_capacity(request.rate_sensitivity.len());
    for (rate, outcome) in request
        .rate_sensitivity
        .iter()
        .zip(runner.rate_sensitivity(&plan, &request.rate_sensitivity))
    {
        match outcome {
            Ok(r) => sensitivity.push(SensitivityPoint { annual_rate: *rate, future_value: r.final_value() }),
            Err(e) => return error_response(400, &format!("rate {}: {}", rate, e)),
        }
    }

    let response = ProjectionResponse {
        future_value: result.final_value(),
        per_period_rate: result.per_period_rate,
        contributions_per_year: result.contributions_per_year,
        total_periods: result.total_periods,
        summary: result.summary(),
        schedule: result.schedule,
        sensitivity,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
