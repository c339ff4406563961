//! On-demand trigger: run YouTube discovery then Instagram completion
//! synchronously and report the outcome as plain text. Error responses stay
//! generic; details go to the logs only.

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use creatordb_enrich::{EnrichError, RunSummary};

use super::AppState;

fn describe(summary: &RunSummary) -> String {
    format!(
        "{}: {} saved, {} skipped, {} failed",
        summary.pipeline, summary.saved, summary.skipped, summary.failed
    )
}

pub(super) async fn run_worker_now(State(state): State<AppState>) -> impl IntoResponse {
    match state.runner.run_all().await {
        Ok((youtube, instagram)) => (
            StatusCode::OK,
            format!(
                "worker finished. {}; {}",
                describe(&youtube),
                describe(&instagram)
            ),
        ),
        Err(EnrichError::AlreadyRunning(pipeline)) => (
            StatusCode::CONFLICT,
            format!("a {pipeline} run is already in progress"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "on-demand worker run failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "worker run failed".to_string(),
            )
        }
    }
}
