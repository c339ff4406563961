//! Per-run reporting: each unit of work (a channel candidate, a username)
//! records exactly one outcome, and the summary is what the API and CLI
//! return to the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::gate::RejectReason;

/// Why a unit was skipped without being persisted. Skips are expected
/// outcomes; failures are not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The channel failed the quality gate.
    Gate(RejectReason),
    /// The platform withheld the statistics block for this channel.
    MissingStatistics,
    /// Business discovery could not resolve the username.
    ProfileNotFound,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Gate(reason) => write!(f, "quality gate: {reason}"),
            SkipReason::MissingStatistics => write!(f, "statistics hidden by the platform"),
            SkipReason::ProfileNotFound => write!(f, "profile not found"),
        }
    }
}

/// Terminal outcome for one unit of work.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UnitOutcome {
    Saved,
    Skipped { reason: SkipReason },
    Failed { error: String },
}

/// One unit of work and what happened to it. `unit` is the channel id for
/// discovery runs and the display name for completion runs.
#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    pub unit: String,
    #[serde(flatten)]
    pub outcome: UnitOutcome,
}

/// The full account of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub pipeline: &'static str,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub units: Vec<UnitReport>,
}

/// Accumulator used while a run is in flight; [`RunSummaryBuilder::finish`]
/// stamps the end time and tallies the counters.
#[derive(Debug)]
pub struct RunSummaryBuilder {
    pipeline: &'static str,
    started_at: DateTime<Utc>,
    units: Vec<UnitReport>,
}

impl RunSummaryBuilder {
    #[must_use]
    pub fn new(pipeline: &'static str) -> Self {
        Self {
            pipeline,
            started_at: Utc::now(),
            units: Vec::new(),
        }
    }

    pub fn record(&mut self, unit: impl Into<String>, outcome: UnitOutcome) {
        self.units.push(UnitReport {
            unit: unit.into(),
            outcome,
        });
    }

    #[must_use]
    pub fn finish(self) -> RunSummary {
        let saved = self
            .units
            .iter()
            .filter(|u| matches!(u.outcome, UnitOutcome::Saved))
            .count();
        let skipped = self
            .units
            .iter()
            .filter(|u| matches!(u.outcome, UnitOutcome::Skipped { .. }))
            .count();
        let failed = self
            .units
            .iter()
            .filter(|u| matches!(u.outcome, UnitOutcome::Failed { .. }))
            .count();

        RunSummary {
            pipeline: self.pipeline,
            started_at: self.started_at,
            finished_at: Utc::now(),
            saved,
            skipped,
            failed,
            units: self.units,
        }
    }
}
