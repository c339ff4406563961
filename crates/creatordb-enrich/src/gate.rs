//! Quality gate applied to discovered channels before anything is persisted.
//!
//! A rejection is an expected per-channel outcome, not an error; it carries
//! the first threshold that failed so run summaries can explain the skip.

use chrono::{DateTime, Months, Utc};
use serde::Serialize;

use creatordb_core::QualityThresholds;

/// Outcome of evaluating one channel against the thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GateDecision {
    Accept,
    Reject(RejectReason),
}

impl GateDecision {
    #[must_use]
    pub fn is_accept(&self) -> bool {
        matches!(self, GateDecision::Accept)
    }
}

/// The first threshold a rejected channel failed, checked in order:
/// subscribers, then content volume, then recency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    BelowMinSubscribers { subscribers: i64, minimum: i64 },
    BelowMinContentItems { items: i32, minimum: i32 },
    Inactive { last_published_at: Option<DateTime<Utc>> },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::BelowMinSubscribers {
                subscribers,
                minimum,
            } => write!(f, "{subscribers} subscribers, minimum is {minimum}"),
            RejectReason::BelowMinContentItems { items, minimum } => {
                write!(f, "{items} content items, minimum is {minimum}")
            }
            RejectReason::Inactive { last_published_at } => match last_published_at {
                Some(at) => write!(f, "last published {at}, outside the activity window"),
                None => write!(f, "no published content"),
            },
        }
    }
}

/// Evaluate one channel against the thresholds.
///
/// Recency uses calendar months relative to `now`; a channel whose newest
/// content is exactly on the cutoff counts as active. A channel with no
/// content at all is inactive (it also fails the content-volume check first
/// whenever `min_content_items` is positive).
#[must_use]
pub fn evaluate(
    subscriber_count: i64,
    content_count: i32,
    most_recent_published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    thresholds: &QualityThresholds,
) -> GateDecision {
    if subscriber_count < thresholds.min_subscribers {
        return GateDecision::Reject(RejectReason::BelowMinSubscribers {
            subscribers: subscriber_count,
            minimum: thresholds.min_subscribers,
        });
    }

    if content_count < thresholds.min_content_items {
        return GateDecision::Reject(RejectReason::BelowMinContentItems {
            items: content_count,
            minimum: thresholds.min_content_items,
        });
    }

    let cutoff = now
        .checked_sub_months(Months::new(thresholds.activity_window_months))
        .unwrap_or(now);
    match most_recent_published_at {
        Some(at) if at >= cutoff => GateDecision::Accept,
        other => GateDecision::Reject(RejectReason::Inactive {
            last_published_at: other,
        }),
    }
}
