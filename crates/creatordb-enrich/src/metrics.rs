//! Pure derivation of recent-activity metrics from a content sample window.

use chrono::{DateTime, Duration, Utc};

/// One recent content item (video or post), already ordered newest-first.
#[derive(Debug, Clone)]
pub struct ContentSample {
    pub published_at: DateTime<Utc>,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
}

/// Metrics derived from a sample window. All fields are zero (and the
/// timestamp absent) for an empty window — a valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentActivity {
    pub most_recent_published_at: Option<DateTime<Utc>>,
    pub avg_views: i64,
    pub posts_last_30_days: i32,
    pub views_last_30_days: i64,
    pub engagement_rate: f64,
}

/// Aggregate a newest-first sample window into derived metrics.
///
/// `engagement_rate` is (likes + comments) / views over the whole window,
/// rounded to 4 decimal places, and exactly 0.0 when the window has no views
/// — the division is guarded so NaN/Infinity can never escape.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)] // counts fit f64 mantissa in practice
pub fn aggregate(samples: &[ContentSample], now: DateTime<Utc>) -> RecentActivity {
    if samples.is_empty() {
        return RecentActivity::default();
    }

    let window_start = now - Duration::days(30);

    let total_views: i64 = samples.iter().map(|s| s.view_count).sum();
    let total_likes: i64 = samples.iter().map(|s| s.like_count).sum();
    let total_comments: i64 = samples.iter().map(|s| s.comment_count).sum();

    let in_window: Vec<&ContentSample> = samples
        .iter()
        .filter(|s| s.published_at > window_start)
        .collect();

    let engagement_rate = if total_views > 0 {
        let raw = (total_likes + total_comments) as f64 / total_views as f64;
        (raw * 10_000.0).round() / 10_000.0
    } else {
        0.0
    };

    RecentActivity {
        most_recent_published_at: Some(samples[0].published_at),
        avg_views: (total_views as f64 / samples.len() as f64).round() as i64,
        posts_last_30_days: i32::try_from(in_window.len()).unwrap_or(i32::MAX),
        views_last_30_days: in_window.iter().map(|s| s.view_count).sum(),
        engagement_rate,
    }
}
