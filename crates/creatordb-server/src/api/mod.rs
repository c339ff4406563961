mod influencers;
mod worker;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use creatordb_enrich::EnrichmentRunner;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub runner: Arc<EnrichmentRunner>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/influencers", get(influencers::list_influencers))
        .route("/run-worker-now", get(worker::run_worker_now))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match creatordb_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use creatordb_core::{Niche, NicheCatalog, QualityThresholds};
    use creatordb_enrich::{DiscoveryOptions, InstagramEnrichment, YoutubeEnrichment};

    /// Full application wired to mock platform servers.
    async fn test_app(pool: PgPool) -> (Router, MockServer, MockServer) {
        let youtube_server = MockServer::start().await;
        let instagram_server = MockServer::start().await;

        let youtube_client =
            creatordb_youtube::YoutubeClient::with_base_url("test-key", 30, &youtube_server.uri())
                .expect("youtube client");
        let instagram_client = creatordb_instagram::InstagramClient::with_base_url(
            "test-token",
            30,
            &instagram_server.uri(),
        )
        .expect("instagram client");

        let catalog = NicheCatalog {
            niches: vec![Niche {
                name: "Tecnologia".to_string(),
                keywords: vec!["review tech brasil".to_string()],
            }],
        };
        let youtube = YoutubeEnrichment::new(
            youtube_client,
            pool.clone(),
            catalog,
            QualityThresholds::default(),
            DiscoveryOptions::default(),
        );
        let instagram = InstagramEnrichment::new(instagram_client, pool.clone());
        let runner = Arc::new(EnrichmentRunner::new(youtube, instagram));

        let app = build_app(AppState { pool, runner });
        (app, youtube_server, instagram_server)
    }

    async fn get_response(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, body.to_vec())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn health_returns_ok_with_live_database(pool: PgPool) {
        let (app, _yt, _ig) = test_app(pool).await;
        let (status, body) = get_response(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "ok");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn influencers_empty_database_returns_empty_array(pool: PgPool) {
        let (app, _yt, _ig) = test_app(pool).await;
        let (status, body) = get_response(app, "/influencers").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json, serde_json::json!([]));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn influencers_returns_nested_profiles_ordered_by_reach(pool: PgPool) {
        for (name, channel, subscribers) in [
            ("Canal Menor", "UCsmall", 2_000_i64),
            ("Canal Maior", "UCbig", 900_000),
        ] {
            let influencer_id: i64 = sqlx::query_scalar(
                "INSERT INTO influencers (display_name, main_niche) \
                 VALUES ($1, 'Tecnologia') RETURNING id",
            )
            .bind(name)
            .fetch_one(&pool)
            .await
            .expect("seed influencer");

            sqlx::query(
                "INSERT INTO social_profiles \
                 (influencer_id, platform, channel_id, name, subscriber_count) \
                 VALUES ($1, 'youtube', $2, $3, $4)",
            )
            .bind(influencer_id)
            .bind(channel)
            .bind(name)
            .bind(subscribers)
            .execute(&pool)
            .await
            .expect("seed profile");
        }

        let (app, _yt, _ig) = test_app(pool).await;
        let (status, body) = get_response(app, "/influencers").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        let items = json.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["display_name"], "Canal Maior");
        assert_eq!(items[1]["display_name"], "Canal Menor");

        let profiles = items[0]["profiles"].as_array().expect("profiles array");
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0]["platform"], "youtube");
        assert_eq!(profiles[0]["channel_id"], "UCbig");
        assert_eq!(profiles[0]["subscriber_count"], 900_000);
        // Internal row ids never leave the API.
        assert!(items[0].get("id").is_some());
        assert!(items[0]["id"].is_string(), "id should be the public uuid");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn run_worker_now_reports_an_empty_run(pool: PgPool) {
        let (app, yt, _ig) = test_app(pool).await;

        // No discovery results, no influencers missing instagram.
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
            )
            .mount(&yt)
            .await;

        let (status, body) = get_response(app, "/run-worker-now").await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(body).expect("utf8 body");
        assert!(text.contains("youtube"), "summary text missing: {text}");
        assert!(text.contains("instagram"), "summary text missing: {text}");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn run_worker_now_conflicts_while_a_run_is_in_flight(pool: PgPool) {
        let (app, yt, _ig) = test_app(pool).await;

        // Slow search keeps the first run holding the lock while the second
        // trigger arrives.
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "items": [] }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&yt)
            .await;

        let (first, second) = tokio::join!(
            get_response(app.clone(), "/run-worker-now"),
            get_response(app.clone(), "/run-worker-now"),
        );

        let mut statuses = [first.0, second.0];
        statuses.sort();
        assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
    }
}
