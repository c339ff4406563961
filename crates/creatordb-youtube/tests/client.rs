//! Integration tests for `YoutubeClient` using wiremock HTTP mocks.

use creatordb_youtube::{YoutubeClient, YoutubeError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YoutubeClient {
    YoutubeClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_channel_ids() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            { "id": { "kind": "youtube#channel", "channelId": "UCaaa" } },
            { "id": { "kind": "youtube#channel", "channelId": "UCbbb" } },
            { "id": { "kind": "youtube#video", "videoId": "xyz" } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "review tech brasil"))
        .and(query_param("type", "channel"))
        .and(query_param("regionCode", "BR"))
        .and(query_param("maxResults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client
        .search_channel_ids("review tech brasil", "BR", 10)
        .await
        .expect("should parse search results");

    // Entries without a channelId (stray video hits) are dropped.
    assert_eq!(ids, ["UCaaa", "UCbbb"]);
}

#[tokio::test]
async fn search_with_no_results_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client
        .search_channel_ids("nada", "BR", 10)
        .await
        .expect("empty search should succeed");
    assert!(ids.is_empty());
}

#[tokio::test]
async fn channel_details_parses_statistics() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": "UCaaa",
                "snippet": {
                    "title": "Canal Tech",
                    "description": "reviews",
                    "thumbnails": { "high": { "url": "https://img.example.com/a.jpg" } }
                },
                "statistics": {
                    "subscriberCount": "15300",
                    "viewCount": "2000000",
                    "videoCount": "412"
                }
            },
            {
                "id": "UCbbb",
                "snippet": { "title": "Canal Oculto" }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", "UCaaa,UCbbb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let channels = client
        .channel_details(&["UCaaa".to_string(), "UCbbb".to_string()])
        .await
        .expect("should parse channels");

    assert_eq!(channels.len(), 2);
    let stats = channels[0].statistics.as_ref().expect("statistics");
    assert_eq!(stats.subscribers(), 15_300);
    assert_eq!(stats.total_views(), 2_000_000);
    assert_eq!(stats.video_count(), 412);
    assert!(channels[1].statistics.is_none());
}

#[tokio::test]
async fn channel_details_empty_input_skips_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request would 404 and fail the call.
    let client = test_client(&server.uri());
    let channels = client.channel_details(&[]).await.expect("no-op");
    assert!(channels.is_empty());
}

#[tokio::test]
async fn recent_videos_walks_uploads_playlist() {
    let server = MockServer::start().await;

    let playlist = serde_json::json!({
        "items": [
            { "contentDetails": { "videoId": "vid-1" } },
            { "contentDetails": { "videoId": "vid-2" } }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "UUaaa"))
        .and(query_param("maxResults", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&playlist))
        .mount(&server)
        .await;

    let videos = serde_json::json!({
        "items": [
            {
                "id": "vid-1",
                "snippet": { "publishedAt": "2025-08-20T12:00:00Z" },
                "statistics": { "viewCount": "1000", "likeCount": "50", "commentCount": "10" }
            },
            {
                "id": "vid-2",
                "snippet": { "publishedAt": "2025-08-10T12:00:00Z" },
                "statistics": { "viewCount": "900" }
            }
        ]
    });
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "vid-1,vid-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&videos))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .recent_videos("UCaaa", 20)
        .await
        .expect("should parse videos");

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id, "vid-1");
    let stats = videos[0].statistics.as_ref().expect("statistics");
    assert_eq!(stats.views(), 1000);
    assert_eq!(stats.likes(), 50);
    assert_eq!(stats.comments(), 10);
    // Missing counters parse leniently to zero.
    assert_eq!(videos[1].statistics.as_ref().map(|s| s.likes()), Some(0));
}

#[tokio::test]
async fn recent_videos_empty_playlist_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client.recent_videos("UCaaa", 20).await.expect("empty ok");
    assert!(videos.is_empty());
}

#[tokio::test]
async fn quota_error_surfaces_upstream_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The request cannot be completed because you have exceeded your quota.",
            "errors": [{ "reason": "quotaExceeded" }]
        }
    });
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_channel_ids("tech", "BR", 10)
        .await
        .expect_err("quota error should fail");

    assert!(
        matches!(err, YoutubeError::Rejected(ref msg) if msg.contains("exceeded your quota")),
        "expected Rejected with upstream message, got: {err}"
    );
}
