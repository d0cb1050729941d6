use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

use movie_recommender::{
    api::{create_router, AppState},
    middleware::request_id::REQUEST_ID_HEADER,
    models::EnrichmentDetails,
    services::{
        providers::{MetadataProvider, TmdbProvider},
        Recommender, DEFAULT_RECOMMENDATION_COUNT,
    },
    store::RecommendationContext,
};

const PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Poster+Available";

/// Provider that answers from the external id and counts its calls
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl MetadataProvider for CountingProvider {
    async fn fetch(&self, external_id: &str) -> EnrichmentDetails {
        self.calls.fetch_add(1, Ordering::SeqCst);
        EnrichmentDetails {
            poster_ref: format!("https://image.tmdb.org/t/p/w500/{}.jpg", external_id),
            categories: "Action, Adventure".to_string(),
            rating: 7.5,
        }
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn load_fixture_context() -> Arc<RecommendationContext> {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    let context = RecommendationContext::load(
        &format!("{}/movies.json", dir),
        &format!("{}/similarity.json", dir),
    )
    .unwrap();
    Arc::new(context)
}

fn create_test_app(provider: Arc<dyn MetadataProvider>) -> Router {
    let recommender = Recommender::new(
        load_fixture_context(),
        provider,
        DEFAULT_RECOMMENDATION_COUNT,
    );
    create_router(AppState::new(recommender))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn result_titles(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(Arc::new(CountingProvider::default()));
    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_titles_in_catalog_order() {
    let app = create_test_app(Arc::new(CountingProvider::default()));
    let (status, body) = get(app, "/api/v1/titles").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<String> = serde_json::from_value(body).unwrap();
    assert_eq!(titles.len(), 6);
    assert_eq!(titles[0], "Avatar");
    assert_eq!(titles[5], "Spider-Man 3");
}

#[tokio::test]
async fn test_recommend_returns_ranked_results() {
    let provider = Arc::new(CountingProvider::default());
    let app = create_test_app(provider.clone());

    let (status, body) = get(app, "/api/v1/recommendations?title=Avatar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "Avatar");
    assert_eq!(
        result_titles(&body),
        vec![
            "Pirates of the Caribbean: At World's End",
            "Spectre",
            "The Dark Knight Rises",
            "John Carter",
            "Spider-Man 3",
        ]
    );
    assert_eq!(body["results"][0]["external_id"], "285");
    assert_eq!(
        body["results"][0]["poster_ref"],
        "https://image.tmdb.org/t/p/w500/285.jpg"
    );
    assert_eq!(body["results"][0]["rating"], 7.5);
    assert!(body.get("error").is_none());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_recommend_url_encoded_title() {
    let app = create_test_app(Arc::new(CountingProvider::default()));
    let (status, body) = get(app, "/api/v1/recommendations?title=Spider-Man%203").await;

    assert_eq!(status, StatusCode::OK);
    let titles = result_titles(&body);
    assert_eq!(titles.len(), 5);
    assert!(!titles.contains(&"Spider-Man 3".to_string()));
    assert_eq!(titles[0], "John Carter");
}

#[tokio::test]
async fn test_recommend_unknown_title() {
    let provider = Arc::new(CountingProvider::default());
    let app = create_test_app(provider.clone());

    let (status, body) = get(app, "/api/v1/recommendations?title=Unknown%20Movie").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["query"], "Unknown Movie");
    assert!(body["results"].as_array().unwrap().is_empty());
    assert!(body["error"].as_str().unwrap().contains("Unknown Movie"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_recommend_empty_title_rejected() {
    let app = create_test_app(Arc::new(CountingProvider::default()));
    let (status, _) = get(app, "/api/v1/recommendations?title=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_missing_title_param_rejected() {
    let app = create_test_app(Arc::new(CountingProvider::default()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/recommendations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let app = create_test_app(Arc::new(CountingProvider::default()));
    let request_id = "5f0c6d2e-8a43-4f5e-9a3b-2b1c7f4d9e10";

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, request_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], request_id);
}

#[tokio::test]
async fn test_recommend_with_failing_upstream_degrades() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&server)
        .await;

    let provider = TmdbProvider::new(
        "test_key".to_string(),
        server.uri(),
        "https://image.tmdb.org/t/p/w500".to_string(),
        "en-US".to_string(),
        PLACEHOLDER.to_string(),
        Duration::from_secs(2),
    )
    .unwrap();
    let app = create_test_app(Arc::new(provider));

    let (status, body) = get(app, "/api/v1/recommendations?title=Spectre").await;

    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    for result in results {
        assert_eq!(result["poster_ref"], PLACEHOLDER);
        assert_eq!(result["categories"], "Unknown");
        assert_eq!(result["rating"], 0.0);
    }
    assert_eq!(
        result_titles(&body),
        vec![
            "Avatar",
            "John Carter",
            "The Dark Knight Rises",
            "Pirates of the Caribbean: At World's End",
            "Spider-Man 3",
        ]
    );
}
