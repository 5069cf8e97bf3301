mod search;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fraudcheck_core::{CacheStats, FraudCache};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<FraudCache>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_unavailable" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/stats", get(stats))
        .route("/api/v1/search", post(search::search))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

async fn stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<CacheStats>> {
    let stats = state.cache.stats().await;
    Json(ApiResponse {
        data: stats,
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use fraudcheck_core::FeedClient;

    const FEED_BODY: &str = "\
Phone,State,City,Zone,distinct_customers,customer_ids\n\
5551234,Abuja,Garki,North,1,[CUST9]\n";

    async fn app_with_feed(server: &MockServer) -> Router {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
            .mount(server)
            .await;
        let feed = FeedClient::new(&server.uri(), 30).expect("feed client");
        let cache = Arc::new(FraudCache::new(feed, Duration::from_secs(600)));
        build_app(AppState { cache })
    }

    #[test]
    fn api_error_bad_request_maps_to_400() {
        let response = ApiError::new("req-1", "bad_request", "blank query").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_upstream_unavailable_maps_to_502() {
        let response = ApiError::new("req-1", "upstream_unavailable", "feed down").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_answers_ok_without_touching_the_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
            .expect(0)
            .mount(&server)
            .await;
        let feed = FeedClient::new(&server.uri(), 30).expect("feed client");
        let cache = Arc::new(FraudCache::new(feed, Duration::from_secs(600)));
        let app = build_app(AppState { cache });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn search_round_trips_a_fraud_result() {
        let server = MockServer::start().await;
        let app = app_with_feed(&server).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"CUST9"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"], "fraud");
        assert_eq!(json["data"]["locations"][0]["city"], "Garki");
        assert_eq!(json["data"]["search_value"], "5551234");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_the_core_runs() {
        let server = MockServer::start().await;
        // expect(0): a blank query must never trigger a feed fetch.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
            .expect(0)
            .mount(&server)
            .await;
        let feed = FeedClient::new(&server.uri(), 30).expect("feed client");
        let cache = Arc::new(FraudCache::new(feed, Duration::from_secs(600)));
        let app = build_app(AppState { cache });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"   "}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn feed_failure_surfaces_as_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let feed = FeedClient::new(&server.uri(), 30).expect("feed client");
        let cache = Arc::new(FraudCache::new(feed, Duration::from_secs(600)));
        let app = build_app(AppState { cache });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"5551234"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
