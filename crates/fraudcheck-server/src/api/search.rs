use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use fraudcheck_core::{FeedError, SearchResult};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    pub query: String,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchResult>>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "query must not be blank",
        ));
    }

    let result = state
        .cache
        .search(query)
        .await
        .map_err(|e| map_feed_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_feed_error(request_id: String, error: &FeedError) -> ApiError {
    tracing::error!(error = %error, "feed refresh failed during search");
    ApiError::new(
        request_id,
        "upstream_unavailable",
        "fraud feed is unavailable",
    )
}
