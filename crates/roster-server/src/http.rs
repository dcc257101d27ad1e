//! HTTP front end

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use roster_core::{MatchResult, SearchOutcome};

use crate::service::{HealthReport, LookupError, SearchService};

/// Search request, from a JSON body or the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub name: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub total_matches: usize,
    pub results: Vec<ResultEntry>,
}

impl From<&SearchOutcome> for SearchResponse {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            total_matches: outcome.total_matches,
            results: outcome.results.iter().cloned().map(ResultEntry).collect(),
        }
    }
}

/// One result: `score` followed by the row's own columns in table order.
#[derive(Debug)]
pub struct ResultEntry(pub MatchResult);

impl Serialize for ResultEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let row = &self.0.record.row;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("score", &self.0.score)?;
        for (column, value) in row.iter() {
            // A roster column literally named "score" would shadow ours
            if column != "score" {
                map.serialize_entry(column, value)?;
            }
        }
        map.end()
    }
}

/// Error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Status code plus error body
#[derive(Debug)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_QUERY", message)
    }
}

impl From<LookupError> for ApiErrorResponse {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::InvalidQuery(message) => Self::invalid(message),
            LookupError::NotReady => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "NOT_READY", e.to_string())
            }
            LookupError::Timeout => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", e.to_string())
            }
            LookupError::Failed => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "SEARCH_FAILED", e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

pub fn router(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/search", get(search_query).post(search_body))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn search_body(
    State(service): State<Arc<SearchService>>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiErrorResponse> {
    let Json(request) = request.map_err(|e| ApiErrorResponse::invalid(e.body_text()))?;
    run_search(&service, request).await
}

async fn search_query(
    State(service): State<Arc<SearchService>>,
    request: Result<Query<SearchRequest>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiErrorResponse> {
    let Query(request) = request.map_err(|e| ApiErrorResponse::invalid(e.body_text()))?;
    run_search(&service, request).await
}

async fn run_search(
    service: &SearchService,
    request: SearchRequest,
) -> Result<Json<SearchResponse>, ApiErrorResponse> {
    match service.lookup(&request.name, request.limit).await {
        Ok(outcome) => Ok(Json(SearchResponse::from(outcome.as_ref()))),
        Err(e) => {
            if !matches!(e, LookupError::InvalidQuery(_)) {
                warn!(error = %e, "Search request failed");
            }
            Err(e.into())
        }
    }
}

async fn health(State(service): State<Arc<SearchService>>) -> (StatusCode, Json<HealthReport>) {
    let report = service.health();
    let status = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roster_core::{Row, SearchableRecord};
    use serde_json::json;

    #[test]
    fn test_result_entry_puts_score_first() {
        let entry = ResultEntry(MatchResult {
            score: 0.5,
            strategy: "parts",
            record: Arc::new(SearchableRecord {
                id: 1,
                row: Row::new()
                    .with("م", 7i64)
                    .with("الاسم", "علي حسن")
                    .with("score", "A+"),
                normalized_name: "علي حسن".into(),
            }),
        });

        let text = serde_json::to_string(&entry).unwrap();
        assert_eq!(text, r#"{"score":0.5,"م":7,"الاسم":"علي حسن"}"#);
    }

    #[test]
    fn test_error_mapping() {
        let cases = [
            (LookupError::InvalidQuery("x".into()), StatusCode::BAD_REQUEST, "INVALID_QUERY"),
            (LookupError::NotReady, StatusCode::SERVICE_UNAVAILABLE, "NOT_READY"),
            (LookupError::Timeout, StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            (LookupError::Failed, StatusCode::INTERNAL_SERVER_ERROR, "SEARCH_FAILED"),
        ];
        for (error, status, code) in cases {
            let response = ApiErrorResponse::from(error);
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_response_shape() {
        let outcome = SearchOutcome {
            total_matches: 3,
            results: vec![],
        };
        let value = serde_json::to_value(SearchResponse::from(&outcome)).unwrap();
        assert_eq!(value, json!({ "totalMatches": 3, "results": [] }));
    }
}
