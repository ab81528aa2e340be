use std::sync::Arc;

use axum::{
    extract::{Extension, OriginalUri},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn openapi_json(
    Extension(doc): Extension<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json((*doc).clone())
}

/// Unknown routes render as problem+json like every other error.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    modkit::not_found(format!("no route for {}", uri.path()))
        .with_code("NOT_FOUND")
        .with_instance(uri.path())
}
