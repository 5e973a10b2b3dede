//! JSON API over a loaded content repository
//!
//! The repository is loaded once and shared with every handler through
//! `Arc`; handlers never touch the file system.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use folio_core::config::SiteConfig;
use folio_store::{ContentRepository, StoreError};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cmd::list::{ListQuery, select};

/// Shared handler state.
#[derive(Debug)]
pub struct AppState {
    pub repo: Arc<ContentRepository>,
    pub site: SiteConfig,
}

/// API error mapped to an HTTP status.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown collection or slug.
    NotFound(String),
    /// Collection sources could not be read.
    Unavailable(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownCollection(_) => Self::NotFound(err.to_string()),
            StoreError::Unavailable { .. } => Self::Unavailable(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Unavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Create the API router.
pub fn create_router(repo: Arc<ContentRepository>, site: SiteConfig) -> Router {
    let state = Arc::new(AppState { repo, site });

    Router::new()
        .route("/api/site", get(site_handler))
        .route("/api/collections", get(collections_handler))
        .route("/api/{collection}", get(list_handler))
        .route("/api/{collection}/{slug}", get(item_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn site_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "title": state.site.title,
        "description": state.site.description,
        "collections": state.repo.collections().map(|c| c.name()).collect::<Vec<_>>(),
    }))
}

async fn collections_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let collections: Vec<_> = state
        .repo
        .collections()
        .map(|c| {
            json!({
                "name": c.name(),
                "kind": c.kind(),
                "available": c.is_available(),
                "items": c.items().len(),
                "issues": c.issues().len(),
            })
        })
        .collect();

    Json(json!(collections))
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let items = state.repo.list_all(&collection)?;
    let selection = select(items, &query);
    let issues = state.repo.issues(&collection).len();

    Ok(Json(json!({
        "collection": collection,
        "page": selection.page,
        "total_pages": selection.total_pages,
        "total": selection.total,
        "issues": issues,
        "items": selection.items,
    })))
}

async fn item_handler(
    State(state): State<Arc<AppState>>,
    Path((collection, slug)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let item = state
        .repo
        .get_by_slug(&collection, &slug)?
        .ok_or_else(|| ApiError::NotFound(format!("{collection}/{slug} not found")))?;

    let html = item.record.body().map(|body| body.to_html());
    Ok(Json(json!({ "item": item, "html": html })))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use folio_core::CollectionKind;
    use tower::ServiceExt;

    use super::*;

    fn fixture() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let journal = dir.path().join("journal");
        std::fs::create_dir_all(&journal).expect("mkdir");
        std::fs::write(
            journal.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-03-15\ntags: design\n---\n\nFirst *post*.\n",
        )
        .expect("write");
        std::fs::write(
            journal.join("older.md"),
            "---\ntitle: Older\ndate: 2023-01-01\n---\n",
        )
        .expect("write");
        std::fs::write(dir.path().join("exhibitions.json"), "{ not json").expect("write");

        let repo = ContentRepository::load_from(
            dir.path(),
            [
                ("journal".to_string(), CollectionKind::Journal),
                ("workshops".to_string(), CollectionKind::Workshop),
                ("exhibitions".to_string(), CollectionKind::Exhibition),
            ],
        );
        let site = SiteConfig {
            title: "Studio Poetics".to_string(),
            description: Some("Design with care".to_string()),
        };
        (dir, create_router(Arc::new(repo), site))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_item_found() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/journal/hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["slug"], "hello");
        assert_eq!(body["item"]["title"], "Hello");
        assert_eq!(body["item"]["kind"], "journal");
        assert_eq!(body["html"], "<p>First <em>post</em>.</p>\n");
    }

    #[tokio::test]
    async fn test_item_missing_is_404() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/journal/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "journal/missing not found");
    }

    #[tokio::test]
    async fn test_unknown_collection_is_404() {
        let (_dir, router) = fixture();
        let (status, _) = get_json(router, "/api/press").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unavailable_collection_is_503() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/workshops").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_list_sorted_by_date() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/journal?sort=date&per_page=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["issues"], 0);
        assert_eq!(body["items"][0]["slug"], "hello");
    }

    #[tokio::test]
    async fn test_list_by_label() {
        let (_dir, router) = fixture();
        let (_, body) = get_json(router, "/api/journal?label=design").await;

        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["slug"], "hello");
    }

    #[tokio::test]
    async fn test_collections_listing() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/collections").await;

        assert_eq!(status, StatusCode::OK);
        let collections = body.as_array().unwrap();
        assert_eq!(collections.len(), 3);
        assert_eq!(collections[0]["name"], "exhibitions");
        assert_eq!(collections[0]["available"], false);
        assert_eq!(collections[0]["issues"], 1);
        assert_eq!(collections[1]["name"], "journal");
        assert_eq!(collections[1]["items"], 2);
        assert_eq!(collections[2]["available"], false);
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_503() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/exhibitions").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("exhibitions.json"));
    }

    #[tokio::test]
    async fn test_site_info() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/site").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Studio Poetics");
        assert_eq!(body["description"], "Design with care");
        assert_eq!(
            body["collections"],
            serde_json::json!(["exhibitions", "journal", "workshops"])
        );
    }
}
