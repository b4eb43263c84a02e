//! Functional-style routing surface for the Products API
//!
//! Second mount point for the same handler set, grouped behind a media-type
//! guard: GET, POST and PUT answer only when the client accepts JSON or an
//! event stream (or sends a JSON body), while the DELETE routes answer
//! unconditionally. Requests the guard rejects fall through to 404.

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    create_product, delete_all_products, delete_product, get_product, list_products,
    product_event_stream, update_product,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Create the functional-style products router
pub fn functional_router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    let guarded = Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/events", get(product_event_stream))
        .route("/{id}", get(get_product).put(update_product))
        .layer(middleware::from_fn(require_json_or_event_stream))
        .with_state(Arc::clone(&shared_service));

    let unguarded = Router::new()
        .route("/", delete(delete_all_products))
        .route("/{id}", delete(delete_product))
        .with_state(shared_service);

    guarded.merge(unguarded)
}

async fn require_json_or_event_stream(request: Request, next: Next) -> Response {
    if matches_products_media(request.headers()) {
        next.run(request).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Media-type guard for the functional surface
///
/// Passes when the Accept header is compatible with `application/json` or
/// `text/event-stream`, or when the request carries a JSON body. A missing
/// Accept header counts as `*/*`.
fn matches_products_media(headers: &HeaderMap) -> bool {
    let accept_ok = match headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) {
        None => true,
        Some(value) => accepts_json_or_event_stream(value),
    };

    let content_type_ok = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|value| media_type(value) == "application/json")
        .unwrap_or(false);

    accept_ok || content_type_ok
}

fn accepts_json_or_event_stream(accept: &str) -> bool {
    accept.split(',').map(media_type).any(|mime| {
        matches!(
            mime,
            "*/*" | "application/*" | "application/json" | "text/*" | "text/event-stream"
        )
    })
}

/// Strip parameters (`;q=0.9`, `;charset=utf-8`) and surrounding whitespace
fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::repository::MockProductRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt; // For oneshot()

    fn app(mock_repo: MockProductRepository) -> Router {
        functional_router(ProductService::new(mock_repo))
    }

    #[test]
    fn test_accept_header_matching() {
        assert!(accepts_json_or_event_stream("application/json"));
        assert!(accepts_json_or_event_stream("application/json;q=0.9"));
        assert!(accepts_json_or_event_stream("text/html, application/json"));
        assert!(accepts_json_or_event_stream("*/*"));
        assert!(accepts_json_or_event_stream("text/event-stream"));
        assert!(!accepts_json_or_event_stream("text/html"));
        assert!(!accepts_json_or_event_stream("application/xml"));
    }

    #[tokio::test]
    async fn test_list_passes_guard_with_json_accept() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(|| Ok(vec![]));

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .header("accept", "application/json")
            .body(Body::empty())
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_passes_guard_without_accept_header() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(|| Ok(vec![]));

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guard_rejects_non_json_accept_with_404() {
        let mock_repo = MockProductRepository::new();

        let request = Request::builder()
            .method("GET")
            .uri("/")
            .header("accept", "text/html")
            .body(Body::empty())
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_json_body_passes_guard_despite_hostile_accept() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert()
            .returning(|input| Ok(Product::new(input)));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("accept", "text/html")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Jasmine Tea", "price": 0.99 }).to_string(),
            ))
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_update_through_functional_surface_keeps_stored_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| {
            Ok(Some(Product {
                id: "a1".to_string(),
                name: "Big Latte".to_string(),
                price: 2.99,
            }))
        });
        mock_repo.expect_replace().returning(|_| Ok(()));

        let request = Request::builder()
            .method("PUT")
            .uri("/a1")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Jasmine Tea", "price": 0.99 }).to_string(),
            ))
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let product: Product = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(product.id, "a1");
        assert_eq!(product.name, "Jasmine Tea");
    }

    #[tokio::test]
    async fn test_delete_bypasses_guard() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete_by_id().returning(|_| Ok(true));

        let request = Request::builder()
            .method("DELETE")
            .uri("/a1")
            .header("accept", "text/html")
            .body(Body::empty())
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_all_bypasses_guard() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete_all().returning(|| Ok(()));

        let request = Request::builder()
            .method("DELETE")
            .uri("/")
            .header("accept", "text/html")
            .body(Body::empty())
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_event_stream_passes_guard_with_event_stream_accept() {
        let mock_repo = MockProductRepository::new();

        let request = Request::builder()
            .method("GET")
            .uri("/events")
            .header("accept", "text/event-stream")
            .body(Body::empty())
            .unwrap();
        let response = app(mock_repo).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/event-stream"));
    }
}
