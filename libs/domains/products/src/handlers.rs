//! HTTP handlers for the Products API
//!
//! The handler functions are written once and mounted by two routing
//! surfaces: [`router`] here and the functional-style router in
//! [`crate::routes`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use axum_helpers::errors::responses::InternalServerErrorResponse;
use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::events::{product_events, DEFAULT_EVENT_PERIOD};
use crate::models::{CreateProduct, Product, ProductEvent, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        delete_all_products,
        get_product,
        update_product,
        delete_product,
        product_event_stream,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductEvent),
        responses(InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Catalog CRUD and the product event stream")
    )
)]
pub struct ApiDoc;

/// Handler-based router carrying the whole catalog surface
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .delete(delete_all_products),
        )
        .route("/events", get(product_event_stream))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "Every product in the catalog", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Stored product with its assigned id", body = Product),
        (status = 400, description = "Malformed request body"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Json(input): Json<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
///
/// Absence is an expected outcome: 404 with an empty body, no error envelope.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Server-assigned product id")
    ),
    responses(
        (status = 200, description = "The matching product", body = Product),
        (status = 404, description = "No product with this ID"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Response> {
    let response = match service.get_product(&id).await? {
        Some(product) => Json(product).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

/// Update a product
///
/// The response carries the stored identifier with the incoming name and
/// price; an identifier in the body is ignored.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Server-assigned product id")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "The product after replacement", body = Product),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "No product with this ID"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> ProductResult<Response> {
    let response = match service.update_product(&id, input).await? {
        Some(product) => Json(product).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Server-assigned product id")
    ),
    responses(
        (status = 200, description = "Product removed"),
        (status = 404, description = "No product with this ID"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<StatusCode> {
    if service.delete_product(&id).await? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

/// Delete all products
#[utoipa::path(
    delete,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "Collection emptied"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
pub(crate) async fn delete_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<StatusCode> {
    service.delete_all_products().await?;
    Ok(StatusCode::OK)
}

/// Stream product events
///
/// Emits one event per second for as long as the client stays connected,
/// with a per-connection counter starting at 0.
#[utoipa::path(
    get,
    path = "/events",
    tag = "Products",
    responses(
        (status = 200, description = "Server-sent product events", body = ProductEvent,
         content_type = "text/event-stream")
    )
)]
pub(crate) async fn product_event_stream() -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream =
        product_events(DEFAULT_EVENT_PERIOD).map(|event| Event::default().json_data(&event));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
