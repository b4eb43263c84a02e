//! OpenAPI document served by the doc UIs

use utoipa::OpenApi;

/// Describes the handler-based surface at `/products`. The functional-style
/// surface at `/functional/products` mirrors those routes and stays out of
/// the document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalog CRUD with a live product event stream",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local instance")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Catalog CRUD and the product event stream")
    )
)]
pub struct ApiDoc;
