//! Product catalog domain: models, service, persistence, and two HTTP
//! surfaces that share one handler set.
//!
//! # Layering
//!
//! ```text
//! handlers / routes    two URL surfaces, same handler functions
//!        │
//!     service          orchestration and update semantics
//!        │
//!    repository        ProductRepository trait, MongoDB behind it
//!        │
//!      models          Product, DTOs, stream events
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     routes,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let service = ProductService::new(MongoProductRepository::new(&db));
//!
//! // One handler set, two prefixes
//! let app = axum::Router::new()
//!     .nest("/products", handlers::router(service.clone()))
//!     .nest("/functional/products", routes::functional_router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod routes;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use events::product_events;
pub use handlers::ApiDoc;
pub use models::{CreateProduct, Product, ProductEvent, UpdateProduct};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use routes::functional_router;
pub use service::ProductService;
