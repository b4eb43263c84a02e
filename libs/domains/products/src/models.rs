use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Label carried by every emitted product event
pub const PRODUCT_EVENT_TYPE: &str = "Product Event";

/// A catalog record as stored in MongoDB and returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the server on creation
    pub id: String,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
}

/// Request body for creation.
///
/// Deliberately has no `id` field: an identifier in the JSON is dropped
/// during deserialization and the server assigns its own.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
}

/// Request body for replacement.
///
/// Both fields overwrite the stored values. The path identifier wins; one
/// inside the body is dropped the same way as on creation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: String,
    pub price: f64,
}

/// Event emitted on the product event stream
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductEvent {
    /// Sequence number, 0-based per subscriber
    pub event_id: u64,
    /// Constant event label
    pub event_type: String,
}

impl Product {
    /// Record for `input` with a freshly assigned ObjectId-hex identifier
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            name: input.name,
            price: input.price,
        }
    }

    /// Take the incoming name and price, keeping the stored identifier
    pub fn apply_update(&mut self, update: UpdateProduct) {
        self.name = update.name;
        self.price = update.price;
    }
}

impl ProductEvent {
    /// Build an event with the given sequence number and the standard label
    pub fn new(event_id: u64) -> Self {
        Self {
            event_id,
            event_type: PRODUCT_EVENT_TYPE.to_string(),
        }
    }
}
