//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gazalla_app::domain::products::models::Product;

use crate::money::to_json_amount;

/// Product as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Long description
    pub description: String,

    /// Unit price
    pub price: f64,

    /// Department: `men` or `women`
    pub category: String,

    /// Image location
    pub image_url: String,

    /// Units in stock
    pub stock: u32,

    /// Whether stock is running low
    pub low_stock: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let low_stock = gazalla::Product::from(&product).is_low_stock();

        ProductResponse {
            id: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: to_json_amount(product.price),
            category: product.category.to_string(),
            image_url: product.image_url,
            stock: product.stock,
            low_stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// A single product with an optional confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub product: ProductResponse,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
