//! Add To Cart Handler
//!
//! Carts live on the client; this resolves a product reference into the line item the client
//! stores.

use gazalla::LineItem;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use gazalla_app::domain::products::{ProductsServiceError, models::ProductUuid};

use crate::{extensions::*, money::to_json_amount, products};

const fn default_quantity() -> u32 {
    1
}

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartRequest {
    pub product_id: String,

    /// Units to add, one when omitted
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Line item ready to be stored in a cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub line_total: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<u32>,
}

impl From<LineItem> for CartItemResponse {
    fn from(item: LineItem) -> Self {
        let line_total = to_json_amount(item.line_total());

        CartItemResponse {
            id: item.id,
            name: item.name,
            price: to_json_amount(item.price),
            quantity: item.quantity,
            line_total,
            description: item.description,
            category: item.category.map(|category| category.to_string()),
            image_url: item.image_url,
            stock: item.stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartResponse {
    pub cart_item: CartItemResponse,
    pub message: String,
}

/// Add To Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item added to cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<AddToCartResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let AddToCartRequest {
        product_id,
        quantity,
    } = json.into_inner();

    let Ok(product) = product_id.trim().parse::<ProductUuid>() else {
        return Err(products::into_status_error(ProductsServiceError::NotFound));
    };

    let product = state
        .app
        .products
        .get_product(product)
        .await
        .map_err(products::into_status_error)?;

    let item = LineItem::from_product(&gazalla::Product::from(&product), quantity);

    item.validate().or_400("invalid cart item")?;

    Ok(Json(AddToCartResponse {
        cart_item: item.into(),
        message: "Item added to cart".to_string(),
    }))
}
