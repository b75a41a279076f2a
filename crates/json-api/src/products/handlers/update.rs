//! Update Product Handler

use gazalla::Category;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gazalla_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    money::from_json_amount,
    products::{ProductEnvelope, into_status_error},
};

/// Update Product Request
///
/// Omitted fields keep their stored values.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<u32>,
}

impl UpdateProductRequest {
    fn into_update(self) -> Result<ProductUpdate, StatusError> {
        let category = self
            .category
            .map(|category| category.parse::<Category>())
            .transpose()
            .or_400("\"category\" must be \"men\" or \"women\"")?;

        let price = self
            .price
            .map(|price| from_json_amount(price, "price"))
            .transpose()?;

        Ok(ProductUpdate {
            name: self.name,
            description: self.description,
            price,
            category,
            image_url: self.image_url,
            stock: self.stock,
        })
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let update = json.into_inner().into_update()?;

    let product = state
        .app
        .products
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductEnvelope {
        product: product.into(),
        message: Some("Product updated successfully".to_string()),
    }))
}
