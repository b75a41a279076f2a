//! Create Product Handler

use gazalla::Category;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use gazalla_app::domain::products::{data::NewProduct, models::ProductUuid};

use crate::{
    extensions::*,
    money::from_json_amount,
    products::{ProductEnvelope, into_status_error},
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stock: u32,
}

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, StatusError> {
        let category = self
            .category
            .parse::<Category>()
            .or_400("\"category\" must be \"men\" or \"women\"")?;

        Ok(NewProduct {
            uuid: ProductUuid::new(),
            name: self.name,
            description: self.description,
            price: from_json_amount(self.price, "price")?,
            category,
            image_url: self.image_url,
            stock: self.stock,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEnvelope>, StatusError> {
    let state = depot.state_or_500()?;
    let new_product = json.into_inner().into_new_product()?;

    let product = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductEnvelope {
        product: product.into(),
        message: Some("Product created successfully".to_string()),
    }))
}
