//! Delete Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    MessageResponse,
    extensions::*,
    products::into_status_error,
};

/// Delete Product Handler
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.state_or_500()?;

    state
        .app
        .products
        .delete_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use gazalla_app::domain::products::{ProductsServiceError, models::ProductUuid};

    use crate::test_helpers::{Mocks, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("products/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .withf(move |product| *product == uuid)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Product deleted successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_product_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/products/{}", ProductUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
