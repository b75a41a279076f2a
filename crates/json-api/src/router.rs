//! App Router

use salvo::Router;

use crate::{auth, cart, database_status, healthcheck, observability, orders, products, users};

/// Routes served by the API, without middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("api").push(api_router()))
}

fn api_router() -> Router {
    Router::new()
        .push(Router::with_path("database-status").get(database_status::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .post(users::create::handler)
                .push(Router::with_path("{user}").delete(users::delete::handler)),
        )
        .push(
            Router::with_path("auth")
                .post(auth::login::handler)
                .push(Router::with_path("signup").post(auth::signup::handler)),
        )
        .push(Router::with_path("cart").post(cart::add::handler))
}
