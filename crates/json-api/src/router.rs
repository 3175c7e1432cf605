//! App Router

use salvo::Router;

use crate::{auth, cart, checkout, orders};

/// Routes that require a bearer token. Everything under `admin` additionally
/// requires the admin role.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("transactions/checkout").post(checkout::create::handler),
        )
        .push(
            Router::with_path("cart")
                .get(cart::index::handler)
                .post(cart::create::handler)
                .delete(cart::clear::handler)
                .push(Router::with_path("{item}").delete(cart::delete::handler)),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("admin").hoop(auth::admin::handler).push(
                Router::with_path("orders/{order}")
                    .delete(orders::delete::handler)
                    .push(Router::with_path("status").patch(orders::update_status::handler)),
            ),
        )
}
