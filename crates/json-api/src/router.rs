//! App Router

use salvo::Router;

use crate::{auth, carts, orders};

/// Client-facing routes: every route sits behind bearer-token auth.
pub(crate) fn client_api_router() -> Router {
    Router::with_path("client-api")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("carts")
                .get(carts::handlers::get::handler)
                .post(carts::handlers::save::handler)
                .delete(carts::handlers::delete_lines::handler),
        )
        .push(Router::with_path("orders").post(orders::handlers::create::handler))
}
