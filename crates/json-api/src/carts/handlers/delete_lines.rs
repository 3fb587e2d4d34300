//! Delete Cart Lines Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use ampera_app::domain::carts::models::CartLineKey;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// One cart line to delete, by composite key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineKeyRequest {
    pub cart_id: i64,
    pub variant_id: i64,
}

impl From<CartLineKeyRequest> for CartLineKey {
    fn from(request: CartLineKeyRequest) -> Self {
        Self {
            cart_id: request.cart_id,
            variant_id: request.variant_id,
        }
    }
}

/// Delete Cart Lines Handler
///
/// Deletes all listed lines in one batch. An empty list is a valid no-op.
#[endpoint(
    tags("carts"),
    summary = "Delete Cart Lines",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Lines deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<Vec<CartLineKeyRequest>>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let keys = json
        .into_inner()
        .into_iter()
        .map(CartLineKey::from)
        .collect();

    state
        .app
        .carts
        .delete_lines(keys)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
