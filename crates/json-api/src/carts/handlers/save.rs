//! Save Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use ampera_app::domain::carts::data::{CartLineChange, SaveCart};

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartResponse, CartStatusDto, UpdateTypeDto},
    },
    extensions::*,
    state::State,
};

/// Save Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaveCartRequest {
    /// Existing cart id; omit to create a new cart
    #[serde(default)]
    pub cart_id: Option<i64>,

    /// Cart status to apply; defaults to active
    #[serde(default)]
    pub status: Option<CartStatusDto>,

    /// How requested quantities combine with existing lines
    pub update_type: UpdateTypeDto,

    /// Requested line quantities
    pub items: Vec<SaveCartItem>,
}

/// One requested line quantity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaveCartItem {
    pub variant_id: i64,
    pub quantity: u32,
}

impl SaveCartRequest {
    fn into_save_cart(self, username: &str) -> SaveCart {
        SaveCart {
            cart_id: self.cart_id,
            username: username.to_string(),
            status: self.status.unwrap_or(CartStatusDto::Active).into(),
            update_type: self.update_type.into(),
            lines: self
                .items
                .into_iter()
                .map(|item| CartLineChange {
                    variant_id: item.variant_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Save Cart Handler
///
/// Creates the cart when no id is given, otherwise merges the request into
/// the existing cart. Every resulting line is validated against sellable
/// inventory.
#[endpoint(
    tags("carts"),
    summary = "Save Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart saved"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity exceeds sellable inventory"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SaveCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let username = depot.username_or_401()?;

    let cart = state
        .app
        .carts
        .save_cart(json.into_inner().into_save_cart(username))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
