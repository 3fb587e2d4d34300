//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use ampera_app::domain::carts::models::Cart;

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartItemResponse, CartStatusDto},
    },
    extensions::*,
    state::State,
};

/// Cart snapshot. A user without a cart gets an empty object, not an error,
/// so every field is skipped when absent.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSnapshotResponse {
    /// The unique identifier of the cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<i64>,

    /// Owner username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Cart lifecycle status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CartStatusDto>,

    /// The lines in the cart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CartItemResponse>>,
}

impl From<Cart> for CartSnapshotResponse {
    fn from(cart: Cart) -> Self {
        Self {
            cart_id: Some(cart.id),
            username: Some(cart.username),
            status: Some(cart.status.into()),
            items: Some(cart.lines.into_iter().map(CartItemResponse::from).collect()),
        }
    }
}

/// Get Cart Handler
///
/// Returns the authenticated user's cart, or an empty object when they have
/// none.
#[endpoint(
    tags("carts"),
    summary = "Get Current Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart snapshot, or an empty object"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartSnapshotResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let username = depot.username_or_401()?;

    let cart = state
        .app
        .carts
        .cart_for(username)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.map(CartSnapshotResponse::from).unwrap_or_default()))
}
