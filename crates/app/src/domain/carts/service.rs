//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::{
    carts::{
        data::SaveCart,
        errors::CartsServiceError,
        merge,
        models::{Cart, CartLineKey},
        repositories::{CartLinesRepository, CartsRepository},
    },
    inventory::{self, repository::StockMovementsRepository},
};

#[derive(Clone)]
pub struct DefaultCartsService {
    carts: Arc<dyn CartsRepository>,
    lines: Arc<dyn CartLinesRepository>,
    stock: Arc<dyn StockMovementsRepository>,
}

impl DefaultCartsService {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsRepository>,
        lines: Arc<dyn CartLinesRepository>,
        stock: Arc<dyn StockMovementsRepository>,
    ) -> Self {
        Self {
            carts,
            lines,
            stock,
        }
    }
}

#[async_trait]
impl CartsService for DefaultCartsService {
    async fn cart_for(&self, username: &str) -> Result<Option<Cart>, CartsServiceError> {
        let cart = self.carts.find_by_username(username).await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.save_cart",
        skip(self, request),
        fields(
            cart_id = request.cart_id,
            username = %request.username,
            line_count = request.lines.len()
        ),
        err
    )]
    async fn save_cart(&self, request: SaveCart) -> Result<Cart, CartsServiceError> {
        let draft = match request.cart_id {
            None => merge::new_cart(&request),
            Some(id) => {
                let existing = self
                    .carts
                    .find_by_id(id)
                    .await?
                    .ok_or(CartsServiceError::NotFound { id })?;

                merge::merge_into(&existing, &request)
            }
        };

        for line in &draft.lines {
            let movements = self.stock.movements_for_variant(line.variant_id).await?;
            let sellable = inventory::indices(&movements).sellable();

            if i64::from(line.quantity) > sellable {
                return Err(CartsServiceError::QuantityExceedsInventory);
            }
        }

        let cart = self.carts.save(draft).await?;

        info!(cart_id = cart.id, "saved cart");

        Ok(cart)
    }

    async fn delete_lines(&self, keys: Vec<CartLineKey>) -> Result<(), CartsServiceError> {
        let rows_affected = self.lines.delete_by_keys(keys).await?;

        info!(rows_affected, "deleted cart lines");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The authenticated owner's cart, or `None` when they have none.
    async fn cart_for(&self, username: &str) -> Result<Option<Cart>, CartsServiceError>;

    /// Create or merge-update a cart, validating every resulting line
    /// quantity against the variant's sellable inventory before persisting.
    async fn save_cart(&self, request: SaveCart) -> Result<Cart, CartsServiceError>;

    /// Delete cart lines by composite key in one batch.
    async fn delete_lines(&self, keys: Vec<CartLineKey>) -> Result<(), CartsServiceError>;
}
