//! Reconciliation of a save-cart request with existing cart state.

use rustc_hash::FxHashMap;

use crate::domain::carts::{
    data::{CartDraft, CartLineDraft, SaveCart, UpdateQuantityType},
    models::Cart,
};

/// Build a draft for a brand-new cart straight from the request.
#[must_use]
pub fn new_cart(request: &SaveCart) -> CartDraft {
    CartDraft {
        id: None,
        username: request.username.clone(),
        status: request.status,
        lines: request
            .lines
            .iter()
            .map(|change| CartLineDraft {
                variant_id: change.variant_id,
                quantity: change.quantity,
            })
            .collect(),
    }
}

/// Merge the request into an existing cart. Lines the request does not touch
/// are kept as-is; touched lines combine per the update type; unknown
/// variants are appended. Line order is existing-first, deterministic.
#[must_use]
pub fn merge_into(existing: &Cart, request: &SaveCart) -> CartDraft {
    let mut lines: Vec<CartLineDraft> = existing
        .lines
        .iter()
        .map(|line| CartLineDraft {
            variant_id: line.variant_id,
            quantity: line.quantity,
        })
        .collect();

    let mut by_variant: FxHashMap<i64, usize> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| (line.variant_id, index))
        .collect();

    for change in &request.lines {
        match by_variant.get(&change.variant_id) {
            Some(&index) => {
                let line = &mut lines[index];

                line.quantity = match request.update_type {
                    UpdateQuantityType::Incremental => line.quantity + change.quantity,
                    UpdateQuantityType::Override => change.quantity,
                };
            }
            None => {
                by_variant.insert(change.variant_id, lines.len());
                lines.push(CartLineDraft {
                    variant_id: change.variant_id,
                    quantity: change.quantity,
                });
            }
        }
    }

    CartDraft {
        id: Some(existing.id),
        username: request.username.clone(),
        status: request.status,
        lines,
    }
}
