//! Cart Models

/// Cart Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: i64,
    pub username: String,
    pub status: CartStatus,
    pub lines: Vec<CartLine>,
}

/// One (cart, variant) pairing with a quantity. Price and parent product
/// come from the variant join and are read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub variant_id: i64,
    pub quantity: u32,
    pub unit_price: u64,
    pub product_id: i64,
}

/// Cart lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    Active,
    CheckedOut,
}

impl CartStatus {
    #[must_use]
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Active => 1,
            Self::CheckedOut => 2,
        }
    }

    #[must_use]
    pub fn parse(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Active),
            2 => Some(Self::CheckedOut),
            _ => None,
        }
    }
}

/// Composite key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartLineKey {
    pub cart_id: i64,
    pub variant_id: i64,
}
