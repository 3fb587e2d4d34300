//! Inventory Models

/// A single inbound or outbound stock movement for a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockMovement {
    pub variant_id: i64,
    pub direction: MovementDirection,
    pub status: MovementStatus,
    pub quantity: u32,
}

/// Direction of a stock movement relative to the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementDirection {
    Inbound,
    Outbound,
}

impl MovementDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }
}

/// Lifecycle status of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementStatus {
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

impl MovementStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_transit" => Some(Self::InTransit),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}
