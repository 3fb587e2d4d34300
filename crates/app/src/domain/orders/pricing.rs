//! Order line pricing.

/// A line's total: unit price × quantity, discounted by the active promotion
/// percent when one applies. Integer math in minor units, truncating toward
/// zero.
#[must_use]
pub fn line_total(unit_price: u64, quantity: u32, promotion_percent: Option<u32>) -> u64 {
    let gross = unit_price * u64::from(quantity);

    match promotion_percent {
        Some(percent) => gross * u64::from(100 - percent.min(100)) / 100,
        None => gross,
    }
}
