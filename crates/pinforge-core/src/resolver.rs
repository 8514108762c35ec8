//! # Unit Price Resolver
//!
//! Resolves a per-piece price for a (method, size, quantity) triple.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tiers for size "1.00":  100 ── 200 ── 300 ── 500 ── ... ── 2000        │
//! │                                                                         │
//! │  qty = 200   ──► exact match, tabulated price                          │
//! │  qty = 50    ──► below smallest tier, clamp to price@100               │
//! │  qty = 5000  ──► above largest tier, clamp to price@2000               │
//! │  qty = 250   ──► between 200 and 300, linear interpolation             │
//! │                                                                         │
//! │  price = lower + (upper - lower) * (qty - lowerQty)/(upperQty-lowerQty)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No rounding is applied; callers get full `f64` precision.
//!
//! This is a primitive: bad input is returned as `Err`, and the caller
//! decides how to degrade.

use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::types::ProductionMethod;

/// Resolves the unit price for `quantity` pieces of `size`.
///
/// ## Errors
/// - [`PricingError::InvalidQuantity`] when `quantity < 1`
/// - [`PricingError::UnknownSize`] when the method has no table for `size`
/// - [`PricingError::EmptyTierTable`] when the table has no tiers
///
/// ## Example
/// ```rust
/// use pinforge_core::catalog::Catalog;
/// use pinforge_core::resolver::resolve_unit_price;
/// use pinforge_core::ProductLine;
///
/// let catalog = Catalog::builtin(ProductLine::Pins).unwrap();
/// let die_struck = catalog.find_method("die-struck").unwrap();
///
/// assert_eq!(resolve_unit_price(die_struck, "1.00", 100).unwrap(), 2.61);
/// assert!(resolve_unit_price(die_struck, "9.00", 100).is_err());
/// ```
pub fn resolve_unit_price(
    method: &ProductionMethod,
    size: &str,
    quantity: i64,
) -> PricingResult<f64> {
    if quantity < 1 {
        return Err(PricingError::InvalidQuantity(quantity));
    }

    let tiers = method
        .pricing
        .get(size)
        .ok_or_else(|| PricingError::UnknownSize {
            method: method.name.clone(),
            size: size.to_string(),
        })?;

    let empty = || PricingError::EmptyTierTable {
        method: method.name.clone(),
        size: size.to_string(),
    };

    // Quantities beyond u32 are far above any tier; clamp-high handles them.
    let qty = u32::try_from(quantity).unwrap_or(u32::MAX);

    if let Some(&price) = tiers.get(&qty) {
        return Ok(price);
    }

    let (&min_qty, &min_price) = tiers.first_key_value().ok_or_else(empty)?;
    let (&max_qty, &max_price) = tiers.last_key_value().ok_or_else(empty)?;

    if qty <= min_qty {
        return Ok(min_price);
    }
    if qty >= max_qty {
        return Ok(max_price);
    }

    // Strictly inside (min_qty, max_qty), so both neighbours exist.
    let (&lower_qty, &lower_price) = tiers.range(..qty).next_back().ok_or_else(empty)?;
    let (&upper_qty, &upper_price) = tiers.range(qty..).next().ok_or_else(empty)?;

    let ratio = f64::from(qty - lower_qty) / f64::from(upper_qty - lower_qty);
    let price = lower_price + (upper_price - lower_price) * ratio;

    debug!(
        method = %method.id,
        size,
        quantity,
        lower_qty,
        upper_qty,
        price,
        "Interpolated unit price"
    );

    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================
