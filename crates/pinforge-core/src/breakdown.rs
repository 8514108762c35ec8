//! # Breakdown Aggregator
//!
//! Composes the resolver, the fee calculators and the mold fee engine into
//! one itemized [`PriceBreakdown`].
//!
//! ## Orchestration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderSelections                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_unit_price ──► base = unit × qty      (Err ──► zeroed result) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  setup fee ─► plating ─► backing (pins) ─► packaging                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calculate_mold_fee (never fails)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rush fee = 20% × (everything above, mold fee included)   if rush      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = Σ components                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregator never returns an error. Anything that goes wrong is
//! logged and turned into [`PriceBreakdown::zeroed`], which the UI renders
//! as "no price yet".

use tracing::error;

use crate::error::PricingResult;
use crate::fees::{
    calculate_backing_cost, calculate_packaging_cost, calculate_plating_cost, calculate_rush_fee,
    calculate_setup_fee,
};
use crate::mold_fee::{calculate_mold_fee, MoldFeeConfig};
use crate::resolver::resolve_unit_price;
use crate::types::{OrderSelections, PriceBreakdown};

/// Computes the breakdown using the selection's product line rules.
///
/// ## Example
/// ```rust
/// use pinforge_core::breakdown::calculate_price_breakdown;
/// use pinforge_core::catalog::Catalog;
/// use pinforge_core::{OrderSelections, ProductLine};
///
/// let pins = Catalog::builtin(ProductLine::Pins).unwrap();
/// let selections = OrderSelections {
///     product_line: ProductLine::Pins,
///     method: pins.find_method("die-struck").unwrap().clone(),
///     plating: Some(pins.find_plating("polished-gold").unwrap().clone()),
///     size: "1.00".to_string(),
///     quantity: 100,
///     backing: Some(pins.find_backing("butterfly").unwrap().clone()),
///     packaging: Some(pins.find_packaging("poly-bag").unwrap().clone()),
///     rush_order: false,
///     design_sides: None,
/// };
///
/// let breakdown = calculate_price_breakdown(&selections);
/// assert!((breakdown.total - 311.0).abs() < 1e-9);
/// ```
pub fn calculate_price_breakdown(selections: &OrderSelections) -> PriceBreakdown {
    let config = MoldFeeConfig::for_line(selections.product_line);
    calculate_price_breakdown_with(selections, &config)
}

/// Computes the breakdown with explicit mold fee rules.
///
/// Used when the catalog overrides the rules or the boundary policy is
/// configured.
pub fn calculate_price_breakdown_with(
    selections: &OrderSelections,
    mold_fee_config: &MoldFeeConfig,
) -> PriceBreakdown {
    match try_calculate_price_breakdown(selections, mold_fee_config) {
        Ok(breakdown) => breakdown,
        Err(err) => {
            error!(
                method = %selections.method.id,
                size = %selections.size,
                quantity = selections.quantity,
                error = %err,
                "Price calculation failed, returning zeroed breakdown"
            );
            PriceBreakdown::zeroed()
        }
    }
}

fn try_calculate_price_breakdown(
    selections: &OrderSelections,
    mold_fee_config: &MoldFeeConfig,
) -> PricingResult<PriceBreakdown> {
    let quantity = selections.quantity;

    let unit_price = resolve_unit_price(&selections.method, &selections.size, quantity)?;
    let base_price = unit_price * quantity as f64;

    let setup_fee = calculate_setup_fee(&selections.method);
    let plating_cost = calculate_plating_cost(selections.plating.as_ref(), quantity);
    let backing_cost = if selections.product_line.has_backing() {
        calculate_backing_cost(selections.backing.as_ref(), quantity)
    } else {
        0.0
    };
    let packaging_cost = calculate_packaging_cost(selections.packaging.as_ref(), quantity);

    let sides = if selections.product_line.has_design_sides() {
        selections.design_sides
    } else {
        None
    };
    let mold = calculate_mold_fee(&selections.size, quantity, sides, mold_fee_config);
    let mold_fee = if mold.waived { 0.0 } else { mold.fee };

    let rush_fee = if selections.rush_order {
        calculate_rush_fee(
            base_price,
            setup_fee,
            plating_cost,
            backing_cost,
            packaging_cost,
            mold_fee,
        )
    } else {
        0.0
    };

    let mut breakdown = PriceBreakdown {
        base_price,
        setup_fee,
        plating_cost,
        backing_cost,
        packaging_cost,
        mold_fee,
        mold_fee_waived: mold.waived,
        rush_fee,
        unit_price,
        total: 0.0,
    };
    breakdown.total = breakdown.component_sum();

    Ok(breakdown)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::mold_fee::ExemptionBoundary;
    use crate::types::{DesignSides, ProductLine};
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn pin_selections(method: &str, size: &str, quantity: i64) -> OrderSelections {
        let pins = Catalog::builtin(ProductLine::Pins).unwrap();
        OrderSelections {
            product_line: ProductLine::Pins,
            method: pins.find_method(method).unwrap().clone(),
            plating: Some(pins.find_plating("polished-gold").unwrap().clone()),
            size: size.to_string(),
            quantity,
            backing: Some(pins.find_backing("butterfly").unwrap().clone()),
            packaging: Some(pins.find_packaging("poly-bag").unwrap().clone()),
            rush_order: false,
            design_sides: None,
        }
    }

    fn coin_selections(size: &str, quantity: i64, sides: DesignSides) -> OrderSelections {
        let coins = Catalog::builtin(ProductLine::Coins).unwrap();
        OrderSelections {
            product_line: ProductLine::Coins,
            method: coins.find_method("soft-enamel").unwrap().clone(),
            plating: Some(coins.find_plating("antique-silver").unwrap().clone()),
            size: size.to_string(),
            quantity,
            backing: None,
            packaging: Some(coins.find_packaging("coin-capsule").unwrap().clone()),
            rush_order: false,
            design_sides: Some(sides),
        }
    }

    #[test]
    fn test_die_struck_one_inch_hundred_pieces() {
        let b = calculate_price_breakdown(&pin_selections("die-struck", "1.00", 100));

        assert_eq!(b.unit_price, 2.61);
        assert!((b.base_price - 261.0).abs() < EPS);
        assert_eq!(b.setup_fee, 0.0);
        assert_eq!(b.plating_cost, 0.0);
        assert_eq!(b.backing_cost, 0.0);
        assert_eq!(b.packaging_cost, 0.0);
        assert_eq!(b.mold_fee, 50.0);
        assert!(!b.mold_fee_waived);
        assert_eq!(b.rush_fee, 0.0);
        assert!((b.total - 311.0).abs() < EPS);
    }

    #[test]
    fn test_high_volume_waives_mold_fee() {
        let b = calculate_price_breakdown(&pin_selections("die-struck", "1.00", 1000));
        assert_eq!(b.mold_fee, 0.0);
        assert!(b.mold_fee_waived);
        assert!((b.total - 1090.0).abs() < EPS);
    }

    #[test]
    fn test_rush_includes_mold_fee() {
        let mut selections = pin_selections("die-struck", "1.00", 100);
        selections.rush_order = true;

        let b = calculate_price_breakdown(&selections);
        assert!((b.rush_fee - 62.2).abs() < EPS);
        assert!((b.total - 373.2).abs() < EPS);
    }

    #[test]
    fn test_offset_printed_with_every_add_on_and_rush() {
        let pins = Catalog::builtin(ProductLine::Pins).unwrap();
        let mut selections = pin_selections("offset-printed", "1.25", 500);
        selections.plating = Some(pins.find_plating("antique-gold").unwrap().clone());
        selections.backing = Some(pins.find_backing("magnetic").unwrap().clone());
        selections.packaging = Some(pins.find_packaging("velvet-bag").unwrap().clone());
        selections.rush_order = true;

        let b = calculate_price_breakdown(&selections);

        assert_eq!(b.setup_fee, 100.0);
        assert!((b.base_price - 605.0).abs() < EPS);
        assert!((b.plating_cost - 300.0).abs() < EPS);
        assert!((b.backing_cost - 175.0).abs() < EPS);
        assert!((b.packaging_cost - 300.0).abs() < EPS);
        // 500 pieces meets the pin exemption threshold
        assert!(b.mold_fee_waived);

        let subtotal = b.base_price + b.setup_fee + b.plating_cost + b.backing_cost
            + b.packaging_cost + b.mold_fee;
        assert!((b.rush_fee - 0.20 * subtotal).abs() < EPS);
        assert_eq!(b.total, b.component_sum());
    }

    #[test]
    fn test_exclusive_boundary_charges_exactly_five_hundred() {
        let config = MoldFeeConfig::pins().with_boundary(ExemptionBoundary::Exclusive);
        let b = calculate_price_breakdown_with(&pin_selections("die-struck", "1.75", 500), &config);
        assert_eq!(b.mold_fee, 62.5);
        assert!(!b.mold_fee_waived);
    }

    #[test]
    fn test_interpolated_quantity() {
        let b = calculate_price_breakdown(&pin_selections("die-struck", "1.00", 150));
        assert!((b.unit_price - 2.345).abs() < EPS);
        assert!((b.base_price - 351.75).abs() < EPS);
        assert_eq!(b.mold_fee, 50.0);
    }

    #[test]
    fn test_unknown_size_returns_zeroed() {
        let b = calculate_price_breakdown(&pin_selections("die-struck", "5.00", 100));
        assert!(b.is_zeroed());
    }

    #[test]
    fn test_invalid_quantity_returns_zeroed() {
        assert!(calculate_price_breakdown(&pin_selections("die-struck", "1.00", 0)).is_zeroed());
        assert!(calculate_price_breakdown(&pin_selections("die-struck", "1.00", -20)).is_zeroed());
    }

    #[test]
    fn test_missing_add_ons_price_at_zero() {
        let mut selections = pin_selections("die-struck", "1.00", 100);
        selections.plating = None;
        selections.backing = None;
        selections.packaging = None;

        let b = calculate_price_breakdown(&selections);
        assert!((b.total - 311.0).abs() < EPS);
    }

    #[test]
    fn test_coin_two_sided_doubles_mold_fee() {
        let one = calculate_price_breakdown(&coin_selections("2.00", 100, DesignSides::OneSided));
        let two = calculate_price_breakdown(&coin_selections("2.00", 100, DesignSides::TwoSided));

        assert_eq!(one.mold_fee, 75.0);
        assert_eq!(two.mold_fee, 150.0);
        assert!((two.total - one.total - 75.0).abs() < EPS);
        assert_eq!(two.setup_fee, 0.0);
        assert_eq!(two.backing_cost, 0.0);
    }

    #[test]
    fn test_coin_backing_ignored() {
        let pins = Catalog::builtin(ProductLine::Pins).unwrap();
        let mut selections = coin_selections("2.00", 100, DesignSides::OneSided);
        selections.backing = Some(pins.find_backing("deluxe").unwrap().clone());

        assert_eq!(calculate_price_breakdown(&selections).backing_cost, 0.0);
    }

    #[test]
    fn test_coin_exemption_at_three_hundred() {
        let b = calculate_price_breakdown(&coin_selections("3.00", 300, DesignSides::TwoSided));
        assert!(b.mold_fee_waived);
        assert_eq!(b.mold_fee, 0.0);

        let b = calculate_price_breakdown(&coin_selections("3.00", 299, DesignSides::TwoSided));
        assert_eq!(b.mold_fee, 250.0);
    }

    #[test]
    fn test_pin_design_sides_ignored() {
        let mut selections = pin_selections("die-struck", "1.00", 100);
        selections.design_sides = Some(DesignSides::TwoSided);
        assert_eq!(calculate_price_breakdown(&selections).mold_fee, 50.0);
    }

    proptest! {
        /// The total is always the literal sum of its components.
        #[test]
        fn prop_total_equals_component_sum(
            method_idx in 0usize..5,
            size_idx in 0usize..6,
            quantity in 1i64..5000,
            rush in any::<bool>(),
        ) {
            let pins = Catalog::builtin(ProductLine::Pins).unwrap();
            let method = pins.methods[method_idx].id.clone();
            let size = pins.sizes[size_idx].clone();
            let mut selections = pin_selections(&method, &size, quantity);
            selections.rush_order = rush;

            let b = calculate_price_breakdown(&selections);
            prop_assert!(!b.is_zeroed());
            prop_assert_eq!(
                b.total,
                b.base_price + b.setup_fee + b.plating_cost + b.backing_cost
                    + b.packaging_cost + b.mold_fee + b.rush_fee
            );
            if b.mold_fee_waived {
                prop_assert_eq!(b.mold_fee, 0.0);
            }
        }

        /// Rush is exactly 20% of the pre-rush subtotal, mold fee included.
        #[test]
        fn prop_rush_is_twenty_percent(quantity in 1i64..3000, size_idx in 0usize..7) {
            let coins = Catalog::builtin(ProductLine::Coins).unwrap();
            let mut selections = coin_selections(&coins.sizes[size_idx], quantity, DesignSides::TwoSided);
            selections.rush_order = true;

            let b = calculate_price_breakdown(&selections);
            let subtotal = b.base_price + b.setup_fee + b.plating_cost + b.backing_cost
                + b.packaging_cost + b.mold_fee;
            prop_assert!((b.rush_fee - 0.20 * subtotal).abs() < 1e-9);
        }
    }
}
