//! # Line-Item Fee Calculators
//!
//! Pure, total functions for each line of the breakdown.
//!
//! Malformed option data never fails the quote: the offending line is
//! priced at 0 and a warning is logged.

use tracing::warn;

use crate::types::{AddOnOption, ProductionMethod};

/// Rush surcharge rate applied to the full subtotal, mold fee included.
pub const RUSH_FEE_RATE: f64 = 0.20;

fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Flat setup fee of a method; 0 when absent, negative, or non-finite.
pub fn calculate_setup_fee(method: &ProductionMethod) -> f64 {
    match method.setup_fee {
        None => 0.0,
        Some(fee) if is_valid_amount(fee) => fee,
        Some(fee) => {
            warn!(method = %method.id, setup_fee = fee, "Ignoring invalid setup fee");
            0.0
        }
    }
}

/// `price × quantity` for a plating, backing or packaging option.
///
/// Returns 0 when the option is missing, its price is negative or
/// non-finite, or the quantity is not positive. Free options yield 0
/// naturally.
///
/// ## Example
/// ```rust
/// use pinforge_core::fees::calculate_add_on_cost;
/// use pinforge_core::AddOnOption;
///
/// let case = AddOnOption::new("acrylic-case", "Acrylic Case", 1.00);
/// assert_eq!(calculate_add_on_cost(Some(&case), 100), 100.0);
/// assert_eq!(calculate_add_on_cost(None, 100), 0.0);
/// ```
pub fn calculate_add_on_cost(option: Option<&AddOnOption>, quantity: i64) -> f64 {
    let Some(option) = option else {
        warn!(quantity, "Add-on option missing, pricing line at 0");
        return 0.0;
    };

    if !is_valid_amount(option.price) {
        warn!(option = %option.id, price = option.price, "Ignoring add-on with invalid price");
        return 0.0;
    }
    if quantity < 1 {
        warn!(option = %option.id, quantity, "Ignoring add-on for non-positive quantity");
        return 0.0;
    }

    option.price * quantity as f64
}

/// Plating cost line.
pub fn calculate_plating_cost(plating: Option<&AddOnOption>, quantity: i64) -> f64 {
    calculate_add_on_cost(plating, quantity)
}

/// Backing cost line (pins only).
pub fn calculate_backing_cost(backing: Option<&AddOnOption>, quantity: i64) -> f64 {
    calculate_add_on_cost(backing, quantity)
}

/// Packaging cost line.
pub fn calculate_packaging_cost(packaging: Option<&AddOnOption>, quantity: i64) -> f64 {
    calculate_add_on_cost(packaging, quantity)
}

/// 20% of the subtotal including the mold fee.
///
/// All-or-nothing: a single negative or non-finite component makes the
/// whole rush fee 0.
pub fn calculate_rush_fee(
    base_price: f64,
    setup_fee: f64,
    plating_cost: f64,
    backing_cost: f64,
    packaging_cost: f64,
    mold_fee: f64,
) -> f64 {
    let components = [
        base_price,
        setup_fee,
        plating_cost,
        backing_cost,
        packaging_cost,
        mold_fee,
    ];

    if !components.iter().all(|&c| is_valid_amount(c)) {
        warn!(?components, "Invalid subtotal component, rush fee set to 0");
        return 0.0;
    }

    RUSH_FEE_RATE * components.iter().sum::<f64>()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn method(setup_fee: Option<f64>) -> ProductionMethod {
        ProductionMethod {
            id: "offset-printed".to_string(),
            name: "Offset Printed".to_string(),
            setup_fee,
            pricing: BTreeMap::new(),
        }
    }

    #[rstest]
    #[case(Some(100.0), 100.0)]
    #[case(Some(0.0), 0.0)]
    #[case(None, 0.0)]
    #[case(Some(-100.0), 0.0)]
    #[case(Some(f64::NAN), 0.0)]
    #[case(Some(f64::INFINITY), 0.0)]
    fn test_setup_fee(#[case] fee: Option<f64>, #[case] expected: f64) {
        assert_eq!(calculate_setup_fee(&method(fee)), expected);
    }

    #[test]
    fn test_add_on_cost() {
        let velvet = AddOnOption::new("velvet-bag", "Velvet Bag", 0.60);
        assert!((calculate_packaging_cost(Some(&velvet), 500) - 300.0).abs() < 1e-9);

        let military = AddOnOption::new("military", "Military Clutch", 0.25);
        assert_eq!(calculate_backing_cost(Some(&military), 100), 25.0);
    }

    #[test]
    fn test_free_option_costs_nothing() {
        let gold = AddOnOption::new("polished-gold", "Polished Gold", 0.0);
        assert_eq!(calculate_plating_cost(Some(&gold), 2000), 0.0);
    }

    #[test]
    fn test_price_multiplied_even_when_flag_disagrees() {
        let mislabeled = AddOnOption {
            id: "antique-gold".to_string(),
            name: "Antique Gold".to_string(),
            price: 0.60,
            is_free: true,
        };
        assert!((calculate_plating_cost(Some(&mislabeled), 100) - 60.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(-0.5, 100)]
    #[case(f64::NAN, 100)]
    #[case(f64::INFINITY, 100)]
    #[case(0.5, 0)]
    #[case(0.5, -10)]
    fn test_invalid_add_on_inputs_cost_zero(#[case] price: f64, #[case] quantity: i64) {
        let option = AddOnOption {
            id: "broken".to_string(),
            name: "Broken".to_string(),
            price,
            is_free: false,
        };
        assert_eq!(calculate_add_on_cost(Some(&option), quantity), 0.0);
    }

    #[test]
    fn test_missing_add_on_costs_zero() {
        assert_eq!(calculate_add_on_cost(None, 100), 0.0);
    }

    #[test]
    fn test_rush_fee_is_twenty_percent_of_subtotal() {
        assert_eq!(calculate_rush_fee(250.0, 100.0, 0.0, 35.0, 125.0, 0.0), 102.0);
        assert!((calculate_rush_fee(261.0, 0.0, 0.0, 0.0, 0.0, 50.0) - 62.2).abs() < 1e-9);
    }

    #[rstest]
    #[case([-1.0, 0.0, 0.0, 0.0, 0.0, 0.0])]
    #[case([100.0, f64::NAN, 0.0, 0.0, 0.0, 0.0])]
    #[case([100.0, 0.0, 0.0, 0.0, 0.0, f64::INFINITY])]
    fn test_rush_fee_all_or_nothing(#[case] c: [f64; 6]) {
        assert_eq!(calculate_rush_fee(c[0], c[1], c[2], c[3], c[4], c[5]), 0.0);
    }
}
