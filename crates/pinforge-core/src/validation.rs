//! # Validation Module
//!
//! Integrity checks for pricing catalogs and completeness checks for order
//! selections.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Startup (once per catalog)                                            │
//! │  ├── validate_pricing_data   - tier grid + add-on lists                │
//! │  ├── validate_mold_fee_config - threshold table shape                  │
//! │  └── validate_catalog        - both, per product line                  │
//! │           │                                                             │
//! │           ▼  diagnostics for logging / alerting, never thrown          │
//! │                                                                         │
//! │  Per interaction                                                       │
//! │  └── validate_order_selections - is the wizard complete?               │
//! │                                                                         │
//! │  The calculation itself never depends on either: it degrades instead. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog diagnostics are human-readable strings with stable wording so
//! that alerts can match on them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::mold_fee::MoldFeeConfig;
use crate::types::{AddOnOption, DesignSides, OrderSelections, ProductLine, ProductionMethod};

// =============================================================================
// Catalog Validation
// =============================================================================

/// Outcome of a catalog check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingDataValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl PricingDataValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        PricingDataValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// The size × quantity grid every method must fully price.
#[derive(Debug, Clone, Copy)]
pub struct TierGrid<'a> {
    pub sizes: &'a [String],
    pub quantities: &'a [u32],
}

impl<'a> From<&'a Catalog> for TierGrid<'a> {
    fn from(catalog: &'a Catalog) -> Self {
        TierGrid {
            sizes: &catalog.sizes,
            quantities: &catalog.quantities,
        }
    }
}

/// Checks that methods and add-on lists are complete and well-formed.
///
/// ## Rules
/// - The canonical size and quantity lists are non-empty
/// - Every list is non-empty
/// - Every method prices every size and quantity of `grid` with a positive,
///   finite price, and has at least two tiers per size
/// - Setup fees, when present, are finite and non-negative
/// - Add-on prices are finite and non-negative, and `is_free` agrees with
///   `price == 0`
///
/// ## Example
/// ```rust
/// use pinforge_core::catalog::Catalog;
/// use pinforge_core::validation::{validate_pricing_data, TierGrid};
/// use pinforge_core::ProductLine;
///
/// let pins = Catalog::builtin(ProductLine::Pins).unwrap();
/// let report = validate_pricing_data(
///     &pins.methods,
///     &pins.plating_options,
///     &pins.backing_options,
///     &pins.packaging_options,
///     TierGrid::from(&pins),
/// );
/// assert!(report.is_valid);
///
/// let report = validate_pricing_data(&pins.methods, &[], &[], &[], TierGrid::from(&pins));
/// assert!(report.errors.contains(&"Plating options list is empty".to_string()));
/// ```
pub fn validate_pricing_data(
    methods: &[ProductionMethod],
    plating_options: &[AddOnOption],
    backing_options: &[AddOnOption],
    packaging_options: &[AddOnOption],
    grid: TierGrid<'_>,
) -> PricingDataValidation {
    let mut errors = Vec::new();
    check_grid(grid, &mut errors);
    check_methods(methods, grid, &mut errors);
    check_options("Plating", plating_options, &mut errors);
    check_options("Backing", backing_options, &mut errors);
    check_options("Packaging", packaging_options, &mut errors);
    PricingDataValidation::from_errors(errors)
}

/// Validates a whole catalog, including its effective mold fee rules.
///
/// Backing options are only required for product lines that have backing.
pub fn validate_catalog(catalog: &Catalog) -> PricingDataValidation {
    let grid = TierGrid::from(catalog);
    let mut errors = Vec::new();

    check_grid(grid, &mut errors);
    check_methods(&catalog.methods, grid, &mut errors);
    check_options("Plating", &catalog.plating_options, &mut errors);
    if catalog.product_line.has_backing() {
        check_options("Backing", &catalog.backing_options, &mut errors);
    }
    check_options("Packaging", &catalog.packaging_options, &mut errors);
    errors.extend(validate_mold_fee_config(&catalog.mold_fee_config()));

    PricingDataValidation::from_errors(errors)
}

fn check_grid(grid: TierGrid<'_>, errors: &mut Vec<String>) {
    if grid.sizes.is_empty() {
        errors.push("Canonical size list is empty".to_string());
    }
    if grid.quantities.is_empty() {
        errors.push("Canonical quantity list is empty".to_string());
    }
}

fn check_methods(methods: &[ProductionMethod], grid: TierGrid<'_>, errors: &mut Vec<String>) {
    if methods.is_empty() {
        errors.push("Production methods list is empty".to_string());
        return;
    }

    for (index, method) in methods.iter().enumerate() {
        if method.id.trim().is_empty() || method.name.trim().is_empty() {
            errors.push(format!(
                "Production method at index {} has an empty id or name",
                index
            ));
        }

        let id = &method.id;

        if let Some(fee) = method.setup_fee {
            if !fee.is_finite() || fee < 0.0 {
                errors.push(format!("Production method '{}' has invalid setup fee {}", id, fee));
            }
        }

        for size in grid.sizes {
            let Some(tiers) = method.pricing.get(size) else {
                errors.push(format!("Production method '{}' is missing size {}", id, size));
                continue;
            };

            for quantity in grid.quantities {
                match tiers.get(quantity) {
                    None => errors.push(format!(
                        "Production method '{}' is missing quantity {} for size {}",
                        id, quantity, size
                    )),
                    Some(&price) if !price.is_finite() || price <= 0.0 => errors.push(format!(
                        "Production method '{}' has invalid price {} for size {} at quantity {}",
                        id, price, size, quantity
                    )),
                    Some(_) => {}
                }
            }
        }

        // Non-canonical sizes still need enough tiers to interpolate.
        for (size, tiers) in &method.pricing {
            if tiers.len() < 2 {
                errors.push(format!(
                    "Production method '{}' has fewer than two quantity tiers for size {}",
                    id, size
                ));
            }
        }
    }
}

fn check_options(kind: &str, options: &[AddOnOption], errors: &mut Vec<String>) {
    if options.is_empty() {
        errors.push(format!("{} options list is empty", kind));
        return;
    }

    for (index, option) in options.iter().enumerate() {
        if option.id.trim().is_empty() || option.name.trim().is_empty() {
            errors.push(format!("{} option at index {} has an empty id or name", kind, index));
        }
        if !option.price.is_finite() || option.price < 0.0 {
            errors.push(format!(
                "{} option '{}' has invalid price {}",
                kind, option.id, option.price
            ));
        } else if option.is_free != (option.price == 0.0) {
            errors.push(format!(
                "{} option '{}' has isFree={} but price {}",
                kind, option.id, option.is_free, option.price
            ));
        }
    }
}

/// Checks that a mold fee table is a well-formed step function.
///
/// Returns an empty list when the table is usable.
pub fn validate_mold_fee_config(config: &MoldFeeConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.thresholds.is_empty() {
        errors.push("Mold fee thresholds are empty".to_string());
    }

    let last = config.thresholds.len().saturating_sub(1);
    let mut previous: Option<(f64, f64)> = None;

    for (index, threshold) in config.thresholds.iter().enumerate() {
        if !threshold.fee.is_finite() || threshold.fee < 0.0 {
            errors.push(format!(
                "Mold fee threshold {} has invalid fee {}",
                index, threshold.fee
            ));
        }

        match threshold.max_size {
            None if index != last => errors.push(format!(
                "Mold fee threshold {} is unbounded but not last",
                index
            )),
            Some(max) if !max.is_finite() || max <= 0.0 => errors.push(format!(
                "Mold fee threshold {} has invalid max size {}",
                index, max
            )),
            _ => {}
        }

        let max_size = threshold.max_size.unwrap_or(f64::INFINITY);
        if let Some((prev_size, prev_fee)) = previous {
            if max_size <= prev_size {
                errors.push(format!(
                    "Mold fee thresholds are not in ascending size order at index {}",
                    index
                ));
            }
            if threshold.fee < prev_fee {
                errors.push(format!("Mold fee decreases at threshold {}", index));
            }
        }
        previous = Some((max_size, threshold.fee));
    }

    if config.quantity_exemption_threshold < 1 {
        errors.push("Mold fee quantity exemption threshold must be positive".to_string());
    }

    if let Some(multiplier) = config.two_sided_multiplier {
        if !multiplier.is_finite() || multiplier < 1.0 {
            errors.push(format!("Two-sided multiplier {} must be at least 1", multiplier));
        }
    }

    errors
}

// =============================================================================
// Order Selection Validation
// =============================================================================

/// Selections as the wizard holds them: anything may still be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PartialSelections {
    #[serde(default)]
    pub product_line: ProductLine,
    pub method: Option<ProductionMethod>,
    pub plating: Option<AddOnOption>,
    pub size: Option<String>,
    pub quantity: Option<i64>,
    pub backing: Option<AddOnOption>,
    pub packaging: Option<AddOnOption>,
    #[serde(default)]
    pub rush_order: bool,
    pub design_sides: Option<DesignSides>,
}

/// Lists everything that keeps `selections` from being quotable.
///
/// Quantities need not be tabulated: any positive whole number is accepted
/// and interpolated. Sizes must exist in the chosen method's tier matrix.
pub fn validate_order_selections(
    selections: &PartialSelections,
    catalog: &Catalog,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let required = |field: &str| ValidationError::Required {
        field: field.to_string(),
    };

    match &selections.method {
        None => errors.push(required("Production method")),
        Some(method) => {
            let mut method_errors = Vec::new();
            check_methods(std::slice::from_ref(method), TierGrid::from(catalog), &mut method_errors);
            if !method_errors.is_empty() {
                errors.push(ValidationError::InvalidFormat {
                    field: "Production method".to_string(),
                    reason: "pricing data is incomplete".to_string(),
                });
            }
        }
    }

    check_selected_option("Plating type", selections.plating.as_ref(), &mut errors);

    match (&selections.size, &selections.method) {
        (None, _) => errors.push(required("Size selection")),
        (Some(size), Some(method)) if !method.pricing.contains_key(size) => {
            errors.push(ValidationError::NotAllowed {
                field: "Size selection".to_string(),
                allowed: method.pricing.keys().cloned().collect(),
            })
        }
        _ => {}
    }

    match selections.quantity {
        None => errors.push(required("Quantity selection")),
        Some(quantity) if quantity < 1 => errors.push(ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        }),
        Some(_) => {}
    }

    if selections.product_line.has_backing() {
        check_selected_option("Backing option", selections.backing.as_ref(), &mut errors);
    }

    check_selected_option("Packaging option", selections.packaging.as_ref(), &mut errors);

    if selections.product_line.has_design_sides() && selections.design_sides.is_none() {
        errors.push(required("Design sides selection"));
    }

    errors
}

fn check_selected_option(field: &str, option: Option<&AddOnOption>, errors: &mut Vec<ValidationError>) {
    match option {
        None => errors.push(ValidationError::Required {
            field: field.to_string(),
        }),
        Some(option) if !option.price.is_finite() || option.price < 0.0 => {
            errors.push(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "price must be a non-negative number".to_string(),
            })
        }
        Some(_) => {}
    }
}

/// Whether the selections are complete and valid.
pub fn is_order_complete(selections: &PartialSelections, catalog: &Catalog) -> bool {
    validate_order_selections(selections, catalog).is_empty()
}

impl PartialSelections {
    /// Promotes complete selections to [`OrderSelections`].
    ///
    /// Reports the first missing piece; use [`validate_order_selections`]
    /// for the full list.
    pub fn into_order(self) -> Result<OrderSelections, ValidationError> {
        let required = |field: &str| ValidationError::Required {
            field: field.to_string(),
        };

        Ok(OrderSelections {
            product_line: self.product_line,
            method: self.method.ok_or_else(|| required("Production method"))?,
            plating: self.plating,
            size: self.size.ok_or_else(|| required("Size selection"))?,
            quantity: self.quantity.ok_or_else(|| required("Quantity selection"))?,
            backing: self.backing,
            packaging: self.packaging,
            rush_order: self.rush_order,
            design_sides: self.design_sides,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mold_fee::MoldFeeThreshold;

    fn pins() -> Catalog {
        Catalog::builtin(ProductLine::Pins).unwrap()
    }

    fn coins() -> Catalog {
        Catalog::builtin(ProductLine::Coins).unwrap()
    }

    #[test]
    fn test_builtin_catalogs_are_valid() {
        let report = validate_catalog(&pins());
        assert!(report.is_valid, "{:?}", report.errors);

        let report = validate_catalog(&coins());
        assert!(report.is_valid, "{:?}", report.errors);
    }

    #[test]
    fn test_empty_lists_flagged() {
        let catalog = pins();
        let report = validate_pricing_data(&[], &[], &[], &[], TierGrid::from(&catalog));

        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec![
                "Production methods list is empty",
                "Plating options list is empty",
                "Backing options list is empty",
                "Packaging options list is empty",
            ]
        );
    }

    #[test]
    fn test_empty_canonical_grid_flagged() {
        let mut catalog = pins();
        catalog.sizes.clear();
        catalog.quantities.clear();

        let report = validate_catalog(&catalog);
        assert!(!report.is_valid);
        assert_eq!(
            report.errors,
            vec!["Canonical size list is empty", "Canonical quantity list is empty"]
        );

        let report = validate_pricing_data(
            &catalog.methods,
            &catalog.plating_options,
            &catalog.backing_options,
            &catalog.packaging_options,
            TierGrid::from(&catalog),
        );
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_missing_size_flagged() {
        let mut catalog = pins();
        catalog.methods[0].pricing.remove("1.50");

        let report = validate_catalog(&catalog);
        assert_eq!(
            report.errors,
            vec!["Production method 'die-struck' is missing size 1.50"]
        );
    }

    #[test]
    fn test_missing_quantity_flagged() {
        let mut catalog = pins();
        catalog.methods[1].pricing.get_mut("0.75").unwrap().remove(&750);

        let report = validate_catalog(&catalog);
        assert_eq!(
            report.errors,
            vec!["Production method 'soft-enamel' is missing quantity 750 for size 0.75"]
        );
    }

    #[test]
    fn test_negative_price_flagged() {
        let mut catalog = pins();
        catalog.methods[2]
            .pricing
            .get_mut("2.00")
            .unwrap()
            .insert(100, -2.99);

        let report = validate_catalog(&catalog);
        assert_eq!(
            report.errors,
            vec!["Production method 'silk-screen' has invalid price -2.99 for size 2.00 at quantity 100"]
        );
    }

    #[test]
    fn test_single_tier_size_flagged() {
        let mut catalog = pins();
        let mut lone = std::collections::BTreeMap::new();
        lone.insert(100, 3.0);
        catalog.methods[0].pricing.insert("2.50".to_string(), lone);

        let report = validate_catalog(&catalog);
        assert_eq!(
            report.errors,
            vec!["Production method 'die-struck' has fewer than two quantity tiers for size 2.50"]
        );
    }

    #[test]
    fn test_add_on_problems_flagged() {
        let mut catalog = pins();
        catalog.packaging_options[1].price = -1.0;
        catalog.backing_options[0].is_free = false;

        let report = validate_catalog(&catalog);
        assert_eq!(
            report.errors,
            vec![
                "Backing option 'butterfly' has isFree=false but price 0",
                "Packaging option 'acrylic-case' has invalid price -1",
            ]
        );
    }

    #[test]
    fn test_coins_do_not_require_backing() {
        let report = validate_catalog(&coins());
        assert!(!report.errors.iter().any(|e| e.contains("Backing")));
    }

    #[test]
    fn test_builtin_mold_fee_tables_are_valid() {
        assert!(validate_mold_fee_config(&MoldFeeConfig::pins()).is_empty());
        assert!(validate_mold_fee_config(&MoldFeeConfig::coins()).is_empty());
    }

    #[test]
    fn test_malformed_mold_fee_table_flagged() {
        let config = MoldFeeConfig {
            thresholds: vec![
                MoldFeeThreshold::above(75.0),
                MoldFeeThreshold::up_to(1.5, 50.0),
            ],
            quantity_exemption_threshold: 0,
            boundary: Default::default(),
            two_sided_multiplier: Some(0.5),
        };

        assert_eq!(
            validate_mold_fee_config(&config),
            vec![
                "Mold fee threshold 0 is unbounded but not last",
                "Mold fee thresholds are not in ascending size order at index 1",
                "Mold fee decreases at threshold 1",
                "Mold fee quantity exemption threshold must be positive",
                "Two-sided multiplier 0.5 must be at least 1",
            ]
        );
    }

    #[test]
    fn test_empty_mold_fee_table_flagged() {
        let config = MoldFeeConfig {
            thresholds: vec![],
            ..MoldFeeConfig::pins()
        };
        assert_eq!(validate_mold_fee_config(&config), vec!["Mold fee thresholds are empty"]);
    }

    fn complete_pin_selections(catalog: &Catalog) -> PartialSelections {
        PartialSelections {
            product_line: ProductLine::Pins,
            method: Some(catalog.methods[0].clone()),
            plating: Some(catalog.plating_options[0].clone()),
            size: Some("1.00".to_string()),
            quantity: Some(250),
            backing: Some(catalog.backing_options[0].clone()),
            packaging: Some(catalog.packaging_options[0].clone()),
            rush_order: false,
            design_sides: None,
        }
    }

    #[test]
    fn test_complete_selections_pass() {
        let catalog = pins();
        let selections = complete_pin_selections(&catalog);
        assert!(is_order_complete(&selections, &catalog));

        let order = selections.into_order().unwrap();
        assert_eq!(order.quantity, 250);
    }

    #[test]
    fn test_empty_selections_list_every_gap() {
        let messages: Vec<String> = validate_order_selections(&PartialSelections::default(), &pins())
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            messages,
            vec![
                "Production method is required",
                "Plating type is required",
                "Size selection is required",
                "Quantity selection is required",
                "Backing option is required",
                "Packaging option is required",
            ]
        );
    }

    #[test]
    fn test_coin_selections_need_design_sides_not_backing() {
        let catalog = coins();
        let selections = PartialSelections {
            product_line: ProductLine::Coins,
            method: Some(catalog.methods[0].clone()),
            plating: Some(catalog.plating_options[0].clone()),
            size: Some("2.00".to_string()),
            quantity: Some(100),
            backing: None,
            packaging: Some(catalog.packaging_options[0].clone()),
            rush_order: true,
            design_sides: None,
        };

        let errors = validate_order_selections(&selections, &catalog);
        assert_eq!(
            errors,
            vec![ValidationError::Required {
                field: "Design sides selection".to_string()
            }]
        );
    }

    #[test]
    fn test_bad_size_and_quantity() {
        let catalog = pins();
        let mut selections = complete_pin_selections(&catalog);
        selections.size = Some("3.00".to_string());
        selections.quantity = Some(0);

        let errors = validate_order_selections(&selections, &catalog);
        assert!(matches!(errors[0], ValidationError::NotAllowed { .. }));
        assert_eq!(errors[1].to_string(), "Quantity must be positive");
        assert!(!is_order_complete(&selections, &catalog));
    }

    #[test]
    fn test_into_order_reports_missing_field() {
        let err = PartialSelections::default().into_order().unwrap_err();
        assert_eq!(err.to_string(), "Production method is required");
    }
}
