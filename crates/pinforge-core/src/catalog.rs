//! # Pricing Catalog
//!
//! The static tables the engine consumes: tier matrices, add-on lists, the
//! canonical size and quantity sets, and the product line's mold fee rules.
//!
//! ## Data Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  data/pins.json  ──┐                                                    │
//! │                    ├── include_str! ──► Catalog::builtin(line)          │
//! │  data/coins.json ──┘                                                    │
//! │                                                                         │
//! │  any JSON string ────────────────────► Catalog::from_json(text)         │
//! │  (the CLI reads override files and hands the text in here)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog is immutable once loaded. Run
//! [`validate_catalog`](crate::validation::validate_catalog) after loading.

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, PricingError, PricingResult};
use crate::mold_fee::MoldFeeConfig;
use crate::types::{AddOnOption, ProductLine, ProductionMethod};

const PINS_JSON: &str = include_str!("../data/pins.json");
const COINS_JSON: &str = include_str!("../data/coins.json");

/// All pricing data for one product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub product_line: ProductLine,

    /// Canonical sizes every method must price.
    pub sizes: Vec<String>,

    /// Canonical quantity tiers every size must price.
    pub quantities: Vec<u32>,

    /// Production methods (pins) or color options (coins).
    pub methods: Vec<ProductionMethod>,

    pub plating_options: Vec<AddOnOption>,

    /// Empty for product lines without backing.
    #[serde(default)]
    pub backing_options: Vec<AddOnOption>,

    pub packaging_options: Vec<AddOnOption>,

    /// Overrides the product line's built-in mold fee rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mold_fee: Option<MoldFeeConfig>,
}

impl Catalog {
    /// Parses the catalog embedded in the crate for `line`.
    ///
    /// ## Example
    /// ```rust
    /// use pinforge_core::catalog::Catalog;
    /// use pinforge_core::ProductLine;
    ///
    /// let pins = Catalog::builtin(ProductLine::Pins).unwrap();
    /// assert_eq!(pins.methods.len(), 5);
    /// assert_eq!(pins.quantities, vec![100, 200, 300, 500, 750, 1000, 2000]);
    /// ```
    pub fn builtin(line: ProductLine) -> CoreResult<Self> {
        let text = match line {
            ProductLine::Pins => PINS_JSON,
            ProductLine::Coins => COINS_JSON,
        };
        Self::from_json(text)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Effective mold fee rules: the override if present, else the line's.
    pub fn mold_fee_config(&self) -> MoldFeeConfig {
        self.mold_fee
            .clone()
            .unwrap_or_else(|| MoldFeeConfig::for_line(self.product_line))
    }

    pub fn find_method(&self, id: &str) -> PricingResult<&ProductionMethod> {
        self.methods
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| unknown("production method", id))
    }

    pub fn find_plating(&self, id: &str) -> PricingResult<&AddOnOption> {
        find_option(&self.plating_options, "plating", id)
    }

    pub fn find_backing(&self, id: &str) -> PricingResult<&AddOnOption> {
        find_option(&self.backing_options, "backing", id)
    }

    pub fn find_packaging(&self, id: &str) -> PricingResult<&AddOnOption> {
        find_option(&self.packaging_options, "packaging", id)
    }
}

fn unknown(kind: &str, id: &str) -> PricingError {
    PricingError::UnknownOption {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}

fn find_option<'a>(options: &'a [AddOnOption], kind: &str, id: &str) -> PricingResult<&'a AddOnOption> {
    options
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| unknown(kind, id))
}

/// The first free option of a list, or the first option if none is free.
///
/// Used as the default when a caller does not choose an add-on.
pub fn default_option(options: &[AddOnOption]) -> Option<&AddOnOption> {
    options.iter().find(|o| o.is_free).or_else(|| options.first())
}

/// Size labels a method has tier tables for, in ascending order.
pub fn available_sizes(method: &ProductionMethod) -> Vec<&str> {
    method.pricing.keys().map(String::as_str).collect()
}

/// Tabulated quantity tiers for a method and size, ascending.
///
/// Empty when the size is unknown. Any positive quantity can still be
/// quoted; these are the points that are not interpolated.
pub fn available_quantities(method: &ProductionMethod, size: &str) -> Vec<u32> {
    method
        .pricing
        .get(size)
        .map(|tiers| tiers.keys().copied().collect())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pins() {
        let pins = Catalog::builtin(ProductLine::Pins).unwrap();
        assert_eq!(pins.product_line, ProductLine::Pins);
        assert_eq!(pins.plating_options.len(), 10);
        assert_eq!(pins.backing_options.len(), 9);
        assert_eq!(pins.packaging_options.len(), 4);

        let offset = pins.find_method("offset-printed").unwrap();
        assert_eq!(offset.setup_fee, Some(100.0));
        assert_eq!(offset.pricing["1.25"][&500], 1.21);
    }

    #[test]
    fn test_builtin_coins() {
        let coins = Catalog::builtin(ProductLine::Coins).unwrap();
        assert_eq!(coins.product_line, ProductLine::Coins);
        assert!(coins.backing_options.is_empty());
        assert!(coins.methods.iter().all(|m| m.setup_fee.is_none()));
        assert_eq!(coins.mold_fee_config(), MoldFeeConfig::coins());
    }

    #[test]
    fn test_lookups() {
        let pins = Catalog::builtin(ProductLine::Pins).unwrap();
        assert_eq!(pins.find_plating("antique-gold").unwrap().price, 0.60);
        assert_eq!(pins.find_backing("magnetic").unwrap().price, 0.35);
        assert_eq!(pins.find_packaging("velvet-case").unwrap().price, 4.00);

        let err = pins.find_method("cloisonne").unwrap_err();
        assert_eq!(err.to_string(), "Unknown production method option \"cloisonne\"");
    }

    #[test]
    fn test_default_option_prefers_free() {
        let options = vec![
            AddOnOption::new("velvet-bag", "Velvet Bag", 0.60),
            AddOnOption::new("poly-bag", "Poly Bag", 0.0),
        ];
        assert_eq!(default_option(&options).unwrap().id, "poly-bag");
        assert!(default_option(&[]).is_none());
    }

    #[test]
    fn test_available_sizes_and_quantities() {
        let pins = Catalog::builtin(ProductLine::Pins).unwrap();
        let method = pins.find_method("die-struck").unwrap();

        assert_eq!(
            available_sizes(method),
            vec!["0.75", "1.00", "1.25", "1.50", "1.75", "2.00"]
        );
        assert_eq!(
            available_quantities(method, "1.00"),
            vec![100, 200, 300, 500, 750, 1000, 2000]
        );
        assert!(available_quantities(method, "3.00").is_empty());
    }

    #[test]
    fn test_mold_fee_override() {
        let mut pins = Catalog::builtin(ProductLine::Pins).unwrap();
        let mut custom = MoldFeeConfig::pins();
        custom.quantity_exemption_threshold = 1000;
        pins.mold_fee = Some(custom.clone());
        assert_eq!(pins.mold_fee_config(), custom);
    }

    #[test]
    fn test_malformed_json_is_catalog_error() {
        let err = Catalog::from_json("{\"productLine\": \"pins\"").unwrap_err();
        assert!(matches!(err, crate::error::CoreError::Catalog(_)));
    }
}
