//! # Mold Fee Engine
//!
//! Derives the one-time tooling fee from a size label and a quantity.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate_mold_fee(size, quantity, sides, config)                      │
//! │       │                                                                 │
//! │       ├── quantity < 1? ───────────────► error ──┐                      │
//! │       │                                          │                      │
//! │       ├── config.is_exempt(quantity)? ─► { 0, waived, "High volume" }   │
//! │       │                                          │                      │
//! │       ├── parse_size(size) fails? ─────► error ──┤                      │
//! │       │                                          │                      │
//! │       ├── fee_for_size(inches)                   │                      │
//! │       │                                          ▼                      │
//! │       ├── two-sided? ─► fee × multiplier   { 0, not waived,             │
//! │       │                                      "Error calculating ..." }  │
//! │       ▼                                                                 │
//! │  { fee, not waived }                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is parameterized by [`MoldFeeConfig`], one per product line,
//! and never returns an error: failures become a zero fee with a reason so
//! the UI can keep rendering.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::types::{DesignSides, MoldFeeCalculationResult, ProductLine};

// =============================================================================
// Constants
// =============================================================================

/// Smallest size (inches) accepted by [`parse_size`].
pub const MIN_SIZE_INCHES: f64 = 0.1;

/// Largest size (inches) accepted by [`parse_size`].
pub const MAX_SIZE_INCHES: f64 = 10.0;

/// Quantity at which pin mold fees are waived.
pub const PIN_EXEMPTION_THRESHOLD: i64 = 500;

/// Quantity at which coin mold fees are waived.
pub const COIN_EXEMPTION_THRESHOLD: i64 = 300;

/// Fee multiplier for two-sided coin designs.
pub const TWO_SIDED_MULTIPLIER: f64 = 2.0;

/// Reason attached to the fallback result.
pub const MOLD_FEE_ERROR_REASON: &str = "Error calculating mold fee";

// =============================================================================
// Configuration Types
// =============================================================================

/// One step of the size → fee table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MoldFeeThreshold {
    /// Inclusive upper bound in inches. `None` means unbounded (catch-all).
    pub max_size: Option<f64>,
    pub fee: f64,
}

impl MoldFeeThreshold {
    pub const fn up_to(max_size: f64, fee: f64) -> Self {
        MoldFeeThreshold {
            max_size: Some(max_size),
            fee,
        }
    }

    pub const fn above(fee: f64) -> Self {
        MoldFeeThreshold {
            max_size: None,
            fee,
        }
    }

    fn covers(&self, size_inches: f64) -> bool {
        self.max_size.map_or(true, |max| size_inches <= max)
    }
}

/// How the exemption threshold itself is treated.
///
/// Every exemption check goes through [`MoldFeeConfig::is_exempt`], so this
/// is the single switch for the boundary policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExemptionBoundary {
    /// `quantity >= threshold` is waived (500 pieces get a free mold).
    #[default]
    Inclusive,
    /// `quantity > threshold` is waived (500 pieces still pay).
    Exclusive,
}

/// Mold fee rules for one product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MoldFeeConfig {
    /// Ordered by ascending `max_size`; the last entry is the catch-all.
    pub thresholds: Vec<MoldFeeThreshold>,

    /// Quantity from which the fee is waived.
    pub quantity_exemption_threshold: i64,

    #[serde(default)]
    pub boundary: ExemptionBoundary,

    /// Applied to two-sided designs. `None` for lines without design sides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_sided_multiplier: Option<f64>,
}

impl MoldFeeConfig {
    /// Pin rules: $50 up to 1.5", $62.50 up to 1.75", $75 beyond.
    pub fn pins() -> Self {
        MoldFeeConfig {
            thresholds: vec![
                MoldFeeThreshold::up_to(1.5, 50.00),
                MoldFeeThreshold::up_to(1.75, 62.50),
                MoldFeeThreshold::up_to(2.0, 75.00),
                MoldFeeThreshold::above(75.00),
            ],
            quantity_exemption_threshold: PIN_EXEMPTION_THRESHOLD,
            boundary: ExemptionBoundary::default(),
            two_sided_multiplier: None,
        }
    }

    /// Coin rules: $12.50 steps from $50 at 1.5" up to $125 at 3" and above.
    pub fn coins() -> Self {
        MoldFeeConfig {
            thresholds: vec![
                MoldFeeThreshold::up_to(1.5, 50.00),
                MoldFeeThreshold::up_to(1.75, 62.50),
                MoldFeeThreshold::up_to(2.0, 75.00),
                MoldFeeThreshold::up_to(2.25, 87.50),
                MoldFeeThreshold::up_to(2.5, 100.00),
                MoldFeeThreshold::up_to(2.75, 112.50),
                MoldFeeThreshold::above(125.00),
            ],
            quantity_exemption_threshold: COIN_EXEMPTION_THRESHOLD,
            boundary: ExemptionBoundary::default(),
            two_sided_multiplier: Some(TWO_SIDED_MULTIPLIER),
        }
    }

    /// Built-in rules for a product line.
    pub fn for_line(line: ProductLine) -> Self {
        match line {
            ProductLine::Pins => Self::pins(),
            ProductLine::Coins => Self::coins(),
        }
    }

    /// Same rules with a different boundary policy.
    pub fn with_boundary(mut self, boundary: ExemptionBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Whether `quantity` qualifies for the high volume exemption.
    pub fn is_exempt(&self, quantity: i64) -> bool {
        match self.boundary {
            ExemptionBoundary::Inclusive => quantity >= self.quantity_exemption_threshold,
            ExemptionBoundary::Exclusive => quantity > self.quantity_exemption_threshold,
        }
    }

    /// Single-side fee for a parsed size.
    ///
    /// Scans for the first threshold covering the size; falls back to the
    /// last entry's fee when the table has no catch-all.
    pub fn fee_for_size(&self, size_inches: f64) -> PricingResult<f64> {
        if !size_inches.is_finite() || size_inches <= 0.0 {
            return Err(PricingError::InvalidSize {
                input: size_inches.to_string(),
                reason: "size must be a positive number".to_string(),
            });
        }

        let threshold = self
            .thresholds
            .iter()
            .find(|t| t.covers(size_inches))
            .or_else(|| self.thresholds.last())
            .ok_or(PricingError::EmptyMoldFeeTable)?;

        Ok(threshold.fee)
    }

    /// Smallest quantity that is waived under the boundary policy.
    pub fn first_exempt_quantity(&self) -> i64 {
        match self.boundary {
            ExemptionBoundary::Inclusive => self.quantity_exemption_threshold,
            ExemptionBoundary::Exclusive => self.quantity_exemption_threshold.saturating_add(1),
        }
    }

    fn exemption_reason(&self) -> String {
        format!("High volume exemption ({}+ qty)", self.first_exempt_quantity())
    }
}

// =============================================================================
// Size Parsing
// =============================================================================

/// Parses a size label such as `"1.50"` into inches.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Digits with at most one decimal point; no signs, units or letters
/// - Must lie within [`MIN_SIZE_INCHES`, `MAX_SIZE_INCHES`]
///
/// ## Example
/// ```rust
/// use pinforge_core::mold_fee::parse_size;
///
/// assert_eq!(parse_size("1.50").unwrap(), 1.5);
/// assert_eq!(parse_size(".75").unwrap(), 0.75);
/// assert!(parse_size("size1.5").is_err());
/// assert!(parse_size("12").is_err());
/// ```
pub fn parse_size(label: &str) -> PricingResult<f64> {
    let trimmed = label.trim();
    let invalid = |reason: &str| PricingError::InvalidSize {
        input: label.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("size is empty"));
    }

    let dots = trimmed.chars().filter(|&c| c == '.').count();
    let well_formed = dots <= 1
        && !trimmed.ends_with('.')
        && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !well_formed {
        return Err(invalid("expected a decimal number of inches"));
    }

    let inches: f64 = trimmed
        .parse()
        .map_err(|_| invalid("expected a decimal number of inches"))?;

    if !inches.is_finite() || inches <= 0.0 {
        return Err(invalid("size must be a positive number"));
    }
    if !(MIN_SIZE_INCHES..=MAX_SIZE_INCHES).contains(&inches) {
        return Err(PricingError::SizeOutOfRange(inches));
    }

    Ok(inches)
}

// =============================================================================
// Engine
// =============================================================================

/// Calculates the mold fee. Never fails.
///
/// `sides` only matters when the config carries a two-sided multiplier.
///
/// ## Example
/// ```rust
/// use pinforge_core::mold_fee::{calculate_mold_fee, MoldFeeConfig};
/// use pinforge_core::DesignSides;
///
/// let pins = MoldFeeConfig::pins();
/// assert_eq!(calculate_mold_fee("1.00", 100, None, &pins).fee, 50.0);
/// assert!(calculate_mold_fee("1.00", 1000, None, &pins).waived);
///
/// let coins = MoldFeeConfig::coins();
/// let two_sided = calculate_mold_fee("2.00", 100, Some(DesignSides::TwoSided), &coins);
/// assert_eq!(two_sided.fee, 150.0);
///
/// let broken = calculate_mold_fee("abc", 100, None, &pins);
/// assert_eq!(broken.fee, 0.0);
/// assert!(!broken.waived);
/// ```
pub fn calculate_mold_fee(
    size: &str,
    quantity: i64,
    sides: Option<DesignSides>,
    config: &MoldFeeConfig,
) -> MoldFeeCalculationResult {
    match try_calculate_mold_fee(size, quantity, sides, config) {
        Ok(result) => result,
        Err(err) => {
            error!(size, quantity, error = %err, "Error calculating mold fee");
            MoldFeeCalculationResult {
                fee: 0.0,
                waived: false,
                reason: Some(MOLD_FEE_ERROR_REASON.to_string()),
            }
        }
    }
}

/// The fallible core of [`calculate_mold_fee`].
pub fn try_calculate_mold_fee(
    size: &str,
    quantity: i64,
    sides: Option<DesignSides>,
    config: &MoldFeeConfig,
) -> PricingResult<MoldFeeCalculationResult> {
    if quantity < 1 {
        return Err(PricingError::InvalidQuantity(quantity));
    }

    if config.is_exempt(quantity) {
        debug!(quantity, threshold = config.quantity_exemption_threshold, "Mold fee waived");
        return Ok(MoldFeeCalculationResult {
            fee: 0.0,
            waived: true,
            reason: Some(config.exemption_reason()),
        });
    }

    let inches = parse_size(size)?;
    let mut fee = config.fee_for_size(inches)?;

    if !fee.is_finite() || fee < 0.0 {
        return Err(PricingError::InvalidMoldFee(fee));
    }

    if let (Some(DesignSides::TwoSided), Some(multiplier)) = (sides, config.two_sided_multiplier) {
        fee *= multiplier;
    }

    Ok(MoldFeeCalculationResult::charged(fee))
}

// =============================================================================
// Unit Tests
// =============================================================================
