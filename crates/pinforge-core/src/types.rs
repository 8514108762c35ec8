//! # Domain Types
//!
//! Core domain types used throughout Pinforge.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │ ProductionMethod │   │   AddOnOption    │   │  OrderSelections │    │
//! │  │ ──────────────── │   │ ──────────────── │   │ ──────────────── │    │
//! │  │ id, name         │   │ id, name         │   │ method, size     │    │
//! │  │ setup_fee?       │   │ price (per unit) │   │ quantity, rush   │    │
//! │  │ pricing (tiers)  │   │ is_free          │   │ add-ons, sides   │    │
//! │  └──────────────────┘   └──────────────────┘   └────────┬─────────┘    │
//! │                                                         │ engine        │
//! │                                                         ▼               │
//! │                         ┌──────────────────────────────────────────┐   │
//! │                         │ PriceBreakdown  (+ MoldFeeCalculation-   │   │
//! │                         │                    Result for display)   │   │
//! │                         └──────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every amount is an `f64` in US dollars. Rounding to cents is a display
//! concern handled by [`crate::money`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Line
// =============================================================================

/// The two product lines the engine prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductLine {
    /// Lapel pins: backing options, method setup fees, 500 piece exemption.
    #[default]
    Pins,
    /// Challenge coins: no backing, design sides, 300 piece exemption.
    Coins,
}

impl ProductLine {
    /// Whether orders in this line choose a backing.
    pub fn has_backing(&self) -> bool {
        matches!(self, ProductLine::Pins)
    }

    /// Whether orders in this line choose one or two design sides.
    pub fn has_design_sides(&self) -> bool {
        matches!(self, ProductLine::Coins)
    }
}

impl fmt::Display for ProductLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductLine::Pins => write!(f, "pins"),
            ProductLine::Coins => write!(f, "coins"),
        }
    }
}

// =============================================================================
// Design Sides
// =============================================================================

/// Coin design sides. Two-sided designs need a second mold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum DesignSides {
    #[default]
    OneSided,
    TwoSided,
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// Size label (e.g. `"1.50"`) → quantity tier → unit price.
///
/// `BTreeMap` keeps quantity tiers sorted ascending, which the resolver
/// relies on for clamping and bracketing.
pub type PricingTier = BTreeMap<String, BTreeMap<u32, f64>>;

/// A production method (pins) or color option (coins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductionMethod {
    /// Stable identifier, e.g. `"die-struck"`.
    pub id: String,

    /// Display name, e.g. `"Die Struck"`.
    pub name: String,

    /// Flat one-time setup charge, if the method has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_fee: Option<f64>,

    /// Tier matrix for this method.
    #[ts(type = "Record<string, Record<number, number>>")]
    pub pricing: PricingTier,
}

/// A plating, backing or packaging option.
///
/// `is_free` is for display only; cost is always `price × quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOnOption {
    pub id: String,
    pub name: String,
    /// Per-unit price in dollars.
    pub price: f64,
    pub is_free: bool,
}

impl AddOnOption {
    /// Convenience constructor; `is_free` is derived from the price.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        AddOnOption {
            id: id.into(),
            name: name.into(),
            price,
            is_free: price == 0.0,
        }
    }
}

// =============================================================================
// Order Selections
// =============================================================================

/// Everything the customer picked for one calculation.
///
/// Built fresh for every UI interaction; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSelections {
    /// Which product line's mold fee rules apply.
    #[serde(default)]
    pub product_line: ProductLine,

    /// Production method (pins) or color option (coins).
    pub method: ProductionMethod,

    pub plating: Option<AddOnOption>,

    /// Size label, e.g. `"1.25"`.
    pub size: String,

    /// Piece count. Must be a positive integer.
    pub quantity: i64,

    /// Pins only.
    #[serde(default)]
    pub backing: Option<AddOnOption>,

    pub packaging: Option<AddOnOption>,

    #[serde(default)]
    pub rush_order: bool,

    /// Coins only. `None` is treated as one-sided.
    #[serde(default)]
    pub design_sides: Option<DesignSides>,
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The itemized result of a calculation.
///
/// ## Invariants
/// - `total` is the exact sum of every component field
/// - `mold_fee_waived == true` implies `mold_fee == 0.0`
/// - The all-zero value means "no price yet"
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Unit price × quantity.
    pub base_price: f64,
    pub setup_fee: f64,
    pub plating_cost: f64,
    /// Always 0 for coins.
    pub backing_cost: f64,
    pub packaging_cost: f64,
    pub mold_fee: f64,
    pub mold_fee_waived: bool,
    pub rush_fee: f64,
    /// Exact or interpolated per-piece price, unrounded.
    pub unit_price: f64,
    pub total: f64,
}

impl PriceBreakdown {
    /// The fallback breakdown: every field 0 / false.
    #[inline]
    pub fn zeroed() -> Self {
        PriceBreakdown::default()
    }

    /// True for the fallback value.
    pub fn is_zeroed(&self) -> bool {
        *self == PriceBreakdown::zeroed()
    }

    /// Sum of all components, in the same order `total` is built.
    pub fn component_sum(&self) -> f64 {
        self.base_price
            + self.setup_fee
            + self.plating_cost
            + self.backing_cost
            + self.packaging_cost
            + self.mold_fee
            + self.rush_fee
    }
}

// =============================================================================
// Mold Fee Result
// =============================================================================

/// Outcome of a mold fee calculation, shown directly by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MoldFeeCalculationResult {
    pub fee: f64,
    pub waived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MoldFeeCalculationResult {
    /// A fee that is actually charged.
    pub fn charged(fee: f64) -> Self {
        MoldFeeCalculationResult {
            fee,
            waived: false,
            reason: None,
        }
    }

    /// Whether the UI should show a mold fee line with an amount.
    pub fn is_charged(&self) -> bool {
        self.fee > 0.0 && !self.waived
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
