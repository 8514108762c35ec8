//! # pinforge-core: Quote Engine for Lapel Pins and Challenge Coins
//!
//! This crate turns a customer's selections into an itemized price. It
//! contains pricing logic only, as pure functions with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pinforge Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  pinforge CLI / quote wizard UI                 │   │
//! │  │    method ──► size ──► quantity ──► add-ons ──► rush ──► quote  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderSelections                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pinforge-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ resolver  │  │ mold_fee  │  │   fees    │  │ breakdown │  │   │
//! │  │   │ tiers +   │  │ size step │  │ setup,    │  │ total,    │  │   │
//! │  │   │ interp.   │  │ exemption │  │ add-ons,  │  │ zeroed on │  │   │
//! │  │   │           │  │ two-sided │  │ rush 20%  │  │ failure   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │validation │  │   quote   │  │   money   │  │   │
//! │  │   │ pins.json │  │ catalog + │  │ snapshot  │  │ $1,234.56 │  │   │
//! │  │   │coins.json │  │ selections│  │ id, time  │  │ display   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductionMethod, AddOnOption, PriceBreakdown, etc.)
//! - [`catalog`] - Built-in and JSON-loaded pricing tables
//! - [`resolver`] - Unit price lookup, clamping and interpolation
//! - [`mold_fee`] - Size-threshold mold fees with quantity exemption
//! - [`fees`] - Setup, add-on and rush fee lines
//! - [`breakdown`] - The aggregator producing a [`PriceBreakdown`]
//! - [`validation`] - Catalog integrity and selection completeness
//! - [`quote`] - Priced snapshots
//! - [`money`] - Currency display
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Same selections, same breakdown
//! 2. **Degrade, Don't Throw**: The aggregator and mold fee engine never fail;
//!    faults are logged and priced as zero
//! 3. **Full Precision**: Amounts are `f64` dollars, rounded only for display
//! 4. **Typed Errors**: Fallible primitives return [`PricingError`]
//!
//! ## Example Usage
//!
//! ```rust
//! use pinforge_core::catalog::Catalog;
//! use pinforge_core::{calculate_price_breakdown, OrderSelections, ProductLine};
//!
//! let pins = Catalog::builtin(ProductLine::Pins).unwrap();
//! let selections = OrderSelections {
//!     product_line: ProductLine::Pins,
//!     method: pins.find_method("soft-enamel").unwrap().clone(),
//!     plating: pins.find_plating("polished-gold").ok().cloned(),
//!     size: "1.00".to_string(),
//!     quantity: 100,
//!     backing: pins.find_backing("butterfly").ok().cloned(),
//!     packaging: pins.find_packaging("poly-bag").ok().cloned(),
//!     rush_order: false,
//!     design_sides: None,
//! };
//!
//! let breakdown = calculate_price_breakdown(&selections);
//! assert!(breakdown.mold_fee > 0.0);
//! assert_eq!(breakdown.total, breakdown.component_sum());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod breakdown;
pub mod catalog;
pub mod error;
pub mod fees;
pub mod money;
pub mod mold_fee;
pub mod quote;
pub mod resolver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pinforge_core::Money` instead of
// `use pinforge_core::money::Money`

pub use breakdown::{calculate_price_breakdown, calculate_price_breakdown_with};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, PricingError, PricingResult, ValidationError};
pub use mold_fee::{calculate_mold_fee, ExemptionBoundary, MoldFeeConfig};
pub use money::{format_currency, format_price, Money};
pub use quote::Quote;
pub use resolver::resolve_unit_price;
pub use types::*;
pub use validation::{validate_catalog, validate_pricing_data, PricingDataValidation};
