//! # Quote
//!
//! A priced snapshot of one set of selections, as handed to the UI or a
//! customer. The breakdown is computed once at construction and never
//! recomputed, so a quote stays stable even if the catalog later changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::breakdown::calculate_price_breakdown_with;
use crate::mold_fee::MoldFeeConfig;
use crate::money::format_currency;
use crate::types::{OrderSelections, PriceBreakdown};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Random v4 UUID.
    pub id: String,
    pub selections: OrderSelections,
    pub breakdown: PriceBreakdown,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

impl Quote {
    /// Wraps an already computed breakdown.
    pub fn new(selections: OrderSelections, breakdown: PriceBreakdown) -> Self {
        Quote {
            id: Uuid::new_v4().to_string(),
            selections,
            breakdown,
            generated_at: Utc::now(),
        }
    }

    /// Prices `selections` under `mold_fee` and wraps the result.
    ///
    /// Like the aggregator, this never fails: a broken input produces a
    /// quote with a zeroed breakdown.
    pub fn price(selections: OrderSelections, mold_fee: &MoldFeeConfig) -> Self {
        let breakdown = calculate_price_breakdown_with(&selections, mold_fee);
        Self::new(selections, breakdown)
    }

    /// False when pricing failed and the breakdown was zeroed.
    pub fn is_priced(&self) -> bool {
        !self.breakdown.is_zeroed()
    }

    /// Order total as en-US currency, e.g. `$1,234.56`.
    pub fn formatted_total(&self) -> String {
        format_currency(self.breakdown.total)
    }

    /// Effective per-piece price as en-US currency.
    pub fn formatted_unit_price(&self) -> String {
        format_currency(self.breakdown.unit_price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
