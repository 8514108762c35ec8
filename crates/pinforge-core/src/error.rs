//! # Error Types
//!
//! Domain-specific error types for pinforge-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pinforge-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── PricingError     - Resolver / mold fee primitive failures         │
//! │  └── ValidationError  - Order selection input failures                 │
//! │                                                                         │
//! │  pinforge-cli errors (in app)                                          │
//! │  └── ConfigError      - Configuration loading failures                 │
//! │                                                                         │
//! │  Flow: PricingError ──► aggregator catches ──► zeroed PriceBreakdown   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Tiers
//! 1. Primitives (unit price resolver, size parsing) return `Err(PricingError)`
//! 2. Line-item fee calculators absorb bad option data and return 0
//! 3. The mold fee engine and the breakdown aggregator never fail
//!
//! Only tier 1 ever hands an error to its caller.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A pricing primitive failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catalog data could not be parsed.
    ///
    /// ## When This Occurs
    /// - A catalog file supplied at runtime is not valid JSON
    /// - A field has the wrong type (e.g. a price given as a string)
    #[error("Catalog data is malformed: {0}")]
    Catalog(#[from] serde_json::Error),
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised by the low-level pricing primitives.
///
/// These are the only errors that cross a public API boundary during a
/// calculation; everything above the primitives degrades instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// The method has no tier table for the requested size.
    #[error("Unknown size \"{size}\" for production method \"{method}\"")]
    UnknownSize { method: String, size: String },

    /// The quantity is not a positive integer.
    #[error("Invalid quantity {0}: must be a positive whole number")]
    InvalidQuantity(i64),

    /// A declared size has no quantity tiers at all.
    #[error("No quantity tiers declared for size \"{size}\" of production method \"{method}\"")]
    EmptyTierTable { method: String, size: String },

    /// The size label could not be parsed as a decimal inch value.
    #[error("Invalid size format \"{input}\": {reason}")]
    InvalidSize { input: String, reason: String },

    /// The size parsed but lies outside the physically sensible range.
    #[error("Size out of reasonable range: {0}\"")]
    SizeOutOfRange(f64),

    /// Threshold lookup produced an unusable fee.
    #[error("Invalid calculated mold fee: {0}")]
    InvalidMoldFee(f64),

    /// The mold fee configuration has no thresholds to look up.
    #[error("Mold fee threshold table is empty")]
    EmptyMoldFeeTable,

    /// A catalog lookup by id found nothing.
    #[error("Unknown {kind} option \"{id}\"")]
    UnknownOption { kind: String, id: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for order selections.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required selection is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a size label that is not a decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for the pricing primitives.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::UnknownSize {
            method: "Die Struck".to_string(),
            size: "9.99".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown size \"9.99\" for production method \"Die Struck\""
        );

        assert_eq!(
            PricingError::EmptyMoldFeeTable.to_string(),
            "Mold fee threshold table is empty"
        );

        let err = PricingError::InvalidQuantity(0);
        assert_eq!(
            err.to_string(),
            "Invalid quantity 0: must be a positive whole number"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "size".to_string(),
        };
        assert_eq!(err.to_string(), "size is required");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = PricingError::InvalidQuantity(-5).into();
        assert!(matches!(core_err, CoreError::Pricing(_)));

        let core_err: CoreError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
