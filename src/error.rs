//! Error taxonomy for the dimensional type system.
//!
//! Every failure is surfaced synchronously at the point of the offending
//! operation; nothing is retried, recovered, or logged internally. The
//! `try_*` variants on [`crate::quantity::Quantity`] run the identical
//! validation logic and merely discard the error payload.

use thiserror::Error;

/// Errors produced by unit algebra, conversion, and quantity arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Incompatible units or dimensions for addition, subtraction, or
    /// strict quantity construction.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    /// A cross-kind operation with no registered inference rule and no
    /// applicable dimensionless fallback.
    #[error("no inference rule for {left} {operator} {right}")]
    KindConflict {
        left: String,
        operator: String,
        right: String,
    },

    /// A rule was registered for an already-occupied key with a different
    /// result while the registry runs in strict conflict mode.
    #[error(
        "conflicting inference rule for {left} {operator} {right}: \
         already yields {existing}, refusing {proposed}"
    )]
    RegistryConflict {
        left: String,
        operator: String,
        right: String,
        existing: String,
        proposed: String,
    },

    /// Registration was attempted after the registry was sealed.
    #[error("inference registry is sealed")]
    RegistrySealed,

    /// A metric prefix symbol or factor that is not part of the SI table.
    #[error("unrecognized metric prefix: {0}")]
    InvalidPrefix(String),

    /// The scalar payload type has no strategy for the requested
    /// operation (e.g. integral scalars under a fractional conversion).
    #[error("numeric type {0} does not support this operation")]
    UnsupportedNumericType(&'static str),

    /// An affine unit (temperature scale with an offset) was found inside
    /// a composite expression where only linear factors are sound.
    #[error("affine unit {unit} cannot take part in composite unit conversion")]
    AffineComposition { unit: String },

    /// An operation that is physically meaningless for a point-like kind,
    /// such as adding or scaling two absolute temperatures.
    #[error("{kind} is point-like and cannot be {operation}")]
    PointKind {
        kind: String,
        operation: &'static str,
    },
}
