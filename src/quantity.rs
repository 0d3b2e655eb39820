//! `Quantity<T>`: a measurement bound to a quantity kind.
//!
//! Construction is strict by default: the measurement's unit dimension
//! must equal the kind's canonical dimension. Addition and subtraction
//! are gated on kinds: cross-kind operands on an identical dimension
//! always fail (this is what keeps energy and torque apart), with the
//! point/delta exceptions for point-like kinds. Multiplication and
//! division consult the process-wide inference registry for the result
//! kind and re-validate it dimensionally.
//!
//! The `try_*` variants run the identical logic and return `None` instead
//! of an error; the two forms cannot diverge in what they accept.

use std::fmt;

use crate::error::Error;
use crate::inference::{self, InferenceOperator};
use crate::kind::QuantityKind;
use crate::measurement::Measurement;
use crate::numeric::Scalar;
use crate::unit::Unit;

#[derive(Debug, Clone)]
pub struct Quantity<T: Scalar> {
    measurement: Measurement<T>,
    kind: &'static QuantityKind,
}

impl<T: Scalar> Quantity<T> {
    /// Strict construction: the measurement's unit must match the kind's
    /// canonical dimension.
    pub fn new(measurement: Measurement<T>, kind: &'static QuantityKind) -> Result<Self, Error> {
        if !kind.matches(measurement.unit()) {
            return Err(Error::DimensionMismatch {
                expected: kind.canonical_unit().dimension().to_string(),
                found: measurement.unit().dimension().to_string(),
            });
        }
        Ok(Self { measurement, kind })
    }

    /// Construction without the dimension check, for callers that have
    /// already validated.
    pub fn new_unchecked(measurement: Measurement<T>, kind: &'static QuantityKind) -> Self {
        Self { measurement, kind }
    }

    /// Convenience strict constructor from parts.
    pub fn of(value: T, unit: Unit, kind: &'static QuantityKind) -> Result<Self, Error> {
        Self::new(Measurement::new(value, unit), kind)
    }

    pub fn measurement(&self) -> &Measurement<T> {
        &self.measurement
    }

    pub fn value(&self) -> T {
        self.measurement.value()
    }

    pub fn unit(&self) -> &Unit {
        self.measurement.unit()
    }

    pub fn kind(&self) -> &'static QuantityKind {
        self.kind
    }

    /// Re-express in another unit of the same dimension, keeping the kind.
    pub fn convert_to(&self, target: &Unit) -> Result<Self, Error> {
        Ok(Self::new_unchecked(
            self.measurement.convert_to(target)?,
            self.kind,
        ))
    }

    /// Add two quantities.
    ///
    /// Same-kind operands align units and add values, unless the kind is
    /// point-like. A delta may be added to a point value on either side,
    /// yielding the point kind. Everything else is a kind conflict.
    pub fn add(&self, rhs: &Self) -> Result<Self, Error> {
        if self.kind == rhs.kind {
            if !self.kind.allow_direct_addition() {
                return Err(Error::PointKind {
                    kind: self.kind.name().to_string(),
                    operation: "added",
                });
            }
            return Ok(Self::new_unchecked(
                self.measurement.add(&rhs.measurement)?,
                self.kind,
            ));
        }
        // point + delta and delta + point both yield the point kind.
        if self.kind.difference_kind() == Some(rhs.kind) {
            return Ok(Self::new_unchecked(
                self.measurement.add(&rhs.measurement)?,
                self.kind,
            ));
        }
        if rhs.kind.difference_kind() == Some(self.kind) {
            return Ok(Self::new_unchecked(
                self.measurement.add(&rhs.measurement)?,
                rhs.kind,
            ));
        }
        Err(Error::KindConflict {
            left: self.kind.name().to_string(),
            operator: "+".to_string(),
            right: rhs.kind.name().to_string(),
        })
    }

    /// Subtract two quantities.
    ///
    /// Same-kind operands subtract into the kind's difference kind when
    /// one is declared (point − point → delta), otherwise into the same
    /// kind. A point minus its delta stays a point.
    pub fn sub(&self, rhs: &Self) -> Result<Self, Error> {
        if self.kind == rhs.kind {
            if !self.kind.allow_direct_subtraction() {
                return Err(Error::PointKind {
                    kind: self.kind.name().to_string(),
                    operation: "subtracted",
                });
            }
            let result_kind = self.kind.difference_kind().unwrap_or(self.kind);
            return Ok(Self::new_unchecked(
                self.measurement.sub(&rhs.measurement)?,
                result_kind,
            ));
        }
        if self.kind.difference_kind() == Some(rhs.kind) {
            return Ok(Self::new_unchecked(
                self.measurement.sub(&rhs.measurement)?,
                self.kind,
            ));
        }
        Err(Error::KindConflict {
            left: self.kind.name().to_string(),
            operator: "-".to_string(),
            right: rhs.kind.name().to_string(),
        })
    }

    /// Multiply two quantities; the result kind comes from the inference
    /// registry and is re-validated against the combined unit.
    pub fn mul(&self, rhs: &Self) -> Result<Self, Error> {
        let kind = inference::infer(self.kind, InferenceOperator::Multiply, rhs.kind)?;
        Self::new(self.measurement.mul(&rhs.measurement), kind)
    }

    /// Divide two quantities through the inference registry.
    pub fn div(&self, rhs: &Self) -> Result<Self, Error> {
        let kind = inference::infer(self.kind, InferenceOperator::Divide, rhs.kind)?;
        Self::new(self.measurement.div(&rhs.measurement), kind)
    }

    /// Scale by a bare dimensionless value, preserving the kind.
    /// Point-like kinds cannot be scaled.
    pub fn scale(&self, factor: T) -> Result<Self, Error> {
        if self.kind.is_point_like() {
            return Err(Error::PointKind {
                kind: self.kind.name().to_string(),
                operation: "scaled",
            });
        }
        Ok(Self::new_unchecked(
            self.measurement.scale(factor),
            self.kind,
        ))
    }

    pub fn try_add(&self, rhs: &Self) -> Option<Self> {
        self.add(rhs).ok()
    }

    pub fn try_sub(&self, rhs: &Self) -> Option<Self> {
        self.sub(rhs).ok()
    }

    pub fn try_mul(&self, rhs: &Self) -> Option<Self> {
        self.mul(rhs).ok()
    }

    pub fn try_div(&self, rhs: &Self) -> Option<Self> {
        self.div(rhs).ok()
    }
}

impl<T: Scalar> PartialEq for Quantity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.measurement == other.measurement
    }
}

impl<T: Scalar> fmt::Display for Quantity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.measurement)
    }
}
