//! `Measurement<T>`: a scalar value paired with a unit.
//!
//! Addition and subtraction align the right operand to the left unit
//! through the scale-factor contract before combining values, so
//! `1 m + 1 km` yields `1001 m`. Multiplication and division combine
//! units through the algebra. Comparisons convert first and return no
//! ordering for incompatible units.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::convert;
use crate::error::Error;
use crate::numeric::Scalar;
use crate::unit::Unit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement<T: Scalar> {
    value: T,
    unit: Unit,
}

impl<T: Scalar> Measurement<T> {
    pub fn new(value: T, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Re-express this measurement in another unit of the same dimension.
    pub fn convert_to(&self, target: &Unit) -> Result<Self, Error> {
        let transform = convert::linear_transform(&self.unit, target)?;
        Ok(Self::new(
            self.value.apply_transform(&transform)?,
            target.clone(),
        ))
    }

    /// Add, aligning the right operand to the left unit.
    pub fn add(&self, rhs: &Self) -> Result<Self, Error> {
        let aligned = rhs.convert_to(&self.unit)?;
        Ok(Self::new(self.value + aligned.value, self.unit.clone()))
    }

    /// Subtract, aligning the right operand to the left unit.
    pub fn sub(&self, rhs: &Self) -> Result<Self, Error> {
        let aligned = rhs.convert_to(&self.unit)?;
        Ok(Self::new(self.value - aligned.value, self.unit.clone()))
    }

    /// Multiply values and units.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.unit.clone() * rhs.unit.clone(),
        )
    }

    /// Divide values and units.
    pub fn div(&self, rhs: &Self) -> Self {
        Self::new(
            self.value / rhs.value,
            self.unit.clone() / rhs.unit.clone(),
        )
    }

    /// Scale by a bare (dimensionless) value.
    pub fn scale(&self, factor: T) -> Self {
        Self::new(self.value * factor, self.unit.clone())
    }
}

/// Scalar multiplication: `measurement * 2.0`.
impl<T: Scalar> std::ops::Mul<T> for Measurement<T> {
    type Output = Measurement<T>;

    fn mul(self, factor: T) -> Measurement<T> {
        Measurement::new(self.value * factor, self.unit)
    }
}

/// Equal when the right side converts into the left unit with an equal
/// value. Incompatible units are simply unequal.
impl<T: Scalar> PartialEq for Measurement<T> {
    fn eq(&self, other: &Self) -> bool {
        match other.convert_to(&self.unit) {
            Ok(aligned) => self.value == aligned.value,
            Err(_) => false,
        }
    }
}

impl<T: Scalar> PartialOrd for Measurement<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let aligned = other.convert_to(&self.unit).ok()?;
        self.value.partial_cmp(&aligned.value)
    }
}

impl<T: Scalar> fmt::Display for Measurement<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.unit.symbol();
        if symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, symbol)
        }
    }
}
