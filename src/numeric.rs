//! Per-scalar calculation strategies.
//!
//! Arithmetic itself comes from the standard operator traits; what a
//! scalar type must additionally provide is a way to re-express its value
//! under a unit conversion. The strategies are stateless: floating types
//! route through `f64`, integral types only accept the identity transform
//! and report [`Error::UnsupportedNumericType`] otherwise.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::convert::LinearTransform;
use crate::error::Error;

/// A scalar payload usable inside measurements and quantities.
pub trait Scalar:
    Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    const TYPE_NAME: &'static str;

    /// Re-express this value under a unit conversion.
    fn apply_transform(self, transform: &LinearTransform) -> Result<Self, Error>;
}

impl Scalar for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn apply_transform(self, transform: &LinearTransform) -> Result<Self, Error> {
        Ok(transform.apply(self))
    }
}

impl Scalar for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn apply_transform(self, transform: &LinearTransform) -> Result<Self, Error> {
        Ok(transform.apply(f64::from(self)) as f32)
    }
}

impl Scalar for i64 {
    const TYPE_NAME: &'static str = "i64";

    fn apply_transform(self, transform: &LinearTransform) -> Result<Self, Error> {
        if transform.is_identity() {
            Ok(self)
        } else {
            Err(Error::UnsupportedNumericType(Self::TYPE_NAME))
        }
    }
}

impl Scalar for i32 {
    const TYPE_NAME: &'static str = "i32";

    fn apply_transform(self, transform: &LinearTransform) -> Result<Self, Error> {
        if transform.is_identity() {
            Ok(self)
        } else {
            Err(Error::UnsupportedNumericType(Self::TYPE_NAME))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_transform() {
        let t = LinearTransform {
            scale: 1000.0,
            offset: 0.0,
        };
        assert_eq!(2.5f64.apply_transform(&t).unwrap(), 2500.0);
        assert_eq!(2.5f32.apply_transform(&t).unwrap(), 2500.0f32);
    }

    #[test]
    fn test_integer_identity_only() {
        assert_eq!(7i64.apply_transform(&LinearTransform::IDENTITY).unwrap(), 7);
        let t = LinearTransform {
            scale: 60.0,
            offset: 0.0,
        };
        assert!(matches!(
            7i64.apply_transform(&t),
            Err(Error::UnsupportedNumericType("i64"))
        ));
        assert!(matches!(
            7i32.apply_transform(&t),
            Err(Error::UnsupportedNumericType("i32"))
        ));
    }
}
