//! The scale-factor contract between units of equal dimension.
//!
//! The core performs no numeric unit conversion itself; it only exposes
//! the value transform implied by two units' linear factors (and, for a
//! standalone affine leaf, its offset). Callers such as measurement
//! alignment and quantity re-expression apply the transform through
//! their scalar strategy.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::unit::Unit;

/// A value transform `x ↦ x * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTransform {
    pub scale: f64,
    pub offset: f64,
}

impl LinearTransform {
    pub const IDENTITY: LinearTransform = LinearTransform {
        scale: 1.0,
        offset: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }

    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }
}

/// The transform taking a value expressed in `from` to one expressed in
/// `to`. Fails when the dimensions differ, or when an affine leaf is
/// embedded in a composite expression on either side.
pub fn linear_transform(from: &Unit, to: &Unit) -> Result<LinearTransform, Error> {
    let from_dimension = from.dimension();
    let to_dimension = to.dimension();
    if from_dimension != to_dimension {
        return Err(Error::DimensionMismatch {
            expected: to_dimension.to_string(),
            found: from_dimension.to_string(),
        });
    }
    let (from_scale, from_offset) = from.scale_and_offset()?;
    let (to_scale, to_offset) = to.scale_and_offset()?;
    Ok(LinearTransform {
        scale: from_scale / to_scale,
        offset: (from_offset - to_offset) / to_scale,
    })
}

/// Convenience for `f64` values: compute and apply in one step.
pub fn convert(value: f64, from: &Unit, to: &Unit) -> Result<f64, Error> {
    Ok(linear_transform(from, to)?.apply(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::prefix;
    use crate::systems::{imperial, si};

    #[test]
    fn test_scale_round_trip() {
        let km = prefix::KILO * si::metre();
        let metres = convert(1.0, &km, &si::metre()).unwrap();
        assert_relative_eq!(metres, 1000.0);
        let back = convert(metres, &si::metre(), &km).unwrap();
        assert_relative_eq!(back, 1.0);
    }

    #[test]
    fn test_affine_conversions() {
        assert_relative_eq!(
            convert(0.0, &si::celsius(), &si::kelvin()).unwrap(),
            273.15
        );
        assert_relative_eq!(
            convert(100.0, &si::celsius(), &si::fahrenheit()).unwrap(),
            212.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            convert(32.0, &si::fahrenheit(), &si::celsius()).unwrap(),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_chained_round_trip() {
        // 1 mi -> m -> ft -> mi
        let in_metres = convert(1.0, &imperial::mile(), &si::metre()).unwrap();
        let in_feet = convert(in_metres, &si::metre(), &imperial::foot()).unwrap();
        let back = convert(in_feet, &imperial::foot(), &imperial::mile()).unwrap();
        assert_relative_eq!(back, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(matches!(
            linear_transform(&si::metre(), &si::second()),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_affine_composite_rejected() {
        let per_metre = si::celsius() / si::metre();
        let target = si::kelvin() / si::metre();
        assert!(matches!(
            linear_transform(&per_metre, &target),
            Err(Error::AffineComposition { .. })
        ));
    }

    #[test]
    fn test_composite_transform() {
        let kmh = si::kilometre() / si::hour();
        let ms = si::metre() / si::second();
        let t = linear_transform(&kmh, &ms).unwrap();
        assert!(t.offset == 0.0);
        assert_relative_eq!(t.apply(36.0), 10.0, epsilon = 1e-12);
    }
}
