//! SI base, scaled, affine, and named derived units.

use crate::dimension::Dimension;
use crate::prefix;
use crate::systems::System;
use crate::unit::Unit;

// ============================================================================
// Base units
// ============================================================================

pub fn metre() -> Unit {
    Unit::basic("m", "metre", System::Si, Dimension::LENGTH)
}

pub fn kilogram() -> Unit {
    Unit::basic("kg", "kilogram", System::Si, Dimension::MASS)
}

pub fn second() -> Unit {
    Unit::basic("s", "second", System::Si, Dimension::TIME)
}

pub fn ampere() -> Unit {
    Unit::basic("A", "ampere", System::Si, Dimension::CURRENT)
}

pub fn kelvin() -> Unit {
    Unit::basic("K", "kelvin", System::Si, Dimension::TEMPERATURE)
}

pub fn candela() -> Unit {
    Unit::basic("cd", "candela", System::Si, Dimension::LUMINOUS_INTENSITY)
}

pub fn mole() -> Unit {
    Unit::basic("mol", "mole", System::Si, Dimension::AMOUNT)
}

// ============================================================================
// Scaled units
// ============================================================================

pub fn gram() -> Unit {
    Unit::scale("g", "gram", 1e-3, kilogram())
}

pub fn tonne() -> Unit {
    Unit::scale("t", "tonne", 1e3, kilogram())
}

pub fn minute() -> Unit {
    Unit::scale("min", "minute", 60.0, second())
}

pub fn hour() -> Unit {
    Unit::scale("h", "hour", 3600.0, second())
}

pub fn day() -> Unit {
    Unit::scale("d", "day", 86_400.0, second())
}

pub fn litre() -> Unit {
    Unit::scale("L", "litre", 1e-3, metre().pow(3))
}

// ============================================================================
// Prefixed shorthands
// ============================================================================

pub fn kilometre() -> Unit {
    prefix::KILO * metre()
}

pub fn centimetre() -> Unit {
    prefix::CENTI * metre()
}

pub fn millimetre() -> Unit {
    prefix::MILLI * metre()
}

pub fn milligram() -> Unit {
    prefix::MILLI * gram()
}

// ============================================================================
// Affine temperature scales
// ============================================================================

pub fn celsius() -> Unit {
    Unit::affine("°C", "degree Celsius", 1.0, 273.15, kelvin())
}

pub fn fahrenheit() -> Unit {
    // K = °F * 5/9 + 255.372...
    Unit::affine(
        "°F",
        "degree Fahrenheit",
        5.0 / 9.0,
        459.67 * 5.0 / 9.0,
        kelvin(),
    )
}

// ============================================================================
// Named derived units
// ============================================================================

pub fn newton() -> Unit {
    Unit::derived("N", "newton", kilogram() * metre() / second().pow(2))
}

pub fn joule() -> Unit {
    Unit::derived("J", "joule", newton() * metre())
}

pub fn watt() -> Unit {
    Unit::derived("W", "watt", joule() / second())
}

pub fn pascal() -> Unit {
    Unit::derived("Pa", "pascal", newton() / metre().pow(2))
}

pub fn hertz() -> Unit {
    Unit::derived("Hz", "hertz", Unit::Null / second())
}

pub fn coulomb() -> Unit {
    Unit::derived("C", "coulomb", ampere() * second())
}

pub fn volt() -> Unit {
    Unit::derived("V", "volt", watt() / ampere())
}

pub fn ohm() -> Unit {
    Unit::derived("Ω", "ohm", volt() / ampere())
}

/// Plane angle: dimensionless but semantically distinct, which is why the
/// `Angle` kind opts out of the scalar inference fallback.
pub fn radian() -> Unit {
    Unit::derived("rad", "radian", Unit::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dimensions() {
        assert_eq!(metre().dimension(), Dimension::LENGTH);
        assert_eq!(kilogram().dimension(), Dimension::MASS);
        assert_eq!(second().dimension(), Dimension::TIME);
        assert_eq!(ampere().dimension(), Dimension::CURRENT);
        assert_eq!(kelvin().dimension(), Dimension::TEMPERATURE);
        assert_eq!(candela().dimension(), Dimension::LUMINOUS_INTENSITY);
        assert_eq!(mole().dimension(), Dimension::AMOUNT);
    }

    #[test]
    fn test_derived_dimensions() {
        assert_eq!(
            joule().dimension(),
            Dimension::MASS * (Dimension::LENGTH ^ 2) / (Dimension::TIME ^ 2)
        );
        assert_eq!(
            pascal().dimension(),
            Dimension::MASS / (Dimension::LENGTH * (Dimension::TIME ^ 2))
        );
        assert!(radian().dimension().is_null());
    }

    #[test]
    fn test_scaled_factors() {
        assert_eq!(minute().linear_factor().unwrap(), 60.0);
        assert_eq!(litre().linear_factor().unwrap(), 1e-3);
        assert_eq!(tonne().linear_factor().unwrap(), 1e3);
    }
}
