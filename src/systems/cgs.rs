//! CGS leaves, defined as exact scale factors over SI units.

use crate::prefix;
use crate::systems::si;
use crate::unit::Unit;

pub fn centimetre() -> Unit {
    prefix::CENTI * si::metre()
}

pub fn gram() -> Unit {
    si::gram()
}

pub fn dyne() -> Unit {
    Unit::scale("dyn", "dyne", 1e-5, si::newton())
}

pub fn erg() -> Unit {
    Unit::scale("erg", "erg", 1e-7, si::joule())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors() {
        assert_eq!(dyne().linear_factor().unwrap(), 1e-5);
        assert_eq!(erg().linear_factor().unwrap(), 1e-7);
        assert_eq!(centimetre().linear_factor().unwrap(), 1e-2);
    }
}
