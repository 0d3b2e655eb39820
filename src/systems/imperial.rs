//! Imperial leaves, defined as exact scale factors over SI bases.

use crate::systems::si;
use crate::unit::Unit;

pub fn foot() -> Unit {
    Unit::scale("ft", "foot", 0.3048, si::metre())
}

pub fn inch() -> Unit {
    Unit::scale("in", "inch", 1.0 / 12.0, foot())
}

pub fn yard() -> Unit {
    Unit::scale("yd", "yard", 3.0, foot())
}

pub fn mile() -> Unit {
    Unit::scale("mi", "mile", 5280.0, foot())
}

pub fn pound() -> Unit {
    Unit::scale("lb", "pound", 0.453_592_37, si::kilogram())
}

pub fn ounce() -> Unit {
    Unit::scale("oz", "ounce", 1.0 / 16.0, pound())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    #[test]
    fn test_factors_chain_to_si() {
        assert!((mile().linear_factor().unwrap() - 1609.344).abs() < 1e-9);
        assert!((inch().linear_factor().unwrap() - 0.0254).abs() < 1e-12);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(foot().dimension(), Dimension::LENGTH);
        assert_eq!(pound().dimension(), Dimension::MASS);
    }
}
