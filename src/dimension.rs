//! Pure dimension expressions over the seven SI base quantities.
//!
//! Every physical quantity has a dimension built from the 7 SI base
//! dimensions. Unlike the unit hierarchy, dimensions carry no scale,
//! prefix, or offset concepts; they are the structural skeleton that
//! dimensional compatibility is checked against.
//!
//! Composites are kept canonical by the shared rewriting engine in
//! [`crate::algebra`]; equality and hashing are order-insensitive for
//! products, so `L*T == T*L`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitXor, Div, Mul};

use serde::{Deserialize, Serialize};

use crate::algebra::{self, Operand};

/// The seven SI base dimensions, as fixed singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    ElectricCurrent,
    Temperature,
    LuminousIntensity,
    AmountOfSubstance,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 7] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::ElectricCurrent,
        BaseDimension::Temperature,
        BaseDimension::LuminousIntensity,
        BaseDimension::AmountOfSubstance,
    ];

    /// Conventional single-letter dimension symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "L",
            BaseDimension::Mass => "M",
            BaseDimension::Time => "T",
            BaseDimension::ElectricCurrent => "I",
            BaseDimension::Temperature => "Θ",
            BaseDimension::LuminousIntensity => "J",
            BaseDimension::AmountOfSubstance => "N",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BaseDimension::Length => "length",
            BaseDimension::Mass => "mass",
            BaseDimension::Time => "time",
            BaseDimension::ElectricCurrent => "electric current",
            BaseDimension::Temperature => "temperature",
            BaseDimension::LuminousIntensity => "luminous intensity",
            BaseDimension::AmountOfSubstance => "amount of substance",
        }
    }
}

/// A dimension expression: a basic leaf or a canonical composite.
///
/// `Null` is the multiplicative identity (the dimension of pure numbers)
/// and only appears as an explicit identity or as the result of full
/// algebraic cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Dimension {
    Null,
    Basic(BaseDimension),
    Product(Vec<Dimension>),
    Division(Box<Dimension>, Box<Dimension>),
    Power(Box<Dimension>, i32),
}

impl Dimension {
    pub const NULL: Dimension = Dimension::Null;
    pub const LENGTH: Dimension = Dimension::Basic(BaseDimension::Length);
    pub const MASS: Dimension = Dimension::Basic(BaseDimension::Mass);
    pub const TIME: Dimension = Dimension::Basic(BaseDimension::Time);
    pub const CURRENT: Dimension = Dimension::Basic(BaseDimension::ElectricCurrent);
    pub const TEMPERATURE: Dimension = Dimension::Basic(BaseDimension::Temperature);
    pub const LUMINOUS_INTENSITY: Dimension = Dimension::Basic(BaseDimension::LuminousIntensity);
    pub const AMOUNT: Dimension = Dimension::Basic(BaseDimension::AmountOfSubstance);

    /// Raise to an integer power through the algebra.
    pub fn pow(self, exponent: i32) -> Dimension {
        algebra::pow(self, exponent)
    }

    /// The dimension of pure numbers.
    pub fn is_null(&self) -> bool {
        matches!(self, Dimension::Null)
    }

    /// Full name, e.g. `mass length/time^2`.
    pub fn name(&self) -> String {
        match self {
            Dimension::Null => String::new(),
            Dimension::Basic(base) => base.name().to_string(),
            Dimension::Product(operands) => operands
                .iter()
                .map(Dimension::name)
                .collect::<Vec<_>>()
                .join(" "),
            Dimension::Division(dividend, divisor) => {
                if dividend.is_null() {
                    format!("1/{}", divisor.name())
                } else {
                    format!("{}/{}", dividend.name(), divisor.name())
                }
            }
            Dimension::Power(base, exponent) => format!("{}^{}", base.name(), exponent),
        }
    }

    /// Symbol of the canonical form, e.g. `LT/MI` or `ML/T^2`.
    pub fn symbol(&self) -> String {
        match self {
            Dimension::Null => String::new(),
            Dimension::Basic(base) => base.symbol().to_string(),
            Dimension::Product(operands) => operands.iter().map(Dimension::symbol).collect(),
            Dimension::Division(dividend, divisor) => {
                if dividend.is_null() {
                    format!("1/{}", divisor.symbol())
                } else {
                    format!("{}/{}", dividend.symbol(), divisor.symbol())
                }
            }
            Dimension::Power(base, exponent) => format!("{}^{}", base.symbol(), exponent),
        }
    }
}

impl Operand for Dimension {
    fn null() -> Self {
        Dimension::Null
    }

    fn is_null(&self) -> bool {
        Dimension::is_null(self)
    }

    fn as_product(&self) -> Option<&[Self]> {
        match self {
            Dimension::Product(operands) => Some(operands),
            _ => None,
        }
    }

    fn as_division(&self) -> Option<(&Self, &Self)> {
        match self {
            Dimension::Division(dividend, divisor) => Some((dividend, divisor)),
            _ => None,
        }
    }

    fn as_power(&self) -> Option<(&Self, i32)> {
        match self {
            Dimension::Power(base, exponent) => Some((base, *exponent)),
            _ => None,
        }
    }

    fn from_product(operands: Vec<Self>) -> Self {
        Dimension::Product(operands)
    }

    fn from_division(dividend: Self, divisor: Self) -> Self {
        Dimension::Division(Box::new(dividend), Box::new(divisor))
    }

    fn from_power(base: Self, exponent: i32) -> Self {
        Dimension::Power(Box::new(base), exponent)
    }

    fn leaf_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dimension::Null, Dimension::Null) => true,
            (Dimension::Basic(a), Dimension::Basic(b)) => a == b,
            _ => false,
        }
    }

    fn leaf_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Dimension::Null => 0u8.hash(state),
            Dimension::Basic(base) => {
                1u8.hash(state);
                base.hash(state);
            }
            // Composites are hashed by the algebra, never through here.
            _ => {}
        }
    }
}

impl PartialEq for Dimension {
    fn eq(&self, other: &Self) -> bool {
        algebra::eq(self, other)
    }
}

impl Eq for Dimension {}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(algebra::hash(self));
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        algebra::multiply(self, rhs)
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        algebra::divide(self, rhs)
    }
}

/// `^` as the power operator: `Dimension::LENGTH ^ 2`.
///
/// Note Rust's `^` binds looser than `*` and `/`; parenthesize as in
/// `Dimension::MASS * Dimension::LENGTH / (Dimension::TIME ^ 2)`.
impl BitXor<i32> for Dimension {
    type Output = Dimension;

    fn bitxor(self, exponent: i32) -> Dimension {
        algebra::pow(self, exponent)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "1")
        } else {
            write!(f, "{}", self.symbol())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_symbols() {
        assert_eq!(Dimension::LENGTH.symbol(), "L");
        assert_eq!(Dimension::TEMPERATURE.symbol(), "Θ");
        assert_eq!(format!("{}", Dimension::NULL), "1");
    }

    #[test]
    fn test_force_dimension() {
        let force = Dimension::MASS * Dimension::LENGTH / (Dimension::TIME ^ 2);
        assert_eq!(force.symbol(), "ML/T^2");
    }

    #[test]
    fn test_product_commutes() {
        let ab = Dimension::MASS * Dimension::LENGTH;
        let ba = Dimension::LENGTH * Dimension::MASS;
        assert_eq!(ab, ba);

        use std::collections::hash_map::DefaultHasher;
        let digest = |dim: &Dimension| {
            let mut state = DefaultHasher::new();
            dim.hash(&mut state);
            state.finish()
        };
        assert_eq!(digest(&ab), digest(&ba));
    }

    #[test]
    fn test_cancellation() {
        let ratio = (Dimension::LENGTH * Dimension::TIME) / Dimension::TIME;
        assert_eq!(ratio, Dimension::LENGTH);
        assert_eq!(Dimension::TIME / Dimension::TIME, Dimension::NULL);
    }

    #[test]
    fn test_nested_division_symbol() {
        // (L/M)/(I/T) => LT/MI
        let ratio = (Dimension::LENGTH / Dimension::MASS)
            / (Dimension::CURRENT / Dimension::TIME);
        assert_eq!(ratio.symbol(), "LT/MI");
    }

    #[test]
    fn test_reciprocal_symbol() {
        let frequency = Dimension::NULL / Dimension::TIME;
        assert_eq!(frequency.symbol(), "1/T");
    }

    #[test]
    fn test_serde_round_trip() {
        let force = Dimension::MASS * Dimension::LENGTH / (Dimension::TIME ^ 2);
        let json = serde_json::to_string(&force).unwrap();
        let back: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(force, back);
    }
}
