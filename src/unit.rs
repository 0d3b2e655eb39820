//! Unit expressions.
//!
//! The unit hierarchy mirrors the dimension hierarchy and adds the leaf
//! kinds that carry numeric meaning: scaled units (minute, litre), affine
//! units (Celsius, Fahrenheit), prefixed units (km, mg), and named derived
//! aliases (N, J, W). Composites go through the same rewriting engine as
//! dimensions, and every composite derives its dimension by applying the
//! identical combinator to its operands' dimensions, so dimensional
//! consistency holds by construction rather than by a separate check.
//!
//! Affine units are sound only in isolation: an offset has no meaning
//! inside a product, division, or power. The algebra itself stays total
//! (operators cannot fail), but every path that needs a linear factor
//! rejects composite-embedded affine leaves with
//! [`Error::AffineComposition`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitXor, Div, Mul};

use serde::{Deserialize, Serialize};

use crate::algebra::{self, Operand};
use crate::dimension::Dimension;
use crate::error::Error;
use crate::prefix::Prefix;
use crate::systems::System;

/// A unit expression: a leaf or a canonical composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Unit {
    /// Multiplicative identity: empty symbol and name, null dimension.
    Null,
    /// An irreducible leaf owned by a unit system.
    Basic {
        symbol: String,
        name: String,
        system: System,
        dimension: Dimension,
    },
    /// A linear factor relative to a base unit. Factors compose
    /// multiplicatively through nesting.
    Scale {
        symbol: String,
        name: String,
        factor: f64,
        base: Box<Unit>,
    },
    /// A scale and an additive offset relative to a base unit. Used only
    /// for temperature scales.
    Affine {
        symbol: String,
        name: String,
        factor: f64,
        offset: f64,
        base: Box<Unit>,
    },
    /// A metric prefix wrapping a base unit.
    Prefixed { prefix: Prefix, base: Box<Unit> },
    /// A named alias over a wrapped expression, inheriting its dimension
    /// and system.
    Derived {
        symbol: String,
        name: String,
        expr: Box<Unit>,
    },
    Product(Vec<Unit>),
    Division(Box<Unit>, Box<Unit>),
    Power(Box<Unit>, i32),
}

impl Unit {
    pub fn basic(
        symbol: impl Into<String>,
        name: impl Into<String>,
        system: System,
        dimension: Dimension,
    ) -> Unit {
        Unit::Basic {
            symbol: symbol.into(),
            name: name.into(),
            system,
            dimension,
        }
    }

    pub fn scale(
        symbol: impl Into<String>,
        name: impl Into<String>,
        factor: f64,
        base: Unit,
    ) -> Unit {
        Unit::Scale {
            symbol: symbol.into(),
            name: name.into(),
            factor,
            base: Box::new(base),
        }
    }

    pub fn affine(
        symbol: impl Into<String>,
        name: impl Into<String>,
        factor: f64,
        offset: f64,
        base: Unit,
    ) -> Unit {
        Unit::Affine {
            symbol: symbol.into(),
            name: name.into(),
            factor,
            offset,
            base: Box::new(base),
        }
    }

    pub fn derived(symbol: impl Into<String>, name: impl Into<String>, expr: Unit) -> Unit {
        Unit::Derived {
            symbol: symbol.into(),
            name: name.into(),
            expr: Box::new(expr),
        }
    }

    /// Raise to an integer power through the algebra.
    pub fn pow(self, exponent: i32) -> Unit {
        algebra::pow(self, exponent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Unit::Null)
    }

    /// The dimension of this unit, derived recursively: composites apply
    /// the equivalent dimension combinator to their operands' dimensions.
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Null => Dimension::Null,
            Unit::Basic { dimension, .. } => dimension.clone(),
            Unit::Scale { base, .. }
            | Unit::Affine { base, .. }
            | Unit::Prefixed { base, .. } => base.dimension(),
            Unit::Derived { expr, .. } => expr.dimension(),
            Unit::Product(operands) => operands
                .iter()
                .fold(Dimension::Null, |acc, op| acc * op.dimension()),
            Unit::Division(dividend, divisor) => dividend.dimension() / divisor.dimension(),
            Unit::Power(base, exponent) => base.dimension().pow(*exponent),
        }
    }

    /// The owning unit system, when one is determined: leaves report their
    /// own, wrappers inherit from the base, composites from their first
    /// operand.
    pub fn system(&self) -> Option<System> {
        match self {
            Unit::Null => None,
            Unit::Basic { system, .. } => Some(*system),
            Unit::Scale { base, .. }
            | Unit::Affine { base, .. }
            | Unit::Prefixed { base, .. } => base.system(),
            Unit::Derived { expr, .. } => expr.system(),
            Unit::Product(operands) => operands.iter().find_map(Unit::system),
            Unit::Division(dividend, divisor) => {
                dividend.system().or_else(|| divisor.system())
            }
            Unit::Power(base, _) => base.system(),
        }
    }

    /// Display symbol, e.g. `kgm/s^2` for the composite `kg*m/(s^2)`.
    pub fn symbol(&self) -> String {
        match self {
            Unit::Null => String::new(),
            Unit::Basic { symbol, .. }
            | Unit::Scale { symbol, .. }
            | Unit::Affine { symbol, .. }
            | Unit::Derived { symbol, .. } => symbol.clone(),
            Unit::Prefixed { prefix, base } => format!("{}{}", prefix.symbol(), base.symbol()),
            Unit::Product(operands) => operands.iter().map(Unit::symbol).collect(),
            Unit::Division(dividend, divisor) => {
                if dividend.is_null() {
                    format!("1/{}", divisor.symbol())
                } else {
                    format!("{}/{}", dividend.symbol(), divisor.symbol())
                }
            }
            Unit::Power(base, exponent) => format!("{}^{}", base.symbol(), exponent),
        }
    }

    /// Full name, e.g. `kilogram metre/second^2`.
    pub fn name(&self) -> String {
        match self {
            Unit::Null => String::new(),
            Unit::Basic { name, .. }
            | Unit::Scale { name, .. }
            | Unit::Affine { name, .. }
            | Unit::Derived { name, .. } => name.clone(),
            Unit::Prefixed { prefix, base } => format!("{}{}", prefix.name(), base.name()),
            Unit::Product(operands) => operands
                .iter()
                .map(Unit::name)
                .collect::<Vec<_>>()
                .join(" "),
            Unit::Division(dividend, divisor) => {
                if dividend.is_null() {
                    format!("1/{}", divisor.name())
                } else {
                    format!("{}/{}", dividend.name(), divisor.name())
                }
            }
            Unit::Power(base, exponent) => format!("{}^{}", base.name(), exponent),
        }
    }

    /// True when an affine leaf occurs anywhere in the expression.
    pub fn contains_affine(&self) -> bool {
        match self {
            Unit::Affine { .. } => true,
            Unit::Null | Unit::Basic { .. } => false,
            Unit::Scale { base, .. } | Unit::Prefixed { base, .. } => base.contains_affine(),
            Unit::Derived { expr, .. } => expr.contains_affine(),
            Unit::Product(operands) => operands.iter().any(Unit::contains_affine),
            Unit::Division(dividend, divisor) => {
                dividend.contains_affine() || divisor.contains_affine()
            }
            Unit::Power(base, _) => base.contains_affine(),
        }
    }

    /// Multiplicative factor to the owning system's base units.
    ///
    /// Errors on any embedded affine leaf: offsets have no linear factor.
    pub(crate) fn linear_factor(&self) -> Result<f64, Error> {
        match self {
            Unit::Null | Unit::Basic { .. } => Ok(1.0),
            Unit::Scale { factor, base, .. } => Ok(factor * base.linear_factor()?),
            Unit::Prefixed { prefix, base } => Ok(prefix.factor() * base.linear_factor()?),
            Unit::Derived { expr, .. } => expr.linear_factor(),
            Unit::Product(operands) => operands
                .iter()
                .try_fold(1.0, |acc, op| Ok(acc * op.linear_factor()?)),
            Unit::Division(dividend, divisor) => {
                Ok(dividend.linear_factor()? / divisor.linear_factor()?)
            }
            Unit::Power(base, exponent) => Ok(base.linear_factor()?.powi(*exponent)),
            Unit::Affine { symbol, .. } => Err(Error::AffineComposition {
                unit: symbol.clone(),
            }),
        }
    }

    /// `(scale, offset)` such that `base_value = value * scale + offset`.
    ///
    /// An affine unit is only sound standing alone; anywhere else the
    /// embedded affine leaf is rejected.
    pub(crate) fn scale_and_offset(&self) -> Result<(f64, f64), Error> {
        if let Unit::Affine {
            factor,
            offset,
            base,
            ..
        } = self
        {
            Ok((factor * base.linear_factor()?, *offset))
        } else {
            Ok((self.linear_factor()?, 0.0))
        }
    }
}

impl Operand for Unit {
    fn null() -> Self {
        Unit::Null
    }

    fn is_null(&self) -> bool {
        Unit::is_null(self)
    }

    fn as_product(&self) -> Option<&[Self]> {
        match self {
            Unit::Product(operands) => Some(operands),
            _ => None,
        }
    }

    fn as_division(&self) -> Option<(&Self, &Self)> {
        match self {
            Unit::Division(dividend, divisor) => Some((dividend, divisor)),
            _ => None,
        }
    }

    fn as_power(&self) -> Option<(&Self, i32)> {
        match self {
            Unit::Power(base, exponent) => Some((base, *exponent)),
            _ => None,
        }
    }

    fn from_product(operands: Vec<Self>) -> Self {
        Unit::Product(operands)
    }

    fn from_division(dividend: Self, divisor: Self) -> Self {
        Unit::Division(Box::new(dividend), Box::new(divisor))
    }

    fn from_power(base: Self, exponent: i32) -> Self {
        Unit::Power(Box::new(base), exponent)
    }

    fn leaf_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Unit::Null, Unit::Null) => true,
            (
                Unit::Basic {
                    symbol: a,
                    system: sa,
                    ..
                },
                Unit::Basic {
                    symbol: b,
                    system: sb,
                    ..
                },
            ) => a == b && sa == sb,
            (
                Unit::Scale {
                    factor: fa,
                    base: ba,
                    ..
                },
                Unit::Scale {
                    factor: fb,
                    base: bb,
                    ..
                },
            ) => fa == fb && ba == bb,
            (
                Unit::Affine {
                    factor: fa,
                    offset: oa,
                    base: ba,
                    ..
                },
                Unit::Affine {
                    factor: fb,
                    offset: ob,
                    base: bb,
                    ..
                },
            ) => fa == fb && oa == ob && ba == bb,
            (
                Unit::Prefixed {
                    prefix: pa,
                    base: ba,
                },
                Unit::Prefixed {
                    prefix: pb,
                    base: bb,
                },
            ) => pa == pb && ba == bb,
            (
                Unit::Derived {
                    symbol: sa,
                    expr: ea,
                    ..
                },
                Unit::Derived {
                    symbol: sb,
                    expr: eb,
                    ..
                },
            ) => sa == sb && ea == eb,
            _ => false,
        }
    }

    fn leaf_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Unit::Null => 0u8.hash(state),
            Unit::Basic { symbol, system, .. } => {
                1u8.hash(state);
                symbol.hash(state);
                system.hash(state);
            }
            Unit::Scale { factor, base, .. } => {
                2u8.hash(state);
                factor.to_bits().hash(state);
                state.write_u64(algebra::hash(base.as_ref()));
            }
            Unit::Affine {
                factor,
                offset,
                base,
                ..
            } => {
                3u8.hash(state);
                factor.to_bits().hash(state);
                offset.to_bits().hash(state);
                state.write_u64(algebra::hash(base.as_ref()));
            }
            Unit::Prefixed { prefix, base } => {
                4u8.hash(state);
                prefix.factor().to_bits().hash(state);
                state.write_u64(algebra::hash(base.as_ref()));
            }
            Unit::Derived { symbol, expr, .. } => {
                5u8.hash(state);
                symbol.hash(state);
                state.write_u64(algebra::hash(expr.as_ref()));
            }
            // Composites are hashed by the algebra, never through here.
            _ => {}
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        algebra::eq(self, other)
    }
}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(algebra::hash(self));
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        algebra::multiply(self, rhs)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        algebra::divide(self, rhs)
    }
}

/// `^` as the power operator: `second() ^ 2`.
///
/// Note Rust's `^` binds looser than `*` and `/`; parenthesize as in
/// `kilogram() * metre() / (second() ^ 2)`.
impl BitXor<i32> for Unit {
    type Output = Unit;

    fn bitxor(self, exponent: i32) -> Unit {
        algebra::pow(self, exponent)
    }
}

impl fmt::Display for Unit {
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
    use crate::prefix;
    use crate::systems::si;

    #[test]
    fn test_composite_symbol() {
        let newton = si::kilogram() * si::metre() / (si::second() ^ 2);
        assert_eq!(newton.symbol(), "kgm/s^2");
    }

    #[test]
    fn test_composite_dimension() {
        let newton = si::kilogram() * si::metre() / (si::second() ^ 2);
        assert_eq!(
            newton.dimension(),
            Dimension::MASS * Dimension::LENGTH / (Dimension::TIME ^ 2)
        );
    }

    #[test]
    fn test_dimension_tracks_combinators() {
        // u.dimension() equals the same combinator applied to operand
        // dimensions, all the way down.
        let u = (si::metre() / si::kilogram()) / (si::ampere() / si::second());
        let d = (Dimension::LENGTH / Dimension::MASS)
            / (Dimension::CURRENT / Dimension::TIME);
        assert_eq!(u.dimension(), d);
        assert_eq!(u.dimension().symbol(), "LT/MI");
    }

    #[test]
    fn test_prefixed_symbol_and_dimension() {
        let km = prefix::KILO * si::metre();
        assert_eq!(km.symbol(), "km");
        assert_eq!(km.dimension(), Dimension::LENGTH);
    }

    #[test]
    fn test_product_commutes() {
        assert_eq!(
            si::kilogram() * si::metre(),
            si::metre() * si::kilogram()
        );
    }

    #[test]
    fn test_cancellation_to_null() {
        assert_eq!(si::metre() / si::metre(), Unit::Null);
        let squared_over_cubed = (si::metre() ^ 2) / (si::metre() ^ 3);
        assert_eq!(
            squared_over_cubed,
            Unit::Null / si::metre()
        );
    }

    #[test]
    fn test_scaled_leaf_equality() {
        assert_eq!(si::minute(), si::minute());
        assert_ne!(si::minute(), si::hour());
        assert_ne!(si::minute(), si::second());
    }

    #[test]
    fn test_null_symbol_and_dimension() {
        assert_eq!(Unit::Null.symbol(), "");
        assert!(Unit::Null.dimension().is_null());
        assert_eq!(format!("{}", Unit::Null), "1");
    }

    #[test]
    fn test_linear_factor_composes() {
        // min = 60 s; km = 1000 m; km/min has factor 1000/60 to m/s.
        let kmh = (prefix::KILO * si::metre()) / si::minute();
        let factor = kmh.linear_factor().unwrap();
        assert!((factor - 1000.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_affine_rejected_in_composites() {
        let nonsense = si::celsius() * si::metre();
        assert!(matches!(
            nonsense.linear_factor(),
            Err(Error::AffineComposition { .. })
        ));
        // Standing alone, the affine unit exposes scale and offset.
        let (scale, offset) = si::celsius().scale_and_offset().unwrap();
        assert_eq!(scale, 1.0);
        assert_eq!(offset, 273.15);
    }

    #[test]
    fn test_derived_inherits() {
        let newton = si::newton();
        assert_eq!(newton.symbol(), "N");
        assert_eq!(
            newton.dimension(),
            Dimension::MASS * Dimension::LENGTH / (Dimension::TIME ^ 2)
        );
        assert_eq!(newton.system(), Some(System::Si));
    }
}
