//! SI metric prefixes.
//!
//! A prefix is a named power-of-ten factor that wraps a base unit:
//! `kilo * metre()` yields the prefixed unit `km`. Lookups by symbol or
//! factor are fallible; an unrecognized prefix is an [`Error::InvalidPrefix`].

use std::fmt;
use std::ops::Mul;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::unit::Unit;

/// A metric prefix: symbol, name, and decimal factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    symbol: &'static str,
    name: &'static str,
    factor: f64,
}

pub const YOTTA: Prefix = Prefix::new("Y", "yotta", 1e24);
pub const ZETTA: Prefix = Prefix::new("Z", "zetta", 1e21);
pub const EXA: Prefix = Prefix::new("E", "exa", 1e18);
pub const PETA: Prefix = Prefix::new("P", "peta", 1e15);
pub const TERA: Prefix = Prefix::new("T", "tera", 1e12);
pub const GIGA: Prefix = Prefix::new("G", "giga", 1e9);
pub const MEGA: Prefix = Prefix::new("M", "mega", 1e6);
pub const KILO: Prefix = Prefix::new("k", "kilo", 1e3);
pub const HECTO: Prefix = Prefix::new("h", "hecto", 1e2);
pub const DECA: Prefix = Prefix::new("da", "deca", 1e1);
pub const DECI: Prefix = Prefix::new("d", "deci", 1e-1);
pub const CENTI: Prefix = Prefix::new("c", "centi", 1e-2);
pub const MILLI: Prefix = Prefix::new("m", "milli", 1e-3);
pub const MICRO: Prefix = Prefix::new("μ", "micro", 1e-6);
pub const NANO: Prefix = Prefix::new("n", "nano", 1e-9);
pub const PICO: Prefix = Prefix::new("p", "pico", 1e-12);
pub const FEMTO: Prefix = Prefix::new("f", "femto", 1e-15);
pub const ATTO: Prefix = Prefix::new("a", "atto", 1e-18);
pub const ZEPTO: Prefix = Prefix::new("z", "zepto", 1e-21);
pub const YOCTO: Prefix = Prefix::new("y", "yocto", 1e-24);

/// All prefixes, largest factor first.
pub const ALL: [Prefix; 20] = [
    YOTTA, ZETTA, EXA, PETA, TERA, GIGA, MEGA, KILO, HECTO, DECA, DECI, CENTI, MILLI, MICRO,
    NANO, PICO, FEMTO, ATTO, ZEPTO, YOCTO,
];

impl Prefix {
    const fn new(symbol: &'static str, name: &'static str, factor: f64) -> Self {
        Self {
            symbol,
            name,
            factor,
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Look up a prefix by its symbol (`"k"`, `"μ"`, ...).
    pub fn by_symbol(symbol: &str) -> Result<Prefix, Error> {
        ALL.iter()
            .find(|prefix| prefix.symbol == symbol)
            .copied()
            .ok_or_else(|| Error::InvalidPrefix(symbol.to_string()))
    }

    /// Look up a prefix by its exact decimal factor.
    pub fn by_factor(factor: f64) -> Result<Prefix, Error> {
        ALL.iter()
            .find(|prefix| prefix.factor == factor)
            .copied()
            .ok_or_else(|| Error::InvalidPrefix(format!("{factor:e}")))
    }
}

/// Prefix-multiply construction: `KILO * metre()` is the unit `km`.
impl Mul<Unit> for Prefix {
    type Output = Unit;

    fn mul(self, base: Unit) -> Unit {
        Unit::Prefixed {
            prefix: self,
            base: Box::new(base),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

// Prefixes serialize as their symbol and deserialize through the static
// table, so unknown prefixes are rejected at the serde boundary.
impl Serialize for Prefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SymbolVisitor;

        impl Visitor<'_> for SymbolVisitor {
            type Value = Prefix;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an SI prefix symbol")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Prefix, E> {
                Prefix::by_symbol(value).map_err(|_| E::custom(format!("unknown prefix {value:?}")))
            }
        }

        deserializer.deserialize_str(SymbolVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_symbol() {
        assert_eq!(Prefix::by_symbol("k").unwrap(), KILO);
        assert_eq!(Prefix::by_symbol("μ").unwrap(), MICRO);
    }

    #[test]
    fn test_lookup_by_factor() {
        assert_eq!(Prefix::by_factor(1e-2).unwrap(), CENTI);
    }

    #[test]
    fn test_unknown_prefix() {
        assert!(matches!(
            Prefix::by_symbol("x"),
            Err(Error::InvalidPrefix(_))
        ));
        assert!(matches!(
            Prefix::by_factor(3.0),
            Err(Error::InvalidPrefix(_))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&KILO).unwrap();
        assert_eq!(json, "\"k\"");
        let back: Prefix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, KILO);
    }
}
