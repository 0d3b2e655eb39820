//! Quantity kinds: semantic classification on top of dimensions.
//!
//! Two units sharing a dimension can still be physically distinct; the
//! canonical example is energy vs. torque, both `ML^2/T^2`. A
//! [`QuantityKind`] closes that gap: it binds a name to a canonical unit
//! and carries the safety flags that drive quantity arithmetic.
//!
//! Kinds are immutable and created once as process statics. The standard
//! set lives here, together with an explicit name→kind map used for
//! lookup and serialization. No reflection, no runtime registration.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::ser::Serializer;
use serde::Serialize;

use crate::systems::si;
use crate::unit::Unit;

/// An immutable semantic tag bound to a canonical unit.
#[derive(Debug, Clone)]
pub struct QuantityKind {
    name: &'static str,
    canonical_unit: Unit,
    tags: &'static [&'static str],
    allow_direct_addition: bool,
    allow_direct_subtraction: bool,
    difference_kind: Option<&'static QuantityKind>,
    point_like: bool,
    scalar_fallback: bool,
}

impl QuantityKind {
    pub fn builder(name: &'static str, canonical_unit: Unit) -> QuantityKindBuilder {
        QuantityKindBuilder {
            kind: QuantityKind {
                name,
                canonical_unit,
                tags: &[],
                allow_direct_addition: true,
                allow_direct_subtraction: true,
                difference_kind: None,
                point_like: false,
                scalar_fallback: true,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn canonical_unit(&self) -> &Unit {
        &self.canonical_unit
    }

    /// True when the unit's dimension matches this kind's canonical
    /// dimension.
    pub fn matches(&self, unit: &Unit) -> bool {
        unit.dimension() == self.canonical_unit.dimension()
    }

    pub fn has_tag(&self, label: &str) -> bool {
        self.tags.contains(&label)
    }

    pub fn tags(&self) -> &'static [&'static str] {
        self.tags
    }

    pub fn allow_direct_addition(&self) -> bool {
        self.allow_direct_addition
    }

    pub fn allow_direct_subtraction(&self) -> bool {
        self.allow_direct_subtraction
    }

    /// The kind produced by subtracting two values of this kind, when it
    /// differs from this kind (point-like kinds yield their delta kind).
    pub fn difference_kind(&self) -> Option<&'static QuantityKind> {
        self.difference_kind
    }

    /// Point-like kinds mark absolute positions on a scale: adding or
    /// scaling them is physically meaningless.
    pub fn is_point_like(&self) -> bool {
        self.point_like
    }

    /// Whether this kind participates in the generic dimensionless
    /// inference fallback. Dimensionless-dimension kinds that are
    /// semantically meaningful (Angle) opt out.
    pub fn scalar_fallback(&self) -> bool {
        self.scalar_fallback
    }
}

/// Kinds are identified by name.
impl PartialEq for QuantityKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for QuantityKind {}

impl Hash for QuantityKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Kinds serialize as their registered name; adapters resolve them back
/// through [`lookup`].
impl Serialize for QuantityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

pub struct QuantityKindBuilder {
    kind: QuantityKind,
}

impl QuantityKindBuilder {
    pub fn tags(mut self, tags: &'static [&'static str]) -> Self {
        self.kind.tags = tags;
        self
    }

    /// Mark as point-like with the given delta kind: direct addition is
    /// disabled, subtraction yields the delta.
    pub fn point_like(mut self, difference_kind: &'static QuantityKind) -> Self {
        self.kind.point_like = true;
        self.kind.allow_direct_addition = false;
        self.kind.allow_direct_subtraction = true;
        self.kind.difference_kind = Some(difference_kind);
        self
    }

    /// Opt out of the generic dimensionless inference fallback.
    pub fn no_scalar_fallback(mut self) -> Self {
        self.kind.scalar_fallback = false;
        self
    }

    pub fn build(self) -> QuantityKind {
        self.kind
    }
}

// ============================================================================
// Standard kinds
// ============================================================================

pub static DIMENSIONLESS: LazyLock<QuantityKind> =
    LazyLock::new(|| QuantityKind::builder("Dimensionless", Unit::Null).build());

pub static ANGLE: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Angle", si::radian())
        .no_scalar_fallback()
        .build()
});

pub static LENGTH: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Length", si::metre())
        .tags(&["mechanical"])
        .build()
});

pub static MASS: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Mass", si::kilogram())
        .tags(&["mechanical"])
        .build()
});

pub static TIME: LazyLock<QuantityKind> =
    LazyLock::new(|| QuantityKind::builder("Time", si::second()).build());

pub static ELECTRIC_CURRENT: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("ElectricCurrent", si::ampere())
        .tags(&["electrical"])
        .build()
});

pub static AREA: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Area", si::metre().pow(2))
        .tags(&["mechanical"])
        .build()
});

pub static VOLUME: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Volume", si::metre().pow(3))
        .tags(&["mechanical"])
        .build()
});

pub static VELOCITY: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Velocity", si::metre() / si::second())
        .tags(&["mechanical"])
        .build()
});

pub static ACCELERATION: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Acceleration", si::metre() / si::second().pow(2))
        .tags(&["mechanical"])
        .build()
});

pub static FORCE: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Force", si::newton())
        .tags(&["mechanical"])
        .build()
});

pub static ENERGY: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Energy", si::joule())
        .tags(&["mechanical"])
        .build()
});

/// Same dimension as Energy, different physics.
pub static TORQUE: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Torque", si::newton() * si::metre())
        .tags(&["mechanical"])
        .build()
});

pub static POWER: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Power", si::watt())
        .tags(&["mechanical"])
        .build()
});

pub static PRESSURE: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Pressure", si::pascal())
        .tags(&["mechanical"])
        .build()
});

pub static CHARGE: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("ElectricCharge", si::coulomb())
        .tags(&["electrical"])
        .build()
});

pub static VOLTAGE: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("Voltage", si::volt())
        .tags(&["electrical"])
        .build()
});

/// The difference between two absolute temperatures.
pub static TEMPERATURE_DELTA: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("TemperatureDelta", si::kelvin())
        .tags(&["thermodynamic"])
        .build()
});

/// Absolute temperature: a point on a scale. Two absolutes cannot be
/// added; their difference is a temperature delta.
pub static ABSOLUTE_TEMPERATURE: LazyLock<QuantityKind> = LazyLock::new(|| {
    QuantityKind::builder("AbsoluteTemperature", si::kelvin())
        .tags(&["thermodynamic"])
        .point_like(&TEMPERATURE_DELTA)
        .build()
});

/// Explicit name→kind map for lookup and deserialization.
static KINDS: LazyLock<FxHashMap<&'static str, &'static QuantityKind>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    let all: [&'static QuantityKind; 19] = [
        &DIMENSIONLESS,
        &ANGLE,
        &LENGTH,
        &MASS,
        &TIME,
        &ELECTRIC_CURRENT,
        &AREA,
        &VOLUME,
        &VELOCITY,
        &ACCELERATION,
        &FORCE,
        &ENERGY,
        &TORQUE,
        &POWER,
        &PRESSURE,
        &CHARGE,
        &VOLTAGE,
        &TEMPERATURE_DELTA,
        &ABSOLUTE_TEMPERATURE,
    ];
    for kind in all {
        map.insert(kind.name(), kind);
    }
    map
});

/// Resolve a kind by its registered name.
pub fn lookup(name: &str) -> Option<&'static QuantityKind> {
    KINDS.get(name).copied()
}

/// The scalar kind.
pub fn dimensionless() -> &'static QuantityKind {
    &DIMENSIONLESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_by_dimension() {
        assert!(ENERGY.matches(&si::joule()));
        assert!(ENERGY.matches(&(si::newton() * si::metre())));
        assert!(!ENERGY.matches(&si::newton()));
    }

    #[test]
    fn test_energy_torque_share_dimension() {
        assert_eq!(
            ENERGY.canonical_unit().dimension(),
            TORQUE.canonical_unit().dimension()
        );
        assert_ne!(*ENERGY, *TORQUE);
    }

    #[test]
    fn test_tags() {
        assert!(ENERGY.has_tag("mechanical"));
        assert!(!ENERGY.has_tag("electrical"));
        assert!(VOLTAGE.has_tag("electrical"));
    }

    #[test]
    fn test_point_like_flags() {
        assert!(ABSOLUTE_TEMPERATURE.is_point_like());
        assert!(!ABSOLUTE_TEMPERATURE.allow_direct_addition());
        assert!(ABSOLUTE_TEMPERATURE.allow_direct_subtraction());
        assert_eq!(
            ABSOLUTE_TEMPERATURE.difference_kind(),
            Some(&*TEMPERATURE_DELTA)
        );
        assert!(!TEMPERATURE_DELTA.is_point_like());
    }

    #[test]
    fn test_angle_opts_out_of_fallback() {
        assert!(ANGLE.canonical_unit().dimension().is_null());
        assert!(!ANGLE.scalar_fallback());
        assert!(DIMENSIONLESS.scalar_fallback());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Energy"), Some(&*ENERGY));
        assert_eq!(lookup("AbsoluteTemperature"), Some(&*ABSOLUTE_TEMPERATURE));
        assert_eq!(lookup("NoSuchKind"), None);
    }

    #[test]
    fn test_serialize_as_name() {
        let json = serde_json::to_string(&*ENERGY).unwrap();
        assert_eq!(json, "\"Energy\"");
    }
}
