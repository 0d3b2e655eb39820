//! The quantity-kind inference registry.
//!
//! Heterogeneous-kind multiplication and division (Force×Length→Energy,
//! Pressure×Area→Force, ...) require a registered rule. The registry is a
//! table keyed by `(left kind, operator, right kind)`, populated during
//! single-threaded startup and then optionally sealed: append-then-freeze.
//!
//! Lookup order for `q1 OP q2`:
//!
//! 1. identical kinds dividing yield the Dimensionless kind outright;
//! 2. an exact `(left, op, right)` table match;
//! 3. the generic dimensionless fallback: when one operand's kind is a
//!    transparent scalar (null canonical dimension and `scalar_fallback`
//!    set), the other kind is preserved; for division only when the
//!    scalar is the divisor;
//! 4. otherwise the operation is a [`Error::KindConflict`].
//!
//! Registering a duplicate key with an identical result is a no-op; a
//! differing result errors under strict conflict detection (the default)
//! or overwrites when disabled. The commutative flag on a multiply rule
//! auto-registers the mirrored entry; division is never auto-mirrored.

use std::fmt;
use std::sync::{LazyLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::kind::{self, QuantityKind};
use crate::kind::{
    ACCELERATION, AREA, CHARGE, ELECTRIC_CURRENT, ENERGY, FORCE, LENGTH, MASS, POWER, PRESSURE,
    TIME, TORQUE, VELOCITY, VOLTAGE, VOLUME,
};
use crate::kind::ANGLE;

/// The binary operators kinds can be inferred across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InferenceOperator {
    Multiply,
    Divide,
}

impl fmt::Display for InferenceOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceOperator::Multiply => write!(f, "*"),
            InferenceOperator::Divide => write!(f, "/"),
        }
    }
}

/// An immutable inference rule: `(left OP right) → result`.
#[derive(Debug, Clone, Copy)]
pub struct QuantityKindInference {
    left: &'static QuantityKind,
    operator: InferenceOperator,
    right: &'static QuantityKind,
    result: &'static QuantityKind,
    commutative: bool,
}

impl QuantityKindInference {
    pub fn multiply(
        left: &'static QuantityKind,
        right: &'static QuantityKind,
        result: &'static QuantityKind,
    ) -> Self {
        Self {
            left,
            operator: InferenceOperator::Multiply,
            right,
            result,
            commutative: false,
        }
    }

    pub fn divide(
        left: &'static QuantityKind,
        right: &'static QuantityKind,
        result: &'static QuantityKind,
    ) -> Self {
        Self {
            left,
            operator: InferenceOperator::Divide,
            right,
            result,
            commutative: false,
        }
    }

    /// Also register the mirrored multiply entry `(right, *, left)`.
    /// Has no effect on division rules, which are never mirrored.
    pub fn commutative(mut self) -> Self {
        self.commutative = true;
        self
    }
}

type RuleKey = (&'static str, InferenceOperator, &'static str);

/// The rule table. Mutable until sealed, then read-only.
#[derive(Debug)]
pub struct InferenceRegistry {
    rules: FxHashMap<RuleKey, &'static QuantityKind>,
    sealed: bool,
    strict: bool,
}

impl Default for InferenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceRegistry {
    /// An empty registry with strict conflict detection.
    pub fn new() -> Self {
        Self {
            rules: FxHashMap::default(),
            sealed: false,
            strict: true,
        }
    }

    /// An empty registry where conflicting registrations overwrite.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::new()
        }
    }

    /// A strict registry seeded with the standard mechanical, electrical,
    /// and rotational rules.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let rules = [
            QuantityKindInference::multiply(&LENGTH, &LENGTH, &AREA),
            QuantityKindInference::multiply(&AREA, &LENGTH, &VOLUME).commutative(),
            QuantityKindInference::multiply(&VELOCITY, &TIME, &LENGTH).commutative(),
            QuantityKindInference::multiply(&ACCELERATION, &TIME, &VELOCITY).commutative(),
            QuantityKindInference::multiply(&MASS, &ACCELERATION, &FORCE).commutative(),
            QuantityKindInference::multiply(&FORCE, &LENGTH, &ENERGY).commutative(),
            QuantityKindInference::multiply(&PRESSURE, &AREA, &FORCE).commutative(),
            QuantityKindInference::multiply(&POWER, &TIME, &ENERGY).commutative(),
            QuantityKindInference::multiply(&VOLTAGE, &CHARGE, &ENERGY).commutative(),
            QuantityKindInference::multiply(&ELECTRIC_CURRENT, &TIME, &CHARGE).commutative(),
            QuantityKindInference::multiply(&TORQUE, &ANGLE, &ENERGY).commutative(),
            QuantityKindInference::divide(&LENGTH, &TIME, &VELOCITY),
            QuantityKindInference::divide(&LENGTH, &VELOCITY, &TIME),
            QuantityKindInference::divide(&VELOCITY, &TIME, &ACCELERATION),
            QuantityKindInference::divide(&AREA, &LENGTH, &LENGTH),
            QuantityKindInference::divide(&VOLUME, &AREA, &LENGTH),
            QuantityKindInference::divide(&ENERGY, &LENGTH, &FORCE),
            QuantityKindInference::divide(&ENERGY, &FORCE, &LENGTH),
            QuantityKindInference::divide(&ENERGY, &TIME, &POWER),
            QuantityKindInference::divide(&ENERGY, &CHARGE, &VOLTAGE),
            QuantityKindInference::divide(&FORCE, &AREA, &PRESSURE),
            QuantityKindInference::divide(&FORCE, &MASS, &ACCELERATION),
        ];
        for rule in rules {
            // A fresh strict table cannot conflict with itself; a failure
            // here means the seed set is wrong.
            if let Err(error) = registry.register(rule) {
                tracing::warn!(%error, "default inference rule rejected");
            }
        }
        registry
    }

    /// Register a rule, mirroring commutative multiply rules.
    pub fn register(&mut self, rule: QuantityKindInference) -> Result<(), Error> {
        if self.sealed {
            return Err(Error::RegistrySealed);
        }
        self.insert(rule.left, rule.operator, rule.right, rule.result)?;
        if rule.commutative && rule.operator == InferenceOperator::Multiply && rule.left != rule.right
        {
            self.insert(rule.right, rule.operator, rule.left, rule.result)?;
        }
        Ok(())
    }

    fn insert(
        &mut self,
        left: &'static QuantityKind,
        operator: InferenceOperator,
        right: &'static QuantityKind,
        result: &'static QuantityKind,
    ) -> Result<(), Error> {
        let key: RuleKey = (left.name(), operator, right.name());
        match self.rules.get(&key) {
            Some(existing) if *existing == result => Ok(()),
            Some(existing) => {
                if self.strict {
                    Err(Error::RegistryConflict {
                        left: left.name().to_string(),
                        operator: operator.to_string(),
                        right: right.name().to_string(),
                        existing: existing.name().to_string(),
                        proposed: result.name().to_string(),
                    })
                } else {
                    tracing::warn!(
                        left = left.name(),
                        right = right.name(),
                        old = existing.name(),
                        new = result.name(),
                        "overwriting inference rule"
                    );
                    self.rules.insert(key, result);
                    Ok(())
                }
            }
            None => {
                tracing::debug!(
                    left = left.name(),
                    op = %operator,
                    right = right.name(),
                    result = result.name(),
                    "registered inference rule"
                );
                self.rules.insert(key, result);
                Ok(())
            }
        }
    }

    /// Freeze the table; every later registration fails.
    pub fn seal(&mut self) {
        self.sealed = true;
        tracing::debug!(rules = self.rules.len(), "inference registry sealed");
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Infer the result kind of `left OP right`.
    pub fn infer(
        &self,
        left: &'static QuantityKind,
        operator: InferenceOperator,
        right: &'static QuantityKind,
    ) -> Result<&'static QuantityKind, Error> {
        if left == right && operator == InferenceOperator::Divide {
            return Ok(kind::dimensionless());
        }
        if let Some(result) = self.rules.get(&(left.name(), operator, right.name())).copied() {
            return Ok(result);
        }
        match operator {
            InferenceOperator::Multiply => {
                if transparent_scalar(right) {
                    return Ok(left);
                }
                if transparent_scalar(left) {
                    return Ok(right);
                }
            }
            InferenceOperator::Divide => {
                if transparent_scalar(right) {
                    return Ok(left);
                }
            }
        }
        Err(Error::KindConflict {
            left: left.name().to_string(),
            operator: operator.to_string(),
            right: right.name().to_string(),
        })
    }
}

/// A kind the dimensionless fallback may look through.
fn transparent_scalar(kind: &QuantityKind) -> bool {
    kind.scalar_fallback() && kind.canonical_unit().dimension().is_null()
}

// ============================================================================
// Process-wide registry
// ============================================================================

static REGISTRY: LazyLock<RwLock<InferenceRegistry>> =
    LazyLock::new(|| RwLock::new(InferenceRegistry::with_defaults()));

/// Register a rule in the process-wide registry.
pub fn register(rule: QuantityKindInference) -> Result<(), Error> {
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(rule)
}

/// Seal the process-wide registry.
pub fn seal() {
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .seal()
}

/// Infer against the process-wide registry.
pub fn infer(
    left: &'static QuantityKind,
    operator: InferenceOperator,
    right: &'static QuantityKind,
) -> Result<&'static QuantityKind, Error> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .infer(left, operator, right)
}

/// Swap the process-wide registry back to its seeded state. Exists for
/// test isolation only.
#[cfg(feature = "registry-reset")]
pub fn reset() {
    *REGISTRY.write().unwrap_or_else(PoisonError::into_inner) = InferenceRegistry::with_defaults();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{ABSOLUTE_TEMPERATURE, DIMENSIONLESS};

    #[test]
    fn test_exact_match() {
        let registry = InferenceRegistry::with_defaults();
        let result = registry
            .infer(&FORCE, InferenceOperator::Multiply, &LENGTH)
            .unwrap();
        assert_eq!(result, &*ENERGY);
    }

    #[test]
    fn test_commutative_mirror() {
        let registry = InferenceRegistry::with_defaults();
        let result = registry
            .infer(&LENGTH, InferenceOperator::Multiply, &FORCE)
            .unwrap();
        assert_eq!(result, &*ENERGY);
    }

    #[test]
    fn test_division_not_mirrored() {
        let registry = InferenceRegistry::with_defaults();
        // Length/Time -> Velocity is seeded; Time/Length is not.
        assert!(registry
            .infer(&TIME, InferenceOperator::Divide, &LENGTH)
            .is_err());
    }

    #[test]
    fn test_same_kind_division_short_circuits() {
        let registry = InferenceRegistry::new();
        let result = registry
            .infer(&ENERGY, InferenceOperator::Divide, &ENERGY)
            .unwrap();
        assert_eq!(result, &*DIMENSIONLESS);
    }

    #[test]
    fn test_dimensionless_fallback() {
        let registry = InferenceRegistry::new();
        let result = registry
            .infer(&ENERGY, InferenceOperator::Multiply, &DIMENSIONLESS)
            .unwrap();
        assert_eq!(result, &*ENERGY);
        let result = registry
            .infer(&DIMENSIONLESS, InferenceOperator::Multiply, &ENERGY)
            .unwrap();
        assert_eq!(result, &*ENERGY);
        let result = registry
            .infer(&ENERGY, InferenceOperator::Divide, &DIMENSIONLESS)
            .unwrap();
        assert_eq!(result, &*ENERGY);
        // A scalar divided by energy is not energy.
        assert!(registry
            .infer(&DIMENSIONLESS, InferenceOperator::Divide, &ENERGY)
            .is_err());
    }

    #[test]
    fn test_angle_guard() {
        let registry = InferenceRegistry::with_defaults();
        // Torque * Angle goes through the registered rule, not the
        // fallback, and yields Energy rather than Torque.
        let result = registry
            .infer(&TORQUE, InferenceOperator::Multiply, &ANGLE)
            .unwrap();
        assert_eq!(result, &*ENERGY);
        // With no rule, the guard blocks the fallback outright.
        let empty = InferenceRegistry::new();
        assert!(empty
            .infer(&TORQUE, InferenceOperator::Multiply, &ANGLE)
            .is_err());
    }

    #[test]
    fn test_duplicate_identical_is_noop() {
        let mut registry = InferenceRegistry::with_defaults();
        let before = registry.len();
        registry
            .register(QuantityKindInference::multiply(&PRESSURE, &AREA, &FORCE))
            .unwrap();
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_conflict_under_strict_mode() {
        let mut registry = InferenceRegistry::with_defaults();
        let conflict = registry.register(QuantityKindInference::multiply(
            &PRESSURE,
            &AREA,
            &ENERGY,
        ));
        assert!(matches!(conflict, Err(Error::RegistryConflict { .. })));
    }

    #[test]
    fn test_overwrite_when_lenient() {
        let mut registry = InferenceRegistry::lenient();
        registry
            .register(QuantityKindInference::multiply(&PRESSURE, &AREA, &FORCE))
            .unwrap();
        registry
            .register(QuantityKindInference::multiply(&PRESSURE, &AREA, &ENERGY))
            .unwrap();
        let result = registry
            .infer(&PRESSURE, InferenceOperator::Multiply, &AREA)
            .unwrap();
        assert_eq!(result, &*ENERGY);
    }

    #[test]
    fn test_sealed_rejects_registration() {
        let mut registry = InferenceRegistry::with_defaults();
        registry.seal();
        assert!(registry.is_sealed());
        let rejected = registry.register(QuantityKindInference::multiply(
            &PRESSURE,
            &AREA,
            &FORCE,
        ));
        assert!(matches!(rejected, Err(Error::RegistrySealed)));
    }

    #[cfg(feature = "registry-reset")]
    #[test]
    fn test_reset_restores_defaults() {
        super::seal();
        super::reset();
        let rule = QuantityKindInference::multiply(&PRESSURE, &AREA, &FORCE);
        super::register(rule).unwrap();
    }

    #[test]
    fn test_no_rule_for_point_kinds() {
        let registry = InferenceRegistry::with_defaults();
        assert!(registry
            .infer(
                &ABSOLUTE_TEMPERATURE,
                InferenceOperator::Multiply,
                &LENGTH
            )
            .is_err());
    }
}
