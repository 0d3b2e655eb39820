//! Commutative term rewriting over unit and dimension expression trees.
//!
//! Units and dimensions form two parallel hierarchies built from the same
//! closed set of node kinds: leaves, `Product`, `Division`, and `Power`.
//! This module implements the shared rewriting engine once, generically over
//! the [`Operand`] capability, so that every composite expression ends up in
//! a canonical shape:
//!
//! - products are flat (never nested inside products) and order-insensitive,
//! - divisions are pushed outward (`a*(b/c)` becomes `(a*b)/c`),
//! - repeated factors collapse into powers (`a*a` becomes `a^2`),
//! - shared factors cancel across a division (`a^3/a` becomes `a^2`),
//! - the multiplicative identity only survives as the result of full
//!   cancellation.
//!
//! Equality and hashing are defined against these canonical forms: product
//! operands compare as multisets, and product hashes combine member hashes
//! after sorting so that `a*b` and `b*a` hash identically.

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Capability shared by unit and dimension expression nodes.
///
/// `as_*` accessors expose the three composite node kinds; everything else
/// is a leaf and is compared/hashed through `leaf_eq`/`leaf_hash`. The
/// `from_*` constructors build literal nodes without any rewriting; they
/// are the fallback of the smart operations below and should not be called
/// directly outside this module.
pub trait Operand: Clone + Sized {
    /// The multiplicative identity of the hierarchy.
    fn null() -> Self;
    fn is_null(&self) -> bool;

    fn as_product(&self) -> Option<&[Self]>;
    fn as_division(&self) -> Option<(&Self, &Self)>;
    fn as_power(&self) -> Option<(&Self, i32)>;

    fn from_product(operands: Vec<Self>) -> Self;
    fn from_division(dividend: Self, divisor: Self) -> Self;
    fn from_power(base: Self, exponent: i32) -> Self;

    /// Equality of two non-composite nodes.
    fn leaf_eq(&self, other: &Self) -> bool;

    /// Hash of a non-composite node.
    fn leaf_hash<H: Hasher>(&self, state: &mut H);
}

// ============================================================================
// MULTIPLICATION
// ============================================================================

/// Multiply two operands, producing a canonical composite.
///
/// Order of attack: identity short-circuit, then *rearrange* (push any
/// division outward), then *reduce* (collapse repeated factors into
/// powers), and only then a literal flat product.
pub fn multiply<T: Operand>(lhs: T, rhs: T) -> T {
    if lhs.is_null() {
        return rhs;
    }
    if rhs.is_null() {
        return lhs;
    }
    if let Some(result) = rearrange_multiplication(&lhs, &rhs) {
        return result;
    }
    if let Some(result) = reduce_multiplication(&lhs, &rhs) {
        return result;
    }
    let mut operands = Vec::new();
    flatten(&lhs, &mut operands);
    flatten(&rhs, &mut operands);
    T::from_product(operands)
}

/// `A*(B/C) => (A*B)/C` and `(A/B)*(C/D) => (A*C)/(B*D)`.
///
/// Operands are split into dividend/divisor parts; all dividends multiply
/// together, all divisors multiply together, and the result is one outer
/// division. Returns `None` when neither side is a division.
fn rearrange_multiplication<T: Operand>(lhs: &T, rhs: &T) -> Option<T> {
    let (lhs_num, lhs_den) = split_division(lhs);
    let (rhs_num, rhs_den) = split_division(rhs);
    let divisor = match (lhs_den, rhs_den) {
        (Some(a), Some(b)) => multiply(a, b),
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => return None,
    };
    Some(divide(multiply(lhs_num, rhs_num), divisor))
}

fn split_division<T: Operand>(op: &T) -> (T, Option<T>) {
    match op.as_division() {
        Some((dividend, divisor)) => (dividend.clone(), Some(divisor.clone())),
        None => (op.clone(), None),
    }
}

/// Collapse repeated factors: `a * a^2 => a^3`.
///
/// Both sides are flattened into a linear factor list and grouped by base
/// operand (a `Power` groups under its base with its exponent; any other
/// operand counts as exponent 1). Returns `None` when no group received
/// more than one contribution, leaving the literal-product fallback to run.
fn reduce_multiplication<T: Operand>(lhs: &T, rhs: &T) -> Option<T> {
    let mut factors: Vec<T> = Vec::new();
    flatten(lhs, &mut factors);
    flatten(rhs, &mut factors);

    let mut groups: Vec<(T, i32)> = Vec::new();
    let mut collapsed = false;
    for factor in factors {
        let (base, exponent) = match factor.as_power() {
            Some((base, exponent)) => (base.clone(), exponent),
            None => (factor, 1),
        };
        collapsed |= merge_factor(&mut groups, base, exponent);
    }
    if !collapsed {
        return None;
    }
    Some(collect_product(groups))
}

/// Expand nested products into a flat factor list.
fn flatten<T: Operand>(op: &T, out: &mut Vec<T>) {
    if let Some(children) = op.as_product() {
        for child in children {
            flatten(child, out);
        }
    } else {
        out.push(op.clone());
    }
}

/// Add `(base, exponent)` into the group list, returning true when the
/// base was already present.
fn merge_factor<T: Operand>(groups: &mut Vec<(T, i32)>, base: T, exponent: i32) -> bool {
    for (key, total) in groups.iter_mut() {
        if eq(key, &base) {
            *total += exponent;
            return true;
        }
    }
    groups.push((base, exponent));
    false
}

/// Rebuild a product from grouped factors, dropping zero exponents.
fn collect_product<T: Operand>(groups: Vec<(T, i32)>) -> T {
    let mut operands = Vec::new();
    for (base, exponent) in groups {
        match exponent {
            0 => {}
            1 => operands.push(base),
            exponent => operands.push(pow(base, exponent)),
        }
    }
    match operands.len() {
        0 => T::null(),
        1 => operands.remove(0),
        _ => T::from_product(operands),
    }
}

// ============================================================================
// DIVISION
// ============================================================================

/// Divide two operands, producing a canonical composite.
///
/// Divisions of divisions are rearranged into a single outer division,
/// then shared factors between dividend and divisor are cancelled.
pub fn divide<T: Operand>(dividend: T, divisor: T) -> T {
    if divisor.is_null() {
        return dividend;
    }
    if let Some(result) = rearrange_division(&dividend, &divisor) {
        return result;
    }
    if let Some(result) = reduce_division(&dividend, &divisor) {
        return result;
    }
    T::from_division(dividend, divisor)
}

/// `(A/B)/(C/D) => (A*D)/(B*C)`, `(A/B)/C => A/(B*C)`, `A/(B/C) => (A*C)/B`.
fn rearrange_division<T: Operand>(dividend: &T, divisor: &T) -> Option<T> {
    match (dividend.as_division(), divisor.as_division()) {
        (Some((a, b)), Some((c, d))) => Some(divide(
            multiply(a.clone(), d.clone()),
            multiply(b.clone(), c.clone()),
        )),
        (Some((a, b)), None) => Some(divide(a.clone(), multiply(b.clone(), divisor.clone()))),
        (None, Some((b, c))) => Some(divide(multiply(dividend.clone(), c.clone()), b.clone())),
        (None, None) => None,
    }
}

/// Cancel factors shared between dividend and divisor.
///
/// Both sides expand into `(base, exponent)` lists (divisor exponents
/// negated); when at least one base occurs on both sides the merged
/// exponent map is rebuilt as `positive-powers / negative-powers`,
/// fully or partially cancelling the shared factors.
fn reduce_division<T: Operand>(dividend: &T, divisor: &T) -> Option<T> {
    let top = power_factors(dividend);
    let bottom = power_factors(divisor);
    let shared = top
        .iter()
        .any(|(base, _)| bottom.iter().any(|(other, _)| eq(base, other)));
    if !shared {
        return None;
    }

    let mut merged = top;
    for (base, exponent) in bottom {
        push_factor(&mut merged, base, -exponent);
    }

    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for (base, exponent) in merged {
        match exponent {
            0 => {}
            1 => numerator.push(base),
            e if e > 0 => numerator.push(pow(base, e)),
            -1 => denominator.push(base),
            e => denominator.push(pow(base, -e)),
        }
    }

    let num = collect_operands(numerator);
    if denominator.is_empty() {
        return Some(num);
    }
    Some(T::from_division(num, collect_operands(denominator)))
}

/// Expand an operand into `(base, exponent)` factors, recursing through
/// products, divisions (sign-flipping), and powers.
fn power_factors<T: Operand>(op: &T) -> Vec<(T, i32)> {
    let mut out = Vec::new();
    collect_power_factors(op, 1, &mut out);
    out
}

fn collect_power_factors<T: Operand>(op: &T, sign: i32, out: &mut Vec<(T, i32)>) {
    if op.is_null() {
        return;
    }
    if let Some(children) = op.as_product() {
        for child in children {
            collect_power_factors(child, sign, out);
        }
    } else if let Some((dividend, divisor)) = op.as_division() {
        collect_power_factors(dividend, sign, out);
        collect_power_factors(divisor, -sign, out);
    } else if let Some((base, exponent)) = op.as_power() {
        push_factor(out, base.clone(), exponent * sign);
    } else {
        push_factor(out, op.clone(), sign);
    }
}

fn push_factor<T: Operand>(groups: &mut Vec<(T, i32)>, base: T, exponent: i32) {
    for (key, total) in groups.iter_mut() {
        if eq(key, &base) {
            *total += exponent;
            return;
        }
    }
    groups.push((base, exponent));
}

fn collect_operands<T: Operand>(mut operands: Vec<T>) -> T {
    match operands.len() {
        0 => T::null(),
        1 => operands.remove(0),
        _ => T::from_product(operands),
    }
}

// ============================================================================
// POWER
// ============================================================================

/// Raise an operand to an integer power.
///
/// Negative exponents become reciprocals, zero collapses to the identity,
/// and composite bases distribute: `(a/b)^n => a^n/b^n`,
/// `(a*b)^n => a^n*b^n`, `(a^m)^n => a^(m*n)`.
pub fn pow<T: Operand>(base: T, exponent: i32) -> T {
    if exponent < 0 {
        return divide(T::null(), pow(base, -exponent));
    }
    match exponent {
        0 => T::null(),
        1 => base,
        _ => expand_power(base, exponent),
    }
}

fn expand_power<T: Operand>(base: T, exponent: i32) -> T {
    if let Some((inner, m)) = base.as_power() {
        return pow(inner.clone(), m * exponent);
    }
    if let Some((dividend, divisor)) = base.as_division() {
        return divide(pow(dividend.clone(), exponent), pow(divisor.clone(), exponent));
    }
    if let Some(children) = base.as_product() {
        let expanded = children
            .iter()
            .map(|child| pow(child.clone(), exponent))
            .collect();
        return T::from_product(expanded);
    }
    T::from_power(base, exponent)
}

// ============================================================================
// STRUCTURAL EQUALITY & HASHING
// ============================================================================

/// Structural equality against canonical forms.
///
/// Products compare as multisets (operand order is not significant),
/// divisions compare dividend/divisor pairwise, powers compare base and
/// exponent, and anything else defers to leaf equality.
pub fn eq<T: Operand>(lhs: &T, rhs: &T) -> bool {
    match (lhs.as_product(), rhs.as_product()) {
        (Some(a), Some(b)) => return multiset_eq(a, b),
        (None, None) => {}
        _ => return false,
    }
    match (lhs.as_division(), rhs.as_division()) {
        (Some((an, ad)), Some((bn, bd))) => return eq(an, bn) && eq(ad, bd),
        (None, None) => {}
        _ => return false,
    }
    match (lhs.as_power(), rhs.as_power()) {
        (Some((ab, ae)), Some((bb, be))) => return ae == be && eq(ab, bb),
        (None, None) => {}
        _ => return false,
    }
    lhs.leaf_eq(rhs)
}

/// Multiset comparison: sort each side by hash, then pair off.
fn multiset_eq<T: Operand>(lhs: &[T], rhs: &[T]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut lhs: Vec<&T> = lhs.iter().collect();
    let mut rhs: Vec<&T> = rhs.iter().collect();
    lhs.sort_by_key(|op| hash(*op));
    rhs.sort_by_key(|op| hash(*op));
    lhs.iter().zip(rhs.iter()).all(|(a, b)| eq(*a, *b))
}

// Distinct tags per composite kind keep structurally different expressions
// from colliding (a/b vs a*b, a^2 vs a*a before reduction, etc.).
const PRODUCT_TAG: u64 = 0x9b8f_3a1c_55d2_e07f;
const DIVISION_TAG: u64 = 0x1f83_d9ab_fb41_bd6b;
const POWER_TAG: u64 = 0x5be0_cd19_137e_2179;

/// Structural hash consistent with [`eq`]: product member hashes are
/// sorted before combination so operand order cannot leak into the hash.
pub fn hash<T: Operand>(op: &T) -> u64 {
    if let Some(children) = op.as_product() {
        let mut hashes: Vec<u64> = children.iter().map(hash).collect();
        hashes.sort_unstable();
        return hashes.into_iter().fold(PRODUCT_TAG, mix);
    }
    if let Some((dividend, divisor)) = op.as_division() {
        return DIVISION_TAG ^ mix(hash(dividend), hash(divisor).rotate_left(17));
    }
    if let Some((base, exponent)) = op.as_power() {
        return POWER_TAG ^ mix(hash(base), exponent as u64);
    }
    let mut state = FxHasher::default();
    op.leaf_hash(&mut state);
    state.finish()
}

fn mix(acc: u64, h: u64) -> u64 {
    acc ^ h.wrapping_mul(0x9e37_79b9_7f4a_7c15).rotate_left(31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;

    fn l() -> Dimension {
        Dimension::LENGTH
    }

    fn t() -> Dimension {
        Dimension::TIME
    }

    fn m() -> Dimension {
        Dimension::MASS
    }

    #[test]
    fn test_multiply_identity() {
        assert_eq!(multiply(l(), Dimension::NULL), l());
        assert_eq!(multiply(Dimension::NULL, l()), l());
    }

    #[test]
    fn test_multiply_commutes() {
        let ab = multiply(l(), t());
        let ba = multiply(t(), l());
        assert_eq!(ab, ba);
        assert_eq!(hash(&ab), hash(&ba));
    }

    #[test]
    fn test_multiply_flattens() {
        let left = multiply(l(), multiply(t(), m()));
        let right = multiply(multiply(l(), t()), m());
        assert_eq!(left, right);
        // Products never nest inside products.
        let operands = left.as_product().unwrap();
        assert_eq!(operands.len(), 3);
        assert!(operands.iter().all(|op| op.as_product().is_none()));
    }

    #[test]
    fn test_repeated_factor_collapses() {
        assert_eq!(multiply(l(), l()), pow(l(), 2));
        assert_eq!(multiply(l(), pow(l(), 2)), pow(l(), 3));
    }

    #[test]
    fn test_division_identity() {
        assert_eq!(divide(l(), Dimension::NULL), l());
    }

    #[test]
    fn test_full_cancellation() {
        assert_eq!(divide(l(), l()), Dimension::NULL);
    }

    #[test]
    fn test_partial_cancellation() {
        assert_eq!(divide(pow(l(), 3), l()), pow(l(), 2));
    }

    #[test]
    fn test_cancellation_into_reciprocal() {
        let reciprocal = divide(l(), pow(l(), 3));
        assert_eq!(reciprocal, divide(Dimension::NULL, pow(l(), 2)));
    }

    #[test]
    fn test_division_pushed_outward() {
        // a*(b/c) => (a*b)/c
        let result = multiply(l(), divide(t(), m()));
        assert_eq!(result, divide(multiply(l(), t()), m()));
        // (a/b)*(c/d) => (a*c)/(b*d)
        let result = multiply(divide(l(), t()), divide(m(), Dimension::TEMPERATURE));
        assert_eq!(
            result,
            divide(
                multiply(l(), m()),
                multiply(t(), Dimension::TEMPERATURE)
            )
        );
    }

    #[test]
    fn test_division_of_divisions() {
        // (a/b)/(c/d) => (a*d)/(b*c)
        let result = divide(divide(l(), m()), divide(Dimension::CURRENT, t()));
        assert_eq!(
            result,
            divide(multiply(l(), t()), multiply(m(), Dimension::CURRENT))
        );
    }

    #[test]
    fn test_pow_special_cases() {
        assert_eq!(pow(l(), 0), Dimension::NULL);
        assert_eq!(pow(l(), 1), l());
        assert_eq!(pow(l(), -2), divide(Dimension::NULL, pow(l(), 2)));
    }

    #[test]
    fn test_pow_distributes() {
        assert_eq!(pow(pow(l(), 2), 3), pow(l(), 6));
        assert_eq!(
            pow(divide(l(), t()), 2),
            divide(pow(l(), 2), pow(t(), 2))
        );
        let squared = pow(multiply(l(), t()), 2);
        assert_eq!(squared, multiply(pow(l(), 2), pow(t(), 2)));
    }

    #[test]
    fn test_hash_distinguishes_composite_kinds() {
        assert_ne!(hash(&divide(l(), t())), hash(&multiply(l(), t())));
        assert_ne!(hash(&pow(l(), 2)), hash(&multiply(l(), t())));
        assert_ne!(hash(&divide(l(), t())), hash(&divide(t(), l())));
    }
}
