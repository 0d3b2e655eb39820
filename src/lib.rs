//! Runtime dimensional analysis with quantity-kind safety.
//!
//! `metron` keeps symbolic unit and dimension expressions in a canonical
//! algebraic form and layers a semantic *quantity kind* system on top, so
//! that dimensionally identical but physically distinct values (energy
//! and torque, absolute and relative temperature) cannot be mixed by
//! accident.
//!
//! # Key pieces
//!
//! - **Operand algebra**: `*`, `/`, `^` over units and dimensions with
//!   rearrangement, factor cancellation, and order-insensitive
//!   equality/hashing ([`algebra`], [`unit`], [`dimension`]).
//! - **Scale-factor contract**: leaves expose linear factors (affine
//!   temperature leaves also an offset); [`convert`] turns two compatible
//!   units into a value transform. The core performs no other numeric
//!   conversion.
//! - **Quantity kinds**: immutable semantic tags with safety flags
//!   ([`kind`]) and a rule-based inference registry for cross-kind
//!   multiplication and division ([`inference`]).
//! - **Values**: [`measurement::Measurement`] pairs a scalar with a unit;
//!   [`quantity::Quantity`] adds the kind and gates every operator.
//!
//! # Example
//!
//! ```
//! use metron::prelude::*;
//!
//! let force = Quantity::of(10.0, si::newton(), &kind::FORCE)?;
//! let distance = Quantity::of(2.0, si::metre(), &kind::LENGTH)?;
//! let work = force.mul(&distance)?;
//! assert_eq!(work.kind().name(), "Energy");
//! assert_eq!(work.value(), 20.0);
//! # Ok::<(), metron::Error>(())
//! ```
//!
//! All core types are immutable once constructed and safe for unrestricted
//! concurrent reads. The only mutable shared state is the process-wide
//! inference registry, which is meant to be populated during
//! single-threaded startup and then sealed.

pub mod algebra;
pub mod convert;
pub mod dimension;
pub mod error;
pub mod inference;
pub mod kind;
pub mod measurement;
pub mod numeric;
pub mod prefix;
pub mod quantity;
pub mod systems;
pub mod unit;

pub use convert::LinearTransform;
pub use dimension::{BaseDimension, Dimension};
pub use error::Error;
pub use inference::{InferenceOperator, InferenceRegistry, QuantityKindInference};
pub use kind::QuantityKind;
pub use measurement::Measurement;
pub use numeric::Scalar;
pub use prefix::Prefix;
pub use quantity::Quantity;
pub use systems::System;
pub use unit::Unit;

/// Common imports for working with quantities.
pub mod prelude {
    pub use crate::algebra::Operand;
    pub use crate::dimension::{BaseDimension, Dimension};
    pub use crate::error::Error;
    pub use crate::inference::{InferenceOperator, InferenceRegistry, QuantityKindInference};
    pub use crate::kind::{self, QuantityKind};
    pub use crate::measurement::Measurement;
    pub use crate::prefix;
    pub use crate::quantity::Quantity;
    pub use crate::systems::{cgs, imperial, si, System};
    pub use crate::unit::Unit;
}
