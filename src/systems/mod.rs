//! Unit systems and their leaf tables.
//!
//! The tables are static data: every function builds a fresh expression
//! from the public constructors, so callers own their trees and the core
//! keeps no hidden state.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod cgs;
pub mod imperial;
pub mod si;

/// The system a basic unit belongs to. Scaled, prefixed, and derived
/// units inherit the system of their base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum System {
    Si,
    Imperial,
    Cgs,
}

impl System {
    pub const fn name(self) -> &'static str {
        match self {
            System::Si => "SI",
            System::Imperial => "Imperial",
            System::Cgs => "CGS",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
