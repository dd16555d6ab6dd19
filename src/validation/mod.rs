//! Polygon topology validation
//!
//! [`TopologyValidator`] runs a fixed-order pipeline of checks and stops at
//! the first failure. Later checks rely on what earlier ones established
//! (winding needs a closed ring of at least four points, and so on), so the
//! order is part of the contract.

mod outcome;
mod pipeline;
mod ring;
mod topology;

pub use outcome::{FailureCategory, RingRole, ValidationFailure, ValidationOutcome};
pub use pipeline::TopologyValidator;
