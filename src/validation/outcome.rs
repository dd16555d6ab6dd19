use thiserror::Error;

use crate::backend::BackendError;
use crate::geometry::Winding;

/// Which ring of a polygon a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingRole {
    Exterior,
    Interior(usize),
}

impl std::fmt::Display for RingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RingRole::Exterior => write!(f, "Exterior ring"),
            RingRole::Interior(i) => write!(f, "Interior ring {}", i),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// Malformed input: missing ring, too few points, unclosed, non-finite
    Structural,
    /// Degenerate or mis-oriented ring
    Geometric,
    /// Relationship between rings, or rejected by the validity oracle
    Topology,
    /// The geometry backend itself failed
    Backend,
}

/// First rule a polygon violated. The `Display` text is the reason reported
/// to users.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    #[error("Missing exterior ring")]
    MissingExterior,

    #[error("{ring} has fewer than 4 points ({count})")]
    TooFewPoints { ring: RingRole, count: usize },

    #[error("{ring} is not closed (first != last point)")]
    NotClosed { ring: RingRole },

    #[error("{ring} has non-finite coordinates at vertex {index}")]
    NonFiniteCoordinate { ring: RingRole, index: usize },

    #[error("{ring} has fewer than 3 distinct vertices ({distinct})")]
    TooFewDistinctVertices { ring: RingRole, distinct: usize },

    #[error("{ring} has consecutive duplicate points at vertex {index}")]
    ConsecutiveDuplicate { ring: RingRole, index: usize },

    #[error("{ring} is collinear (encloses no area)")]
    Collinear { ring: RingRole },

    #[error("{ring} has wrong winding order: expected {expected}, found {actual}")]
    WrongWinding {
        ring: RingRole,
        expected: Winding,
        actual: Winding,
    },

    #[error("Interior rings {first} and {second} overlap")]
    HolesOverlap { first: usize, second: usize },

    #[error("Interior ring {hole} is not contained in the exterior ring")]
    HoleNotContained { hole: usize },

    #[error("Interior ring {hole} touches the exterior ring")]
    HoleTouchesExterior { hole: usize },

    #[error("Interior rings {first} and {second} intersect")]
    HolesIntersect { first: usize, second: usize },

    #[error("Topology check failed (self-intersection or other topology issue)")]
    TopologyRejected,

    #[error("Geometry backend failure: {0}")]
    Backend(#[from] BackendError),
}

impl ValidationFailure {
    pub fn category(&self) -> FailureCategory {
        use ValidationFailure::*;
        match self {
            MissingExterior | TooFewPoints { .. } | NotClosed { .. } | NonFiniteCoordinate { .. } => {
                FailureCategory::Structural
            }
            TooFewDistinctVertices { .. }
            | ConsecutiveDuplicate { .. }
            | Collinear { .. }
            | WrongWinding { .. } => FailureCategory::Geometric,
            HolesOverlap { .. }
            | HoleNotContained { .. }
            | HoleTouchesExterior { .. }
            | HolesIntersect { .. }
            | TopologyRejected => FailureCategory::Topology,
            Backend(_) => FailureCategory::Backend,
        }
    }
}

/// Verdict for one polygon: valid, or the first failure found
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    failure: Option<ValidationFailure>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self { failure: None }
    }

    pub fn invalid(failure: ValidationFailure) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&ValidationFailure> {
        self.failure.as_ref()
    }

    pub fn reason(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    /// True when the backend broke down rather than judging the polygon
    pub fn is_backend_error(&self) -> bool {
        matches!(self.failure, Some(ValidationFailure::Backend(_)))
    }
}

impl From<Result<(), ValidationFailure>> for ValidationOutcome {
    fn from(result: Result<(), ValidationFailure>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(failure) => Self::invalid(failure),
        }
    }
}
