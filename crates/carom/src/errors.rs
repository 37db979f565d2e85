use crate::{element::ID, math::FloatNum};

/// Geometry that the collision layer refuses to work with. Only reachable from
/// bodies that already violate construction invariants, so a step skips the
/// pair instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CollisionError {
    #[error("centers of both bodies coincide, collision normal is undefined")]
    CoincidentCenters,
    #[error("polygon edge {edge_index} has zero length, separating axis is undefined")]
    DegenerateAxis { edge_index: usize },
    #[error("a convex polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("no finite pair of nearest corners")]
    NoContactPoint,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SimulationError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: FloatNum,
        reason: &'static str,
    },
    #[error("no body with id {0}")]
    UnknownBody(ID),
    #[error("body ids exhausted")]
    IdsExhausted,
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] CollisionError),
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, value: FloatNum, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;

// shared checks for parameters that must live inside [0, 1]
pub(crate) fn ensure_unit_interval(name: &'static str, value: FloatNum) -> SimulationResult<()> {
    if (0. ..=1.).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::invalid(name, value, "must be within [0, 1]"))
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: FloatNum) -> SimulationResult<()> {
    if crate::math::num::is_finite_positive(value) {
        Ok(())
    } else {
        Err(SimulationError::invalid(name, value, "must be finite and > 0"))
    }
}
