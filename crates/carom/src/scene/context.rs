use carom_macro_tools::{Builder, Fields};

use crate::{
    errors::{ensure_unit_interval, SimulationError, SimulationResult},
    math::{point::Point, FloatNum},
    response::{ImpactHint, ResolveParameters},
};

/// Rectangular domain the body centers are kept in.
#[derive(Clone, Copy, Debug, PartialEq, Fields)]
#[r]
pub struct Bounds {
    #[r(copy)]
    min: Point,
    #[r(copy)]
    max: Point,
    // applied to the reflected velocity component and the angle velocity
    restitution: FloatNum,
}

impl Bounds {
    pub const DEFAULT_RESTITUTION: FloatNum = 0.7;

    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> SimulationResult<Self> {
        let (min, max) = (min.into(), max.into());
        if !(min.is_finite() && max.is_finite()) {
            return Err(SimulationError::invalid(
                "bounds",
                FloatNum::NAN,
                "corners must be finite",
            ));
        }
        if min.x() >= max.x() {
            return Err(SimulationError::invalid(
                "bounds.max.x",
                max.x(),
                "must be greater than min.x",
            ));
        }
        if min.y() >= max.y() {
            return Err(SimulationError::invalid(
                "bounds.max.y",
                max.y(),
                "must be greater than min.y",
            ));
        }
        Ok(Self {
            min,
            max,
            restitution: Self::DEFAULT_RESTITUTION,
        })
    }

    pub fn with_restitution(mut self, restitution: FloatNum) -> SimulationResult<Self> {
        ensure_unit_interval("bounds.restitution", restitution)?;
        self.restitution = restitution;
        Ok(self)
    }
}

#[derive(Clone, Debug, Fields, Builder)]
#[r]
/// parameters shared by every body of a scene
pub struct Context {
    // linear velocity keeps `default_friction ^ dt` of itself per tick, 1 means no friction
    #[default = 1.]
    default_friction: FloatNum,
    #[r(copy)]
    impact_hint: ImpactHint,
    #[r(copy)]
    bounds: Option<Bounds>,
    resolve_parameters: ResolveParameters,
}

impl Context {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_unit_interval("default_friction", self.default_friction)?;
        self.resolve_parameters.validate()?;
        if let Some(bounds) = self.bounds {
            ensure_unit_interval("bounds.restitution", bounds.restitution())?;
        }
        Ok(())
    }

    pub fn restitution(&self) -> FloatNum {
        self.resolve_parameters.restitution()
    }

    /// friction of one body, its own override wins over the scene default
    pub fn friction_for(&self, factor_friction: Option<FloatNum>) -> FloatNum {
        factor_friction.unwrap_or(self.default_friction)
    }
}

impl ContextBuilder {
    pub fn build(self) -> SimulationResult<Context> {
        let context: Context = self.into();
        context.validate()?;
        Ok(context)
    }
}
