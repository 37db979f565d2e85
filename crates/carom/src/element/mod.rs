pub(crate) mod store;

use carom_macro_tools::{Builder, Fields};

use crate::{
    collision::Collider,
    errors::{ensure_positive, ensure_unit_interval, SimulationError, SimulationResult},
    math::{
        point::Point,
        vector::{Vector, Vector3},
        FloatNum,
    },
    meta::{Angle, Mass, Meta, Transform},
    response::ImpulseObject,
    scene::context::Bounds,
    shape::{CenterPoint, ComputeMomentOfInertia, Rect},
};

pub type ID = u32;

/// Per tick multiplicative decay of the angle velocity, raised to `dt`.
pub const ANGULAR_DECAY: FloatNum = 0.98;

/// Everything needed to construct a [`RigidBody`]. Validation happens in
/// [`RigidBody::new`].
#[derive(Clone, Debug, Builder, Fields)]
#[r]
pub struct BodyConfig {
    #[r(copy)]
    position: Point,
    #[r(copy)]
    #[default((1., 1.))]
    size: (FloatNum, FloatNum),
    #[default = 1.]
    mass: Mass,
    #[r(copy)]
    velocity: Vector,
    #[r(copy)]
    angle: Angle,
    angle_velocity: FloatNum,
    #[r(copy)]
    factor_friction: Option<FloatNum>,
}

/// Oriented rectangular rigid body.
#[derive(Clone, Debug, Fields)]
#[r]
pub struct RigidBody {
    id: ID,
    meta: Meta,
    shape: Rect,
    #[r(copy)]
    transform: Transform,
}

/// `createBody(position, size, mass, initialVelocity, initialAngle)`
pub fn create_body(
    position: impl Into<Point>,
    size: (FloatNum, FloatNum),
    mass: Mass,
    velocity: impl Into<Vector>,
    angle: Angle,
) -> SimulationResult<RigidBody> {
    RigidBody::new(
        BodyConfigBuilder::new()
            .position(position.into())
            .size(size)
            .mass(mass)
            .velocity(velocity.into())
            .angle(angle),
    )
}

impl RigidBody {
    pub fn new(config: impl Into<BodyConfig>) -> SimulationResult<Self> {
        let config: BodyConfig = config.into();

        ensure_positive("mass", config.mass)?;

        let (width, height) = config.size;
        let shape = Rect::new(width, height)?;

        if !config.position.is_finite() {
            return Err(SimulationError::invalid(
                "position",
                FloatNum::NAN,
                "must be finite",
            ));
        }

        if !config.velocity.is_finite() {
            return Err(SimulationError::invalid(
                "velocity",
                FloatNum::NAN,
                "must be finite",
            ));
        }

        if !config.angle.is_finite() || !config.angle_velocity.is_finite() {
            return Err(SimulationError::invalid(
                "angle",
                config.angle,
                "angle and angle velocity must be finite",
            ));
        }

        if let Some(friction) = config.factor_friction {
            ensure_unit_interval("factor_friction", friction)?;
        }

        let moment_of_inertia = shape.compute_moment_of_inertia(config.mass);

        let meta = Meta::new(
            config.mass,
            moment_of_inertia,
            config.velocity,
            config.angle_velocity,
            config.factor_friction,
        );

        Ok(Self {
            id: 0,
            meta,
            shape,
            transform: (config.position, config.angle).into(),
        })
    }

    pub(crate) fn inject_id(&mut self, id: ID) {
        self.id = id
    }

    pub(crate) fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.transform.position()
    }

    #[inline]
    pub fn orientation(&self) -> Angle {
        self.transform.rotation()
    }

    #[inline]
    pub fn velocity(&self) -> Vector {
        self.meta.velocity()
    }

    #[inline]
    pub fn angle_velocity(&self) -> FloatNum {
        self.meta.angle_velocity()
    }

    #[inline]
    pub fn mass(&self) -> Mass {
        self.meta.mass()
    }

    #[inline]
    pub fn moment_of_inertia(&self) -> Mass {
        self.meta.moment_of_inertia()
    }

    pub fn size(&self) -> (FloatNum, FloatNum) {
        (self.shape.width(), self.shape.height())
    }

    /// world space corners, recomputed on every call
    pub fn corner_points(&self) -> [Point; 4] {
        self.shape.corners(&self.transform)
    }

    /// linear momentum, `mass * velocity`
    pub fn motion(&self) -> Vector {
        self.meta.motion()
    }

    pub fn kinetic_energy(&self) -> FloatNum {
        self.meta.compute_kinetic_energy()
    }

    /// Advance position and orientation by `dt`, then decay the velocities.
    ///
    /// Friction is exponential: the linear velocity is scaled by
    /// `friction ^ dt` and the angle velocity by [`ANGULAR_DECAY`]` ^ dt`, so the
    /// same total time gives the same decay whatever the tick length.
    /// `friction` must already be validated to `[0, 1]`.
    pub fn integrate(&mut self, dt: FloatNum, friction: FloatNum) -> SimulationResult<()> {
        ensure_positive("dt", dt)?;
        debug_assert!(
            (0. ..=1.).contains(&friction),
            "friction {friction} should be validated before stepping"
        );

        let path = self.velocity() * dt;
        let rad = self.angle_velocity() * dt;
        self.transform.advance(path, rad);

        let linear_decay = friction.powf(dt);
        let angular_decay = ANGULAR_DECAY.powf(dt);

        let meta = self.meta_mut();
        *meta.velocity_mut() *= linear_decay;
        *meta.angle_velocity_mut() *= angular_decay;

        Ok(())
    }

    /// Clamp the center back into `bounds`, bouncing off every crossed edge.
    /// Each axis is handled on its own; returns whether any edge was hit.
    pub fn reflect_off_bounds(&mut self, bounds: &Bounds) -> bool {
        let restitution = bounds.restitution();
        let (min, max) = (bounds.min(), bounds.max());
        let mut position = self.position();
        let mut velocity = self.velocity();
        let mut angle_velocity = self.angle_velocity();
        let mut is_reflected = false;

        let mut reflect = |coordinate: &mut FloatNum,
                           speed: &mut FloatNum,
                           low: FloatNum,
                           high: FloatNum| {
            let limit = if *coordinate < low {
                low
            } else if *coordinate > high {
                high
            } else {
                return;
            };
            *coordinate = limit;
            *speed *= -restitution;
            angle_velocity *= restitution;
            is_reflected = true;
        };

        let (mut x, mut y) = (position.x(), position.y());
        let (mut vx, mut vy) = (velocity.x(), velocity.y());
        reflect(&mut x, &mut vx, min.x(), max.x());
        reflect(&mut y, &mut vy, min.y(), max.y());

        if is_reflected {
            position = Point::new(x, y);
            velocity = Vector::new(vx, vy);
            log::trace!(
                "body {} reflected off bounds at ({x}, {y}), velocity {velocity}",
                self.id
            );
            *self.transform.position_mut() = position;
            let meta = self.meta_mut();
            *meta.velocity_mut() = velocity;
            *meta.angle_velocity_mut() = angle_velocity;
        }

        is_reflected
    }
}

impl CenterPoint for RigidBody {
    fn center_point(&self) -> Point {
        self.position()
    }
}

impl Collider for RigidBody {
    fn vertices(&self) -> Vec<Point> {
        self.corner_points().to_vec()
    }
}

impl ImpulseObject for RigidBody {
    fn id(&self) -> ID {
        self.id
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    fn compute_point_velocity(&self, point: &Point) -> Vector {
        let r: Vector = (self.position(), *point).into();
        let w: Vector3 = (0., 0., self.angle_velocity()).into();
        let mut v: Vector = (w ^ r.into()).into();
        v += self.velocity();
        v
    }
}
