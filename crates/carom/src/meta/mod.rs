use carom_macro_tools::{Deref, Fields};

use crate::math::{point::Point, vector::Vector, FloatNum};

pub type Mass = FloatNum;

pub type Angle = FloatNum;

pub type Speed = Vector;

/// Placement of a body: center of mass and orientation in radians.
/// The orientation is accumulated, never wrapped into a fixed range.
#[derive(Default, Clone, Copy, Fields, Debug, PartialEq)]
#[w]
pub struct Transform {
    #[r(copy)]
    position: Point,
    #[r(copy)]
    rotation: Angle,
}

impl From<(Point, Angle)> for Transform {
    fn from((position, rotation): (Point, Angle)) -> Self {
        Self { position, rotation }
    }
}

impl Transform {
    pub fn split(&self) -> (Point, Angle) {
        (self.position, self.rotation)
    }

    pub(crate) fn advance(&mut self, path: Vector, rad: Angle) {
        self.position += path;
        self.rotation += rad;
    }
}

#[derive(Deref, Clone, Copy, Debug)]
struct ValueWithInv {
    #[deref]
    value: FloatNum,
    inv: FloatNum,
}

impl ValueWithInv {
    fn new(value: FloatNum) -> Self {
        Self {
            value,
            inv: value.recip(),
        }
    }

    fn inv(&self) -> FloatNum {
        self.inv
    }
}

/// Dynamic state of a rigid body. Mass and moment of inertia are fixed once
/// the body exists; a different mass needs a new body.
#[derive(Clone, Fields, Debug)]
#[r]
pub struct Meta {
    #[w]
    #[r(copy)]
    velocity: Speed,
    #[shared(skip)]
    mass: ValueWithInv,
    #[shared(skip)]
    moment_of_inertia: ValueWithInv,
    #[w]
    angle_velocity: FloatNum,
    // overrides the scene friction for this body
    #[r(copy)]
    factor_friction: Option<FloatNum>,
}

impl Meta {
    pub(crate) fn new(
        mass: Mass,
        moment_of_inertia: Mass,
        velocity: Speed,
        angle_velocity: FloatNum,
        factor_friction: Option<FloatNum>,
    ) -> Self {
        Self {
            velocity,
            mass: ValueWithInv::new(mass),
            moment_of_inertia: ValueWithInv::new(moment_of_inertia),
            angle_velocity,
            factor_friction,
        }
    }

    pub fn mass(&self) -> Mass {
        *self.mass
    }

    pub fn inv_mass(&self) -> Mass {
        self.mass.inv()
    }

    pub fn moment_of_inertia(&self) -> Mass {
        *self.moment_of_inertia
    }

    pub fn inv_moment_of_inertia(&self) -> Mass {
        self.moment_of_inertia.inv()
    }

    /// linear momentum
    pub fn motion(&self) -> Vector {
        self.velocity() * self.mass()
    }

    // r is vector from center of mass to the point the impulse acts on
    pub fn apply_impulse(&mut self, impulse: Vector, r: Vector) {
        let inv_mass = self.inv_mass();

        *self.velocity_mut() += impulse * inv_mass;

        let inv_moment_of_inertia = self.inv_moment_of_inertia();

        *self.angle_velocity_mut() += (r ^ impulse) * inv_moment_of_inertia;
    }

    pub fn compute_kinetic_energy(&self) -> FloatNum {
        let velocity = self.velocity();
        let velocity_square = velocity * velocity;

        let angle_velocity = self.angle_velocity();
        let angle_velocity_square = angle_velocity * angle_velocity;

        0.5 * (self.mass() * velocity_square + self.moment_of_inertia() * angle_velocity_square)
    }
}

#[cfg(test)]
mod tests {
    use super::Meta;
    use crate::math::vector::Vector;

    #[test]
    fn test_apply_impulse_changes_velocity_and_spin() {
        let mut meta = Meta::new(2., 4., (0., 0.).into(), 0., None);
        meta.apply_impulse((4., 0.).into(), (0., -1.).into());
        assert_eq!(meta.velocity(), Vector::new(2., 0.));
        // (0, -1) ^ (4, 0) = 0 * 0 - (-1) * 4
        assert_eq!(meta.angle_velocity(), 1.);
    }

    #[test]
    fn test_kinetic_energy_sums_linear_and_angular() {
        let meta = Meta::new(2., 4., (3., 4.).into(), 0.5, None);
        assert_eq!(meta.compute_kinetic_energy(), 0.5 * (2. * 25. + 4. * 0.25));
        assert_eq!(meta.motion(), Vector::new(6., 8.));
    }
}
