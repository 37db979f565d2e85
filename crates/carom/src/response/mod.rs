use carom_macro_tools::{Builder, Fields};

use crate::{
    collision::{find_contact, Collider, Contact},
    element::ID,
    errors::{
        ensure_positive, ensure_unit_interval, CollisionError, SimulationError, SimulationResult,
    },
    math::{num::limit_at_range, point::Point, vector::Vector, FloatNum},
    meta::Meta,
    shape::CenterPoint,
};

pub trait ImpulseObject: CenterPoint {
    // debug only
    fn id(&self) -> ID {
        0
    }

    fn meta(&self) -> &Meta;

    fn meta_mut(&mut self) -> &mut Meta;

    /// velocity of a point rigidly attached to the object, `v + ω × r`
    fn compute_point_velocity(&self, point: &Point) -> Vector;
}

/// Tuning of the impulse response. The speed scales are in simulation units,
/// chosen for looks rather than derived.
#[derive(Clone, Copy, Debug, Builder, Fields)]
#[r]
pub struct ResolveParameters {
    // nominal restitution, 0 inelastic .. 1 elastic
    #[default = 0.5]
    restitution: FloatNum,
    // contact speed at which the nominal restitution is reached
    #[default = 5.]
    restitution_speed_scale: FloatNum,
    #[default = 0.8]
    max_angle_velocity: FloatNum,
    #[default = 1.3]
    side_impact_gain: FloatNum,
    // contact speed at which the side impact gain is reached
    #[default = 8.]
    side_impact_speed_scale: FloatNum,
}

impl ResolveParameters {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_unit_interval("restitution", self.restitution)?;
        ensure_positive("restitution_speed_scale", self.restitution_speed_scale)?;
        ensure_positive("max_angle_velocity", self.max_angle_velocity)?;
        ensure_positive("side_impact_speed_scale", self.side_impact_speed_scale)?;
        if !(self.side_impact_gain.is_finite() && self.side_impact_gain >= 0.) {
            return Err(SimulationError::invalid(
                "side_impact_gain",
                self.side_impact_gain,
                "must be finite and >= 0",
            ));
        }
        Ok(())
    }

    pub fn set_restitution(&mut self, restitution: FloatNum) -> SimulationResult<&mut Self> {
        ensure_unit_interval("restitution", restitution)?;
        self.restitution = restitution;
        Ok(self)
    }

    /// restitution scaled down for slow contacts
    pub fn effective_restitution(&self, contact_speed: FloatNum) -> FloatNum {
        self.restitution * (contact_speed / self.restitution_speed_scale).min(1.)
    }
}

/// Hint from the caller about the kind of impact being simulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImpactHint {
    #[default]
    Direct,
    /// off axis hit, spin gets exaggerated after the physical response
    SideImpact,
}

impl ImpactHint {
    /// Factor applied to both angle velocities after the impulse, if any.
    pub fn angular_gain(
        &self,
        contact_speed: FloatNum,
        parameters: &ResolveParameters,
    ) -> Option<FloatNum> {
        match self {
            ImpactHint::Direct => None,
            ImpactHint::SideImpact => {
                let speed_factor =
                    (contact_speed / parameters.side_impact_speed_scale()).min(1.);
                Some(parameters.side_impact_gain() * speed_factor)
            }
        }
    }
}

/// What a single collision response did, for diagnostics.
#[derive(Clone, Copy, Debug, Fields)]
#[r(copy)]
pub struct Resolution {
    contact: Contact,
    // signed magnitude of the impulse along the contact normal
    impulse: FloatNum,
    effective_restitution: FloatNum,
    // positive while A moves toward B at the contact point
    relative_normal_velocity: FloatNum,
    // |v_a - v_b| at the contact point
    contact_speed: FloatNum,
}

pub fn compute_inv_mass_effective<Obj: ImpulseObject>(
    &normal: &Vector,
    object_pair: (&Obj, &Obj),
    r_a: Vector,
    r_b: Vector,
) -> FloatNum {
    let (obj_a, obj_b) = object_pair;
    let meta_a = obj_a.meta();
    let meta_b = obj_b.meta();

    meta_a.inv_mass()
        + meta_b.inv_mass()
        + (r_a ^ normal).powi(2) * meta_a.inv_moment_of_inertia()
        + (r_b ^ normal).powi(2) * meta_b.inv_moment_of_inertia()
}

/**
 * Single shot impulse response for two overlapping objects.
 *
 * With n the unit normal from A to B and r the contact offsets:
 *
 * v_rel = ((v_a + ω_a × r_a) - (v_b + ω_b × r_b)) · n
 * j = -(1 + e) * v_rel / (1/m_a + 1/m_b + (r_a × n)²/I_a + (r_b × n)²/I_b)
 *
 * A receives `j * n` at r_a and B receives `-j * n` at r_b, so linear momentum
 * is conserved. `e` is the restitution scaled by the contact speed.
 * Separating contacts (v_rel < 0) are resolved the same way, no early exit.
 *
 * Afterwards the hint may amplify the spin, then both angle velocities are
 * clamped to `max_angle_velocity`.
 */
pub fn resolve_collision<Obj>(
    obj_a: &mut Obj,
    obj_b: &mut Obj,
    parameters: &ResolveParameters,
    hint: ImpactHint,
) -> Result<Resolution, CollisionError>
where
    Obj: ImpulseObject + Collider,
{
    let contact = find_contact(&*obj_a, &*obj_b)?;

    let normal = contact.normal();
    let point = contact.point();
    let r_a = contact.r_a();
    let r_b = contact.r_b();

    let relative_velocity =
        obj_a.compute_point_velocity(&point) - obj_b.compute_point_velocity(&point);
    let relative_normal_velocity = relative_velocity * normal;
    let contact_speed = relative_velocity.abs();

    let effective_restitution = parameters.effective_restitution(contact_speed);

    let inv_mass_effective = compute_inv_mass_effective(&normal, (&*obj_a, &*obj_b), r_a, r_b);

    let impulse = -(1. + effective_restitution) * relative_normal_velocity / inv_mass_effective;

    obj_a.meta_mut().apply_impulse(normal * impulse, r_a);
    obj_b.meta_mut().apply_impulse(-(normal * impulse), r_b);

    if let Some(gain) = hint.angular_gain(contact_speed, parameters) {
        *obj_a.meta_mut().angle_velocity_mut() *= gain;
        *obj_b.meta_mut().angle_velocity_mut() *= gain;
    }

    let max_angle_velocity = parameters.max_angle_velocity();
    for meta in [obj_a.meta_mut(), obj_b.meta_mut()] {
        let angle_velocity = meta.angle_velocity();
        *meta.angle_velocity_mut() =
            limit_at_range(angle_velocity, -max_angle_velocity..=max_angle_velocity);
    }

    Ok(Resolution {
        contact,
        impulse,
        effective_restitution,
        relative_normal_velocity,
        contact_speed,
    })
}
