pub mod context;
pub(crate) mod hooks;

use carom_macro_tools::Fields;

use crate::{
    collision::{detect_overlap, overlaps},
    element::{self, store::BodyStore, RigidBody, ID},
    errors::{ensure_positive, SimulationError, SimulationResult},
    math::{point::Point, vector::Vector, FloatNum},
    meta::{Angle, Mass},
    response::{resolve_collision, Resolution},
    scenario::{Scenario, ScenarioParameters},
};

use self::{context::Context, hooks::CallbackHook};

/// Counters of one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Fields)]
#[r]
pub struct TickReport {
    resolved: usize,
    // pairs dropped for this tick because of degenerate geometry
    skipped: usize,
}

/**
 * Advance `bodies` by `dt`.
 *
 * Every body is integrated and bounced off the context bounds first, then
 * each unordered pair (i < j, slice order) is tested once and resolved at
 * most once. Penetration is never corrected positionally, only velocities
 * change, so overlap can persist for a few ticks.
 */
pub fn step(
    bodies: &mut [RigidBody],
    context: &Context,
    dt: FloatNum,
) -> SimulationResult<TickReport> {
    step_with(bodies, context, dt, |_, _, _| {})
}

/// [`step`] with a listener invoked after each resolved pair.
pub fn step_with<F>(
    bodies: &mut [RigidBody],
    context: &Context,
    dt: FloatNum,
    mut on_collision: F,
) -> SimulationResult<TickReport>
where
    F: FnMut(ID, ID, &Resolution),
{
    ensure_positive("dt", dt)?;
    context.validate()?;

    let bounds = context.bounds();
    for body in bodies.iter_mut() {
        let friction = context.friction_for(body.meta().factor_friction());
        body.integrate(dt, friction)?;
        if let Some(bounds) = bounds.as_ref() {
            body.reflect_off_bounds(bounds);
        }
    }

    let mut report = TickReport::default();

    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let body_a = &mut head[i];
        for body_b in tail.iter_mut() {
            match resolve_pair(body_a, body_b, context) {
                Ok(Some(resolution)) => {
                    report.resolved += 1;
                    on_collision(body_a.id(), body_b.id(), &resolution);
                }
                Ok(None) => {}
                Err(err) => {
                    log::warn!(
                        "skip pair ({}, {}) this tick: {err}",
                        body_a.id(),
                        body_b.id()
                    );
                    report.skipped += 1;
                }
            }
        }
    }

    Ok(report)
}

fn resolve_pair(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    context: &Context,
) -> SimulationResult<Option<Resolution>> {
    if !detect_overlap(&*body_a, &*body_b)? {
        return Ok(None);
    }

    let motion_before = body_a.motion() + body_b.motion();

    let resolution = resolve_collision(
        body_a,
        body_b,
        context.resolve_parameters(),
        context.impact_hint(),
    )?;

    let motion_after = body_a.motion() + body_b.motion();
    log::debug!(
        "resolved ({}, {}): j = {}, e = {}, momentum {} -> {}",
        body_a.id(),
        body_b.id(),
        resolution.impulse(),
        resolution.effective_restitution(),
        motion_before,
        motion_after
    );

    Ok(Some(resolution))
}

#[derive(Debug, Default)]
struct IDDispatcher {
    current_id: ID,
}

impl IDDispatcher {
    fn gen_id(&mut self) -> SimulationResult<ID> {
        self.current_id = self
            .current_id
            .checked_add(1)
            .ok_or(SimulationError::IdsExhausted)?;
        Ok(self.current_id)
    }

    fn reset(&mut self) {
        self.current_id = 0;
    }
}

/// Simulation context: owns the bodies and the parameters they are stepped with.
#[derive(Debug, Default)]
pub struct Scene {
    element_store: BodyStore,
    id_dispatcher: IDDispatcher,
    context: Context,
    frame_count: u128,
    total_duration: FloatNum,
    callback_hook: CallbackHook,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            element_store: BodyStore::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Take ownership of `body` and give it a fresh id.
    pub fn push_body(&mut self, body: impl Into<RigidBody>) -> SimulationResult<ID> {
        let mut body: RigidBody = body.into();
        let id = self.id_dispatcher.gen_id()?;
        body.inject_id(id);
        self.element_store.push(body);
        Ok(id)
    }

    pub fn create_body(
        &mut self,
        position: impl Into<Point>,
        size: (FloatNum, FloatNum),
        mass: Mass,
        velocity: impl Into<Vector>,
        angle: Angle,
    ) -> SimulationResult<ID> {
        let body = element::create_body(position, size, mass, velocity, angle)?;
        self.push_body(body)
    }

    #[inline]
    pub fn has_body(&self, id: ID) -> bool {
        self.element_store.has_element(id)
    }

    pub fn remove_body(&mut self, id: ID) -> SimulationResult<RigidBody> {
        self.element_store
            .remove_element(id)
            .ok_or(SimulationError::UnknownBody(id))
    }

    #[inline]
    pub fn body(&self, id: ID) -> Option<&RigidBody> {
        self.element_store.get_element_by_id(id)
    }

    #[inline]
    pub fn body_mut(&mut self, id: ID) -> Option<&mut RigidBody> {
        self.element_store.get_mut_element_by_id(id)
    }

    #[inline]
    pub fn bodies_iter(&self) -> impl Iterator<Item = &RigidBody> {
        self.element_store.iter()
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.element_store.size()
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Install new parameters. Live bodies keep their mass and inertia.
    pub fn set_context(&mut self, context: impl Into<Context>) -> SimulationResult<()> {
        let context: Context = context.into();
        context.validate()?;
        self.context = context;
        Ok(())
    }

    #[inline]
    pub fn frame_count(&self) -> u128 {
        self.frame_count
    }

    #[inline]
    pub fn total_duration(&self) -> FloatNum {
        self.total_duration
    }

    pub fn tick(&mut self, dt: FloatNum) -> SimulationResult<TickReport> {
        let callback_hook = &mut self.callback_hook;
        let report = step_with(
            self.element_store.as_mut_slice(),
            &self.context,
            dt,
            |id_a, id_b, resolution| callback_hook.emit(id_a, id_b, resolution),
        )?;

        self.frame_count += 1;
        self.total_duration += dt;

        Ok(report)
    }

    /// Whether two bodies overlap right now. Unknown ids never collide.
    pub fn is_body_collide(&self, body_a_id: ID, body_b_id: ID) -> bool {
        if body_a_id == body_b_id {
            return false;
        }

        self.body(body_a_id)
            .zip(self.body(body_b_id))
            .map_or(false, |(body_a, body_b)| overlaps(body_a, body_b))
    }

    /// sum of linear momentum over every body
    pub fn total_motion(&self) -> Vector {
        self.bodies_iter()
            .fold(Vector::default(), |sum, body| sum + body.motion())
    }

    pub fn total_kinetic_energy(&self) -> FloatNum {
        self.bodies_iter().map(RigidBody::kinetic_energy).sum()
    }

    pub fn register_collision_callback<F>(&mut self, callback: F) -> u32
    where
        F: FnMut(ID, ID, &Resolution) + 'static,
    {
        self.callback_hook.register_callback(callback)
    }

    /// Returns false when no callback had this id.
    pub fn unregister_collision_callback(&mut self, callback_id: u32) -> bool {
        self.callback_hook.unregister_callback(callback_id)
    }

    pub fn has_collision_callback(&self) -> bool {
        !self.callback_hook.is_empty()
    }

    /// remove all bodies, keep context and callbacks
    pub fn clear(&mut self) {
        self.element_store.clear();
        self.id_dispatcher.reset();
        self.frame_count = 0;
        self.total_duration = 0.;
    }

    /**
     * Throw away every body and rebuild the preset from `parameters`.
     * The context is replaced with the one the scenario asks for. Nothing
     * changes if the parameters are invalid.
     */
    pub fn load_scenario(
        &mut self,
        scenario: Scenario,
        parameters: &ScenarioParameters,
    ) -> SimulationResult<[ID; 2]> {
        let context = scenario.context(parameters)?;
        let [body_a, body_b] = scenario.create_bodies(parameters)?;

        self.clear();
        self.context = context;
        let ids = [self.push_body(body_a)?, self.push_body(body_b)?];

        log::info!("loaded scenario `{}` with {parameters:?}", scenario.label());

        Ok(ids)
    }
}
