use carom_macro_tools::{Builder, Fields};

use crate::{
    element::{BodyConfigBuilder, RigidBody},
    errors::{ensure_unit_interval, SimulationError, SimulationResult},
    math::FloatNum,
    meta::Mass,
    response::{ImpactHint, ResolveParametersBuilder},
    scene::context::{Bounds, Context, ContextBuilder},
};

pub const WORLD_WIDTH: FloatNum = 1000.;
pub const WORLD_HEIGHT: FloatNum = 600.;

const MASS_STEP: Mass = 100.;
const MIN_MASS: Mass = 500.;
const SPEED_STEP: FloatNum = 0.5;
const MAX_SPEED: FloatNum = 10.;
const RESTITUTION_STEP: FloatNum = 0.1;
const FRICTION_STEP: FloatNum = 0.01;
const MIN_FRICTION: FloatNum = 0.9;
const MAX_FRICTION: FloatNum = 0.99;

/// Preset two car crash layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scenario {
    #[default]
    HeadOn,
    SideImpact,
    LightImpact,
    HeavyImpact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodySlot {
    A,
    B,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
}

/// User tunable inputs of a scenario. Speeds are magnitudes, the preset
/// decides the direction.
#[derive(Clone, Copy, Debug, PartialEq, Builder, Fields)]
#[r]
pub struct ScenarioParameters {
    #[default = 1500.]
    mass_a: Mass,
    #[default = 1200.]
    mass_b: Mass,
    #[default = 4.]
    speed_a: FloatNum,
    #[default = 3.]
    speed_b: FloatNum,
    #[default = 0.5]
    restitution: FloatNum,
    #[default = 1.]
    friction: FloatNum,
}

fn round_to(value: FloatNum, decimals: i32) -> FloatNum {
    let scale = (10. as FloatNum).powi(decimals);
    (value * scale).round() / scale
}

impl ScenarioParameters {
    pub fn validate(&self) -> SimulationResult<()> {
        for (name, mass) in [("mass_a", self.mass_a), ("mass_b", self.mass_b)] {
            if !(mass.is_finite() && mass > 0.) {
                return Err(SimulationError::invalid(name, mass, "must be finite and > 0"));
            }
        }
        for (name, speed) in [("speed_a", self.speed_a), ("speed_b", self.speed_b)] {
            if !(speed.is_finite() && speed >= 0.) {
                return Err(SimulationError::invalid(
                    name,
                    speed,
                    "must be finite and >= 0",
                ));
            }
        }
        ensure_unit_interval("restitution", self.restitution)?;
        ensure_unit_interval("friction", self.friction)?;
        Ok(())
    }

    pub fn mass(&self, slot: BodySlot) -> Mass {
        match slot {
            BodySlot::A => self.mass_a,
            BodySlot::B => self.mass_b,
        }
    }

    pub fn speed(&self, slot: BodySlot) -> FloatNum {
        match slot {
            BodySlot::A => self.speed_a,
            BodySlot::B => self.speed_b,
        }
    }

    /// ±100, never below 500
    pub fn nudge_mass(&mut self, slot: BodySlot, nudge: Nudge) -> &mut Self {
        let mass = match slot {
            BodySlot::A => &mut self.mass_a,
            BodySlot::B => &mut self.mass_b,
        };
        *mass = match nudge {
            Nudge::Up => *mass + MASS_STEP,
            Nudge::Down => (*mass - MASS_STEP).max(MIN_MASS),
        };
        self
    }

    /// ±0.5 within [0, 10]
    pub fn nudge_speed(&mut self, slot: BodySlot, nudge: Nudge) -> &mut Self {
        let speed = match slot {
            BodySlot::A => &mut self.speed_a,
            BodySlot::B => &mut self.speed_b,
        };
        *speed = match nudge {
            Nudge::Up => (*speed + SPEED_STEP).min(MAX_SPEED),
            Nudge::Down => (*speed - SPEED_STEP).max(0.),
        };
        self
    }

    /// ±0.1 within [0, 1], kept at one decimal
    pub fn nudge_restitution(&mut self, nudge: Nudge) -> &mut Self {
        self.restitution = match nudge {
            Nudge::Up => round_to(self.restitution + RESTITUTION_STEP, 1).min(1.),
            Nudge::Down => round_to(self.restitution - RESTITUTION_STEP, 1).max(0.),
        };
        self
    }

    /// ±0.01 within [0.9, 0.99], kept at two decimals. Nudging up from the
    /// frictionless default lands on 0.99.
    pub fn nudge_friction(&mut self, nudge: Nudge) -> &mut Self {
        self.friction = match nudge {
            Nudge::Up => round_to(self.friction + FRICTION_STEP, 2).min(MAX_FRICTION),
            Nudge::Down => round_to(self.friction - FRICTION_STEP, 2).max(MIN_FRICTION),
        };
        self
    }
}

struct BodyLayout {
    position: (FloatNum, FloatNum),
    size: (FloatNum, FloatNum),
    mass: Mass,
    velocity: (FloatNum, FloatNum),
}

impl BodyLayout {
    fn build(self) -> SimulationResult<RigidBody> {
        RigidBody::new(
            BodyConfigBuilder::new()
                .position(self.position)
                .size(self.size)
                .mass(self.mass)
                .velocity(self.velocity),
        )
    }
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::HeadOn,
        Scenario::SideImpact,
        Scenario::LightImpact,
        Scenario::HeavyImpact,
    ];

    /// presets are numbered from 1
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::HeadOn => "head on",
            Scenario::SideImpact => "side impact (with spin)",
            Scenario::LightImpact => "light impact",
            Scenario::HeavyImpact => "heavy impact",
        }
    }

    pub fn impact_hint(&self) -> ImpactHint {
        match self {
            Scenario::SideImpact => ImpactHint::SideImpact,
            _ => ImpactHint::Direct,
        }
    }

    fn layouts(&self, parameters: &ScenarioParameters) -> [BodyLayout; 2] {
        let middle = WORLD_HEIGHT / 2.;
        let ScenarioParameters {
            mass_a: m1,
            mass_b: m2,
            speed_a: v1,
            speed_b: v2,
            ..
        } = *parameters;

        let car = |position, size, mass, velocity| BodyLayout {
            position,
            size,
            mass,
            velocity,
        };

        match self {
            Scenario::HeadOn => [
                car((300., middle), (60., 30.), m1, (v1, 0.)),
                car((700., middle), (60., 30.), m2, (-v2, 0.)),
            ],
            Scenario::SideImpact => [
                car((300., middle + 40.), (60., 30.), m1, (v1, 0.)),
                car((700., middle - 20.), (60., 30.), m2, (-v2 * 0.8, 0.5)),
            ],
            Scenario::LightImpact => [
                car((300., middle), (60., 30.), m1, (v1 / 2., 0.)),
                car((700., middle), (60., 30.), m2, (-v2 / 2., 0.)),
            ],
            Scenario::HeavyImpact => [
                car((300., middle), (80., 40.), (m1 * 1.5).trunc(), (v1 * 1.5, 0.)),
                car((700., middle), (50., 25.), (m2 / 1.5).trunc(), (-v2 * 1.5, 0.)),
            ],
        }
    }

    /// Fresh bodies for this preset, never reused between loads.
    pub fn create_bodies(
        &self,
        parameters: &ScenarioParameters,
    ) -> SimulationResult<[RigidBody; 2]> {
        parameters.validate()?;
        let [a, b] = self.layouts(parameters);
        Ok([a.build()?, b.build()?])
    }

    pub fn context(&self, parameters: &ScenarioParameters) -> SimulationResult<Context> {
        parameters.validate()?;
        ContextBuilder::new()
            .default_friction(parameters.friction)
            .impact_hint(self.impact_hint())
            .bounds(Some(Bounds::new((0., 0.), (WORLD_WIDTH, WORLD_HEIGHT))?))
            .resolve_parameters(
                ResolveParametersBuilder::new().restitution(parameters.restitution),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::{BodySlot, Nudge, Scenario, ScenarioParameters, ScenarioParametersBuilder};
    use crate::response::ImpactHint;

    #[test]
    fn test_defaults() {
        let parameters = ScenarioParameters::default();
        assert_eq!(parameters.mass_a(), 1500.);
        assert_eq!(parameters.mass_b(), 1200.);
        assert_eq!(parameters.speed_a(), 4.);
        assert_eq!(parameters.speed_b(), 3.);
        assert_eq!(parameters.restitution(), 0.5);
        assert_eq!(parameters.friction(), 1.);
    }

    #[test]
    fn test_head_on_layout() {
        let [a, b] = Scenario::HeadOn
            .create_bodies(&ScenarioParameters::default())
            .unwrap();
        assert_eq!((a.position().x(), a.position().y()), (300., 300.));
        assert_eq!((b.position().x(), b.position().y()), (700., 300.));
        assert_eq!(a.size(), (60., 30.));
        assert_eq!(a.velocity().x(), 4.);
        assert_eq!(b.velocity().x(), -3.);
        assert_eq!(b.mass(), 1200.);
    }

    #[test]
    fn test_side_impact_layout() {
        let [a, b] = Scenario::SideImpact
            .create_bodies(&ScenarioParameters::default())
            .unwrap();
        assert_eq!(a.position().y(), 340.);
        assert_eq!(b.position().y(), 280.);
        assert!((b.velocity().x() + 2.4).abs() < 1e-6);
        assert_eq!(b.velocity().y(), 0.5);
        assert_eq!(Scenario::SideImpact.impact_hint(), ImpactHint::SideImpact);
        assert_eq!(Scenario::HeadOn.impact_hint(), ImpactHint::Direct);
    }

    #[test]
    fn test_heavy_impact_truncates_masses() {
        let parameters: ScenarioParameters = ScenarioParametersBuilder::new()
            .mass_a(1001.)
            .mass_b(1000.)
            .into();
        let [a, b] = Scenario::HeavyImpact.create_bodies(&parameters).unwrap();
        assert_eq!(a.mass(), 1501.);
        assert_eq!(b.mass(), 666.);
        assert_eq!(a.size(), (80., 40.));
        assert_eq!(b.size(), (50., 25.));
        assert_eq!(a.velocity().x(), 6.);
        assert_eq!(b.velocity().x(), -4.5);
    }

    #[test]
    fn test_light_impact_halves_speeds() {
        let [a, b] = Scenario::LightImpact
            .create_bodies(&ScenarioParameters::default())
            .unwrap();
        assert_eq!(a.velocity().x(), 2.);
        assert_eq!(b.velocity().x(), -1.5);
    }

    #[test]
    fn test_scenario_numbering() {
        assert_eq!(Scenario::from_number(1), Some(Scenario::HeadOn));
        assert_eq!(Scenario::from_number(4), Some(Scenario::HeavyImpact));
        assert_eq!(Scenario::from_number(0), None);
        assert_eq!(Scenario::from_number(5), None);
    }

    #[test]
    fn test_nudges_are_clamped() {
        let mut parameters = ScenarioParameters::default();

        for _ in 0..20 {
            parameters.nudge_mass(BodySlot::A, Nudge::Down);
        }
        assert_eq!(parameters.mass(BodySlot::A), 500.);
        parameters.nudge_mass(BodySlot::B, Nudge::Up);
        assert_eq!(parameters.mass(BodySlot::B), 1300.);

        for _ in 0..30 {
            parameters.nudge_speed(BodySlot::A, Nudge::Up);
        }
        assert_eq!(parameters.speed(BodySlot::A), 10.);
        for _ in 0..30 {
            parameters.nudge_speed(BodySlot::B, Nudge::Down);
        }
        assert_eq!(parameters.speed(BodySlot::B), 0.);

        parameters.nudge_restitution(Nudge::Up);
        assert_eq!(parameters.restitution(), 0.6);
        for _ in 0..10 {
            parameters.nudge_restitution(Nudge::Up);
        }
        assert_eq!(parameters.restitution(), 1.);

        parameters.nudge_friction(Nudge::Up);
        assert_eq!(parameters.friction(), 0.99);
        for _ in 0..20 {
            parameters.nudge_friction(Nudge::Down);
        }
        assert_eq!(parameters.friction(), 0.9);
    }

    #[test]
    fn test_context_follows_parameters() {
        let mut parameters = ScenarioParameters::default();
        parameters.nudge_friction(Nudge::Down);
        let context = Scenario::SideImpact.context(&parameters).unwrap();
        assert_eq!(context.default_friction(), 0.99);
        assert_eq!(context.restitution(), 0.5);
        assert_eq!(context.impact_hint(), ImpactHint::SideImpact);
        let bounds = context.bounds().unwrap();
        assert_eq!(bounds.max().x(), 1000.);
        assert_eq!(bounds.max().y(), 600.);
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let parameters: ScenarioParameters = ScenarioParametersBuilder::new().mass_a(0.).into();
        assert!(Scenario::HeadOn.create_bodies(&parameters).is_err());
        let parameters: ScenarioParameters =
            ScenarioParametersBuilder::new().restitution(1.2).into();
        assert!(Scenario::HeadOn.context(&parameters).is_err());
    }
}
