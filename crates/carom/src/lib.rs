pub mod collision;
pub mod element;
pub mod errors;
pub mod math;
pub mod meta;
pub mod response;
pub mod scenario;
pub mod scene;
pub mod shape;

pub mod prelude {
    pub use super::collision::{detect_overlap, find_contact, overlaps, Collider, Contact};
    pub use super::element::{create_body, BodyConfig, BodyConfigBuilder, RigidBody, ID};
    pub use super::errors::{CollisionError, SimulationError, SimulationResult};
    pub use super::math::{point::Point, vector::Vector, FloatNum};
    pub use super::meta::{Angle, Mass, Meta};
    pub use super::response::{
        resolve_collision, ImpactHint, ImpulseObject, Resolution, ResolveParameters,
        ResolveParametersBuilder,
    };
    pub use super::scenario::{BodySlot, Nudge, Scenario, ScenarioParameters};
    pub use super::scene::{
        context::{Bounds, Context, ContextBuilder},
        step, step_with, Scene, TickReport,
    };
    pub use super::shape::{CenterPoint, Rect};
}
