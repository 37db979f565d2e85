pub mod rect;

pub use rect::Rect;

use crate::{math::point::Point, meta::Mass};

pub trait CenterPoint {
    fn center_point(&self) -> Point;
}

pub trait ComputeMomentOfInertia {
    fn compute_moment_of_inertia(&self, m: Mass) -> Mass;
}
