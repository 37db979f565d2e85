use carom_macro_tools::Fields;

use crate::{
    errors::{ensure_positive, SimulationResult},
    math::{point::Point, vector::Vector, FloatNum},
    meta::{Mass, Transform},
};

use super::ComputeMomentOfInertia;

/// Rectangle described in its local frame by half extents, centered on the
/// body's center of mass.
#[derive(Clone, Copy, Debug, PartialEq, Fields)]
#[r]
pub struct Rect {
    half_width: FloatNum,
    half_height: FloatNum,
}

impl Rect {
    pub fn new(width: FloatNum, height: FloatNum) -> SimulationResult<Self> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        Ok(Self {
            half_width: width * 0.5,
            half_height: height * 0.5,
        })
    }

    pub fn width(&self) -> FloatNum {
        self.half_width * 2.
    }

    pub fn height(&self) -> FloatNum {
        self.half_height * 2.
    }

    // winding: (-w, -h), (w, -h), (w, h), (-w, h)
    pub fn local_corners(&self) -> [Vector; 4] {
        let (w, h) = (self.half_width, self.half_height);
        [
            (-w, -h).into(),
            (w, -h).into(),
            (w, h).into(),
            (-w, h).into(),
        ]
    }

    /// corners in world space for the given placement
    pub fn corners(&self, transform: &Transform) -> [Point; 4] {
        let (position, rotation) = transform.split();
        self.local_corners()
            .map(|corner| position + corner.rotate(rotation))
    }
}

impl ComputeMomentOfInertia for Rect {
    #[inline]
    fn compute_moment_of_inertia(&self, m: Mass) -> Mass {
        let width = self.width();
        let height = self.height();
        m * (width * width + height * height) / 12.
    }
}
