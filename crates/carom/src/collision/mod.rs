use carom_macro_tools::Fields;

use crate::{
    errors::CollisionError,
    math::{point::Point, vector::Vector, FloatNum},
    shape::CenterPoint,
};

/// Convex polygon that takes part in collision tests.
pub trait Collider: CenterPoint {
    /// vertices in world space, in winding order
    fn vertices(&self) -> Vec<Point>;
}

pub trait Projector {
    /// `(min, max)` of the dot products of every vertex with `axis`
    fn projection_on_vector(&self, axis: &Vector) -> (FloatNum, FloatNum);
}

impl Projector for [Point] {
    fn projection_on_vector(&self, axis: &Vector) -> (FloatNum, FloatNum) {
        self.iter()
            .map(|point| point.to_vector() * *axis)
            .fold((FloatNum::MAX, FloatNum::MIN), |(min, max), size| {
                (min.min(size), max.max(size))
            })
    }
}

fn is_projection_overlap(
    (a_min, a_max): (FloatNum, FloatNum),
    (b_min, b_max): (FloatNum, FloatNum),
) -> bool {
    a_min <= b_max && b_min <= a_max
}

/**
 * Candidate separating axes of a convex polygon: the unit normal of every edge.
 * A zero length edge yields `DegenerateAxis` instead of being normalized.
 */
pub fn separating_axes(
    vertices: &[Point],
) -> impl Iterator<Item = Result<Vector, CollisionError>> + '_ {
    let len = vertices.len();
    (0..len).map(move |i| {
        let edge: Vector = (vertices[i], vertices[(i + 1) % len]).into();
        (!edge)
            .normalize()
            .ok_or(CollisionError::DegenerateAxis { edge_index: i })
    })
}

/**
 * Separating Axis Theorem test for two convex polygons.
 * Returns on the first axis whose projections don't overlap.
 */
pub fn detect_polygon_overlap(a: &[Point], b: &[Point]) -> Result<bool, CollisionError> {
    const MIN_VERTICES: usize = 3;
    if a.len() < MIN_VERTICES || b.len() < MIN_VERTICES {
        return Err(CollisionError::TooFewVertices(a.len().min(b.len())));
    }

    for axis in separating_axes(a).chain(separating_axes(b)) {
        let axis = axis?;
        if !is_projection_overlap(a.projection_on_vector(&axis), b.projection_on_vector(&axis)) {
            return Ok(false);
        }
    }

    Ok(true)
}

pub fn detect_overlap<A, B>(a: &A, b: &B) -> Result<bool, CollisionError>
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    detect_polygon_overlap(&a.vertices(), &b.vertices())
}

/// `overlaps(bodyA, bodyB)`. Degenerate geometry never overlaps.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    match detect_overlap(a, b) {
        Ok(is_overlap) => is_overlap,
        Err(err) => {
            log::warn!("overlap test skipped: {err}");
            false
        }
    }
}

/// Single point contact between two overlapping bodies, valid for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Fields)]
#[r(copy)]
pub struct Contact {
    // unit vector from the center of A toward the center of B
    normal: Vector,
    point: Point,
    r_a: Vector,
    r_b: Vector,
}

/// Midpoint of the nearest pair of vertices, brute forced over all pairs.
pub fn nearest_vertex_midpoint(a: &[Point], b: &[Point]) -> Option<Point> {
    let mut nearest: Option<(FloatNum, Point)> = None;

    for point_a in a {
        for point_b in b {
            let distance = point_a.distance(point_b);
            if !distance.is_finite() {
                continue;
            }
            if nearest.map_or(true, |(min, _)| distance < min) {
                nearest = Some((distance, point_a.midpoint(point_b)));
            }
        }
    }

    nearest.map(|(_, point)| point)
}

/**
 * Approximate contact of two bodies already known to overlap.
 * The point is the midpoint of the nearest corners, the normal follows the line of centers.
 */
pub fn find_contact<A, B>(a: &A, b: &B) -> Result<Contact, CollisionError>
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let point = nearest_vertex_midpoint(&a.vertices(), &b.vertices())
        .ok_or(CollisionError::NoContactPoint)?;

    let center_a = a.center_point();
    let center_b = b.center_point();

    let normal = Vector::from((center_a, center_b))
        .normalize()
        .ok_or(CollisionError::CoincidentCenters)?;

    Ok(Contact {
        normal,
        point,
        r_a: (center_a, point).into(),
        r_b: (center_b, point).into(),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        detect_overlap, detect_polygon_overlap, find_contact, nearest_vertex_midpoint, overlaps,
        Collider,
    };
    use crate::{
        element::{create_body, RigidBody},
        errors::CollisionError,
        math::{point::Point, vector::Vector},
        shape::CenterPoint,
    };

    fn body(center: (f32, f32), size: (f32, f32), angle: f32) -> RigidBody {
        create_body(center, size, 1., (0., 0.), angle).unwrap()
    }

    #[test]
    fn test_separated_on_x() {
        let a = body((100., 100.), (40., 20.), 0.);
        let b = body((200., 100.), (40., 20.), 0.);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_identical_rects_overlap() {
        let a = body((100., 100.), (40., 20.), 0.);
        let b = body((100., 100.), (40., 20.), 0.);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_touching_edges_count_as_overlap() {
        let a = body((0., 0.), (10., 10.), 0.);
        let b = body((10., 0.), (10., 10.), 0.);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_rotated_rect_needs_its_own_axes() {
        // the diamond's bounding box overlaps the square, its edges don't
        let square = body((0., 0.), (10., 10.), 0.);
        let diamond = body((11., 11.), (10., 10.), std::f32::consts::FRAC_PI_4);
        assert!(!overlaps(&square, &diamond));

        let closer = body((9., 0.), (10., 10.), std::f32::consts::FRAC_PI_4);
        assert!(overlaps(&square, &closer));
    }

    #[test]
    fn test_overlap_is_stable_across_calls() {
        let a = body((0., 0.), (30., 12.), 0.3);
        let b = body((25., 4.), (20., 20.), -0.6);
        let first = overlaps(&a, &b);
        for _ in 0..10 {
            assert_eq!(overlaps(&a, &b), first);
        }
    }

    #[test]
    fn test_general_convex_polygon() {
        let triangle = [
            Point::new(0., 0.),
            Point::new(10., 0.),
            Point::new(0., 10.),
        ];
        let far = [
            Point::new(6., 6.),
            Point::new(12., 6.),
            Point::new(12., 12.),
            Point::new(6., 12.),
        ];
        let near = [
            Point::new(4., 4.),
            Point::new(12., 4.),
            Point::new(12., 12.),
            Point::new(4., 12.),
        ];
        assert_eq!(detect_polygon_overlap(&triangle, &far), Ok(false));
        assert_eq!(detect_polygon_overlap(&triangle, &near), Ok(true));
    }

    #[test]
    fn test_degenerate_edge_is_reported() {
        let collapsed = [
            Point::new(0., 0.),
            Point::new(0., 0.),
            Point::new(1., 1.),
        ];
        let square = [
            Point::new(0., 0.),
            Point::new(1., 0.),
            Point::new(1., 1.),
            Point::new(0., 1.),
        ];
        assert_eq!(
            detect_polygon_overlap(&collapsed, &square),
            Err(CollisionError::DegenerateAxis { edge_index: 0 })
        );
        assert!(matches!(
            detect_polygon_overlap(&collapsed[..2], &square),
            Err(CollisionError::TooFewVertices(2))
        ));
    }

    #[test]
    fn test_contact_between_neighbours() {
        let a = body((0., 0.), (10., 10.), 0.);
        let b = body((9., 0.), (10., 10.), 0.);
        assert_eq!(detect_overlap(&a, &b), Ok(true));

        let contact = find_contact(&a, &b).unwrap();
        assert_eq!(contact.normal(), Vector::new(1., 0.));
        // nearest corners are (5, -5) and (4, -5)
        assert_eq!(contact.point(), Point::new(4.5, -5.));
        assert_eq!(contact.r_a(), Vector::new(4.5, -5.));
        assert_eq!(contact.r_b(), Vector::new(-4.5, -5.));
    }

    #[test]
    fn test_no_finite_vertex_pair_has_no_midpoint() {
        assert_eq!(nearest_vertex_midpoint(&[], &[]), None);

        let square = [
            Point::new(0., 0.),
            Point::new(1., 0.),
            Point::new(1., 1.),
            Point::new(0., 1.),
        ];
        let broken = [Point::new(f32::NAN, f32::NAN), Point::new(f32::NAN, 1.)];
        assert_eq!(nearest_vertex_midpoint(&square, &[]), None);
        assert_eq!(nearest_vertex_midpoint(&square, &broken), None);
        assert_eq!(
            nearest_vertex_midpoint(&square, &[Point::new(f32::NAN, 0.), Point::new(3., 0.)]),
            Some(Point::new(2., 0.))
        );
    }

    struct Hollow(Point);

    impl CenterPoint for Hollow {
        fn center_point(&self) -> Point {
            self.0
        }
    }

    impl Collider for Hollow {
        fn vertices(&self) -> Vec<Point> {
            Vec::new()
        }
    }

    #[test]
    fn test_contact_needs_a_vertex_pair() {
        let a = body((0., 0.), (10., 10.), 0.);
        let hollow = Hollow(Point::new(5., 0.));
        assert_eq!(
            find_contact(&a, &hollow),
            Err(CollisionError::NoContactPoint)
        );
        assert_eq!(
            find_contact(&hollow, &a),
            Err(CollisionError::NoContactPoint)
        );
    }

    #[test]
    fn test_contact_needs_distinct_centers() {
        let a = body((3., 3.), (10., 10.), 0.);
        let b = body((3., 3.), (4., 4.), 0.);
        assert_eq!(find_contact(&a, &b), Err(CollisionError::CoincidentCenters));
    }

    #[test]
    fn test_body_vertices_are_its_corners() {
        let a = body((1., 2.), (2., 2.), 0.);
        assert_eq!(a.vertices(), a.corner_points().to_vec());
    }
}
