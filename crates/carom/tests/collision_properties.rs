use carom::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

const SAMPLES: usize = 200;

fn random_body(rng: &mut StdRng, position: (FloatNum, FloatNum)) -> RigidBody {
    let mut sample = |low: FloatNum, high: FloatNum| rng.gen_range(low..high);
    let size = (sample(10., 60.), sample(10., 60.));
    let mass = sample(100., 2000.);
    let velocity = (sample(-10., 10.), sample(-10., 10.));
    let angle = sample(-3., 3.);
    let angle_velocity = sample(-1., 1.);
    RigidBody::new(
        BodyConfigBuilder::new()
            .position(position)
            .size(size)
            .mass(mass)
            .velocity(velocity)
            .angle(angle)
            .angle_velocity(angle_velocity),
    )
    .unwrap()
}

/// Random overlapping pairs, rejection sampled.
fn overlapping_pairs(seed: u64) -> impl Iterator<Item = (RigidBody, RigidBody)> {
    let mut rng = StdRng::seed_from_u64(seed);
    std::iter::from_fn(move || loop {
        let a = random_body(&mut rng, (0., 0.));
        let offset: (FloatNum, FloatNum) =
            (rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));
        let b = random_body(&mut rng, offset);
        if overlaps(&a, &b) && a.position() != b.position() {
            return Some((a, b));
        }
    })
    .take(SAMPLES)
}

fn parameters(restitution: FloatNum) -> ResolveParameters {
    ResolveParametersBuilder::new().restitution(restitution).into()
}

#[test]
fn elastic_collisions_conserve_linear_momentum() {
    for (mut a, mut b) in overlapping_pairs(7) {
        let before = a.motion() + b.motion();

        resolve_collision(&mut a, &mut b, &parameters(1.), ImpactHint::Direct).unwrap();

        let after = a.motion() + b.motion();
        let tolerance = 1e-4 * (a.motion().abs() + b.motion().abs()) + 1e-2;
        assert!(
            (before - after).abs() < tolerance,
            "momentum {before} -> {after}"
        );
    }
}

#[test]
fn collisions_never_add_kinetic_energy() {
    let mut rng = StdRng::seed_from_u64(11);
    for (mut a, mut b) in overlapping_pairs(13) {
        let restitution: FloatNum = rng.gen_range(0.0..=1.0);
        let before = a.kinetic_energy() + b.kinetic_energy();

        resolve_collision(&mut a, &mut b, &parameters(restitution), ImpactHint::Direct).unwrap();

        let after = a.kinetic_energy() + b.kinetic_energy();
        assert!(
            after <= before * (1. + 1e-4) + 1e-3,
            "kinetic energy {before} -> {after} with e = {restitution}"
        );
    }
}

#[test]
fn angle_velocity_is_clamped_after_any_collision() {
    for (mut a, mut b) in overlapping_pairs(17) {
        resolve_collision(
            &mut a,
            &mut b,
            &parameters(1.),
            ImpactHint::SideImpact,
        )
        .unwrap();
        assert!(a.angle_velocity().abs() <= 0.8);
        assert!(b.angle_velocity().abs() <= 0.8);
    }
}

#[test]
fn disjoint_rectangles_do_not_overlap() {
    let a = create_body((100., 100.), (40., 20.), 1., (0., 0.), 0.).unwrap();
    let b = create_body((200., 100.), (40., 20.), 1., (0., 0.), 0.).unwrap();
    assert!(!overlaps(&a, &b));
    assert_eq!(detect_overlap(&a, &b), Ok(false));
}

#[test]
fn identical_rectangles_overlap() {
    let a = create_body((100., 100.), (40., 20.), 1., (0., 0.), 0.).unwrap();
    let b = create_body((100., 100.), (40., 20.), 1., (0., 0.), 0.).unwrap();
    assert!(overlaps(&a, &b));
}

#[test]
fn overlap_query_is_idempotent() {
    for (a, b) in overlapping_pairs(19).take(20) {
        let first = overlaps(&a, &b);
        for _ in 0..5 {
            assert_eq!(overlaps(&a, &b), first);
            assert_eq!(overlaps(&b, &a), first);
        }
    }

    let a = create_body((100., 100.), (40., 20.), 1., (0., 0.), 0.).unwrap();
    let b = create_body((200., 100.), (40., 20.), 1., (0., 0.), 0.).unwrap();
    for _ in 0..5 {
        assert!(!overlaps(&a, &b));
    }
}

#[test]
fn coincident_centers_are_degenerate() {
    let mut a = create_body((10., 10.), (4., 4.), 1., (1., 0.), 0.).unwrap();
    let mut b = create_body((10., 10.), (4., 4.), 1., (-1., 0.), 0.).unwrap();
    let result = resolve_collision(&mut a, &mut b, &parameters(0.5), ImpactHint::Direct);
    assert_eq!(result.err(), Some(CollisionError::CoincidentCenters));
    assert_eq!(a.velocity().x(), 1.);
    assert_eq!(b.velocity().x(), -1.);
}
