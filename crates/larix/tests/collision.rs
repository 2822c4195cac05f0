use approx::assert_relative_eq;
use larix::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn placed(shape: Shape<'static>, x: FloatNum, y: FloatNum, rotation: FloatNum) -> Shape<'static> {
    shape.with_meta(MetaBuilder::new().transform(Transform::new((x, y), rotation)))
}

fn scene_with_inv_masses(inv_masses: &[FloatNum]) -> (Scene, Vec<ShapeHandle>) {
    let mut scene = Scene::new();
    let handles = inv_masses
        .iter()
        .map(|&inv_mass| {
            let shape = scene
                .create_circle((0., 0.), 1.)
                .with_meta(MetaBuilder::new().inv_mass(inv_mass));
            scene.push_shape(shape)
        })
        .collect();
    (scene, handles)
}

#[test]
fn two_unit_circles_difference_along_x() {
    let mut scene = Scene::new();
    let a = scene.push_shape(scene.create_circle((0., 0.), 1.));
    let b = scene.push_shape(placed(scene.create_circle((0., 0.), 1.), 3., 0., 0.));

    assert!(scene.pair_manager().pair(a, b).is_some());
    let pair = ShapePair::new(a, b);
    let point = scene
        .minkowski_point(&pair, &Vector::new(1., 0.))
        .unwrap()
        .unwrap();

    let world = point.world_point().unwrap();
    assert_relative_eq!(world.x(), -1., epsilon = 1e-5);
    assert_relative_eq!(world.y(), 0., epsilon = 1e-5);
}

#[test]
fn pair_counts_follow_inverse_masses() {
    let (scene, _) = scene_with_inv_masses(&[0., 1., 1.]);
    assert_eq!(scene.pair_manager().len(), 3);

    let (scene, _) = scene_with_inv_masses(&[0., 0., 1.]);
    assert_eq!(scene.pair_manager().len(), 2);

    let (scene, _) = scene_with_inv_masses(&[0., 0., 0., 0.]);
    assert!(scene.pair_manager().is_empty());
}

#[test]
fn pair_count_is_combinations_minus_static_pairs() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let count = rng.gen_range(0..12usize);
        let inv_masses: Vec<FloatNum> = (0..count)
            .map(|_| if rng.gen_bool(0.3) { 0. } else { 1. })
            .collect();
        let static_count = inv_masses.iter().filter(|&&m| m == 0.).count();

        let (scene, _) = scene_with_inv_masses(&inv_masses);
        let all = count * count.saturating_sub(1) / 2;
        let static_pairs = static_count * static_count.saturating_sub(1) / 2;
        assert_eq!(scene.pair_manager().len(), all - static_pairs);
    }
}

#[test]
fn removed_shape_is_not_referenced() {
    let (mut scene, handles) = scene_with_inv_masses(&[1., 1., 0., 1., 1.]);
    let removed = handles[3];
    scene.remove_shape(removed);

    let manager = scene.pair_manager();
    assert!(manager.pairs().all(|pair| !pair.contains(removed)));
    assert!(manager.pairs_of(removed).is_none());
    for &handle in handles.iter().filter(|&&h| h != removed) {
        assert!(manager.pair(handle, removed).is_none());
        assert!(manager
            .pairs_of(handle)
            .unwrap()
            .all(|pair| pair.other(handle) != Some(removed)));
    }
    assert_eq!(manager.len(), 6);

    // a reused slot starts without stale pairs
    let reused = scene.push_shape(scene.create_circle((5., 5.), 1.));
    assert_eq!(reused, removed);
    assert_eq!(scene.pair_manager().pairs_of(reused).unwrap().count(), 4);
}

#[test]
fn minkowski_decomposes_into_shape_supports() {
    let mut rng = StdRng::seed_from_u64(3);
    let segments = CircleSegmentInfo::shared(40);
    let shapes = [
        placed(Shape::rect(3., 1.), 2., 1., 0.3),
        placed(Shape::circle((0.2, 0.), 0.7, segments), -1., 4., 2.),
        placed(Shape::triangle((0., 0.), (2., 0.), (0., 1.)), 0., -3., -1.),
        placed(Shape::regular_polygon(6, 1.), 5., 5., 0.),
    ];

    for a in shapes.iter() {
        for b in shapes.iter() {
            let angle: FloatNum = rng.gen_range(0. ..std::f32::consts::TAU);
            let d = Vector::new(1., 0.).rotate(angle);

            let point = Minkowski::point(a, b, &d, false).unwrap();
            let expected = a.world_support(&d).world_point().unwrap()
                - b.world_support(&-d).world_point().unwrap();
            let world = point.world_point().unwrap();
            assert_relative_eq!(world.x(), expected.x(), epsilon = 1e-4);
            assert_relative_eq!(world.y(), expected.y(), epsilon = 1e-4);
            assert!(point.is_valid());
        }
    }
}

#[test]
fn transform_round_trip_through_shape() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let shape = placed(
            Shape::rect(1., 1.),
            rng.gen_range(-50. ..50.),
            rng.gen_range(-50. ..50.),
            rng.gen_range(-10. ..10.),
        );
        let p = Point::new(rng.gen_range(-20. ..20.), rng.gen_range(-20. ..20.));
        let back = shape.to_local(&shape.to_world(&p));
        assert_relative_eq!(back.x(), p.x(), epsilon = 1e-3);
        assert_relative_eq!(back.y(), p.y(), epsilon = 1e-3);
    }
}

#[test]
fn broad_phase_with_custom_collider() {
    let mut scene = Scene::new();
    let ball = scene.push_shape(placed(scene.create_circle((0., 0.), 1.), 0., 0.5, 0.));
    let ground = scene.push_shape(Shape::plane((0., 1.), 0.).with_meta(MetaBuilder::new().fixed()));
    let far = scene.push_shape(placed(scene.create_circle((0., 0.), 1.), 0., 20., 0.));

    // keep shapes that sink below a plane
    let collider = |pair: &ShapePair, shapes: &ShapeStore| {
        let (first, second) = (&shapes[pair.first()], &shapes[pair.second()]);
        let (body, plane) = if first.kind() == ShapeKind::Plane {
            (second, first)
        } else {
            (first, second)
        };
        if plane.kind() != ShapeKind::Plane {
            return false;
        }
        Minkowski::point(body, plane, &Vector::new(0., -1.), false)
            .ok()
            .and_then(|point| point.world_point())
            .is_some_and(|p| p.y() < 0.)
    };

    let pairs = scene.detect_pairs(&SimpleBroadPhase::new(collider));
    assert!(pairs.contains(&ShapePair::new(ground, ball)));
    assert!(!pairs.contains(&ShapePair::new(ground, far)));
    assert!(!pairs.contains(&ShapePair::new(ball, far)));
}
