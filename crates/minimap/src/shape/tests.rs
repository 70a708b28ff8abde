use proptest::prelude::*;

use common::utils::{RectEdges, Vec2, Vec3, approx_equal};
use super::*;
use super::handles::*;

const EPSILON: f32 = 1e-3;

fn square(rotation: f32) -> OrientedRect {
    OrientedRect::new(Vec2::zero(), Vec2::new(10.0, 10.0), rotation)
}

// ----------------------------------------------
// OrientedRect
// ----------------------------------------------

#[test]
fn test_unrotated_extents() {
    let rect = OrientedRect::new(Vec2::new(3.0, -2.0), Vec2::new(4.0, 6.0), 0.0);
    assert_eq!(rect.min(), Vec2::new(1.0, -5.0));
    assert_eq!(rect.max(), Vec2::new(5.0, 1.0));
}

#[test]
fn test_corner_order() {
    let [bl, tl, tr, br] = square(0.0).corners();
    assert_eq!(bl, Vec2::new(-5.0, -5.0));
    assert_eq!(tl, Vec2::new(-5.0, 5.0));
    assert_eq!(tr, Vec2::new(5.0, 5.0));
    assert_eq!(br, Vec2::new(5.0, -5.0));

    // A quarter turn moves the bottom-left corner to the bottom-right.
    let [bl, ..] = square(90.0).corners();
    assert!(bl.approx_eq(Vec2::new(5.0, -5.0), EPSILON));
}

#[test]
fn test_rotated_extents() {
    let rect = OrientedRect::new(Vec2::zero(), Vec2::new(2.0, 2.0), 45.0);
    let half_diagonal = 2.0f32.sqrt();
    assert!(rect.min().approx_eq(Vec2::splat(-half_diagonal), EPSILON));
    assert!(rect.max().approx_eq(Vec2::splat(half_diagonal), EPSILON));
}

#[test]
fn test_position_relative_to_origin() {
    let rect = square(0.0);
    assert_eq!(rect.position_relative_to_origin(Vec2::zero()), Vec2::new(5.0, 5.0));
    assert_eq!(rect.position_relative_to_origin(Vec2::new(-5.0, -5.0)), Vec2::zero());
    assert_eq!(rect.position_relative_to_origin(Vec2::new(5.0, 5.0)), Vec2::new(10.0, 10.0));

    // Points outside give values outside [0, size].
    let outside = rect.position_relative_to_origin(Vec2::new(-10.0, 20.0));
    assert!(outside.approx_eq(Vec2::new(-5.0, 25.0), EPSILON));
}

#[test]
fn test_position_relative_to_origin_rotated() {
    // Rotating the rect and the point together keeps the relative position.
    let rect = OrientedRect::new(Vec2::new(2.0, 1.0), Vec2::new(8.0, 4.0), 30.0);
    let point = Vec2::new(4.0, 2.0).rotate_around_point(rect.center, 30.0);
    let expected = OrientedRect::new(Vec2::new(2.0, 1.0), Vec2::new(8.0, 4.0), 0.0)
        .position_relative_to_origin(Vec2::new(4.0, 2.0));

    assert!(rect.position_relative_to_origin(point).approx_eq(expected, EPSILON));
}

#[test]
fn test_contains() {
    let rect = OrientedRect::new(Vec2::zero(), Vec2::new(10.0, 2.0), 90.0);
    assert!(rect.contains(Vec2::new(0.0, 4.5)));
    assert!(!rect.contains(Vec2::new(4.5, 0.0)));
    assert!(rect.contains(Vec2::new(-1.0, -5.0)));
    assert!(!rect.contains(Vec2::new(0.0, 5.5)));
}

#[test]
fn test_degenerate_rect() {
    let rect = OrientedRect::new(Vec2::new(1.0, 1.0), Vec2::new(0.0, 4.0), 0.0);
    assert!(rect.is_degenerate());
    assert_eq!(rect.aspect_ratio(), 0.0);

    let relative = rect.position_relative_to_origin(Vec2::new(7.0, 1.0));
    assert_eq!(relative.x, 0.0);
    assert!(approx_equal(relative.y, 2.0, EPSILON));
}

#[test]
fn test_degenerate_rect_containment() {
    // Zero width: only the vertical segment through the center is inside.
    let line = OrientedRect::new(Vec2::zero(), Vec2::new(0.0, 10.0), 0.0);
    assert!(line.contains(Vec2::new(0.0, 3.0)));
    assert!(line.contains(Vec2::new(0.0, -5.0)));
    assert!(!line.contains(Vec2::new(100.0, 0.0)));
    assert!(!line.contains(Vec2::new(-1000.0, 3.0)));
    assert!(!line.contains(Vec2::new(0.0, 5.5)));

    let point = OrientedRect::new(Vec2::new(2.0, 2.0), Vec2::zero(), 45.0);
    assert!(point.contains(Vec2::new(2.0, 2.0)));
    assert!(!point.contains(Vec2::new(1e6, 1e6)));
    assert!(!point.contains(Vec2::new(2.1, 2.0)));
}

#[test]
fn test_contains_corners_far_from_origin() {
    for distance in [1e3, 1e4, 1e5] {
        let rect = OrientedRect::new(Vec2::new(distance, -distance), Vec2::new(4.0, 3.0), 37.0);
        for corner in rect.corners() {
            assert!(rect.contains(corner), "corner {corner} of {rect}");
        }
        assert!(!rect.contains(rect.center + Vec2::new(3.0, 3.0)));
    }
}

#[test]
fn test_rotation_from_heading() {
    assert_eq!(rotation_from_heading(0.0), 0.0);
    assert!(approx_equal(rotation_from_heading(90.0), 270.0, EPSILON));
    assert!(approx_equal(rotation_from_heading(-45.0), 45.0, EPSILON));
    assert!(approx_equal(rotation_from_heading(720.0 + 10.0), 350.0, EPSILON));
}

#[test]
fn test_follow_transform() {
    let mut rect = square(0.0);
    rect.follow_transform(Vec3::new(4.0, 100.0, -3.0), 90.0);
    assert_eq!(rect.center, Vec2::new(4.0, -3.0));
    assert!(approx_equal(rect.rotation, 270.0, EPSILON));

    // Heading 90 faces +X, which is now the rect's local up.
    let [bl, tl, ..] = rect.corners();
    let up = (tl - bl) * 0.1;
    assert!(up.approx_eq(Vec2::new(1.0, 0.0), EPSILON));
}

// ----------------------------------------------
// Reference planes
// ----------------------------------------------

#[test]
fn test_horizontal_bounds_drop_height() {
    let bounds = MinimapBounds::horizontal(square(0.0));
    assert!(bounds.is_horizontal());
    assert!(bounds.contains_world(Vec3::new(4.0, 1000.0, -4.0)));
    assert!(!bounds.contains_world(Vec3::new(6.0, 0.0, 0.0)));
    assert_eq!(bounds.to_plane(Vec3::new(1.0, 2.0, 3.0)), Vec2::new(1.0, 3.0));
}

#[test]
fn test_plane_basis_axes() {
    let basis = PlaneBasis::default();
    assert_eq!(basis.right(), Vec3::right());
    assert_eq!(basis.forward(), Vec3::forward());
    assert_eq!(basis.normal(), Vec3::up());

    let turned = PlaneBasis::from_heading(Vec3::zero(), 90.0);
    assert!(approx_equal(turned.forward().x, 1.0, EPSILON));
    assert!(approx_equal(turned.right().z, -1.0, EPSILON));

    let tilted = PlaneBasis::new(Vec3::zero(), 0.0, 90.0, 0.0);
    assert!(approx_equal(tilted.forward().y, -1.0, EPSILON));
}

#[test]
fn test_plane_project_unproject() {
    let basis = PlaneBasis::new(Vec3::new(10.0, 5.0, -2.0), 30.0, 20.0, 10.0);
    let plane = ReferencePlane::Oriented(basis);

    let world = plane.unproject(Vec2::new(3.0, -4.0), 2.5);
    assert!(plane.project(world).approx_eq(Vec2::new(3.0, -4.0), EPSILON));

    // Distance along the normal is ignored by the projection.
    let lifted = world + basis.normal() * 50.0;
    assert!(plane.project(lifted).approx_eq(Vec2::new(3.0, -4.0), EPSILON));
}

#[test]
fn test_plane_bounds_match_horizontal_heading() {
    let origin = Vec3::new(20.0, 0.0, 5.0);
    let heading = 30.0;

    let planar = MinimapBounds::on_plane(PlaneBasis::from_heading(origin, heading), Vec2::new(10.0, 4.0));
    let flat = MinimapBounds::horizontal(
        OrientedRect::new(origin.xz(), Vec2::new(10.0, 4.0), rotation_from_heading(heading))
    );

    for point in [
        Vec3::new(20.0, 3.0, 5.0),
        Vec3::new(23.0, 0.0, 5.0),
        Vec3::new(21.0, 0.0, 6.5),
        Vec3::new(17.0, 0.0, 8.0),
        Vec3::new(20.0, 0.0, 8.0),
        Vec3::new(25.0, 0.0, 0.0),
    ] {
        assert_eq!(planar.contains_world(point), flat.contains_world(point), "point {point}");
    }
}

#[test]
fn test_bounds_follow_transform() {
    let mut bounds = MinimapBounds::on_plane(PlaneBasis::default(), Vec2::new(4.0, 4.0));
    bounds.follow_transform(Vec3::new(100.0, 0.0, 100.0), 0.0);
    assert!(bounds.contains_world(Vec3::new(101.0, 0.0, 99.0)));
    assert!(!bounds.contains_world(Vec3::zero()));

    let mut bounds = MinimapBounds::default();
    bounds.follow_transform(Vec3::new(-8.0, 0.0, 2.0), 180.0);
    assert_eq!(bounds.center(), Vec2::new(-8.0, 2.0));
    assert!(approx_equal(bounds.rotation(), 180.0, EPSILON));
}

// ----------------------------------------------
// Size handles
// ----------------------------------------------

#[test]
fn test_handle_positions() {
    let rect = OrientedRect::new(Vec2::new(1.0, 1.0), Vec2::new(10.0, 4.0), 0.0);
    assert_eq!(handle_position(&rect, SizeHandle::Right), Vec2::new(6.0, 1.0));
    assert_eq!(handle_position(&rect, SizeHandle::Left), Vec2::new(-4.0, 1.0));
    assert_eq!(handle_position(&rect, SizeHandle::Up), Vec2::new(1.0, 3.0));
    assert_eq!(handle_position(&rect, SizeHandle::Down), Vec2::new(1.0, -1.0));

    let rotated = OrientedRect { rotation: 90.0, ..rect };
    assert!(handle_position(&rotated, SizeHandle::Right).approx_eq(Vec2::new(1.0, 6.0), EPSILON));
}

#[test]
fn test_size_drag_grows_driven_axis() {
    let mut rect = OrientedRect::new(Vec2::zero(), Vec2::new(10.0, 4.0), 0.0);

    let applied = apply_size_drag(&mut rect, SizeHandle::Right, Vec2::new(3.0, 7.0));
    assert_eq!(applied, Vec2::new(3.0, 0.0));
    assert_eq!(rect.size, Vec2::new(13.0, 4.0));

    // Dragging the left handle further left also grows the width.
    apply_size_drag(&mut rect, SizeHandle::Left, Vec2::new(-2.0, 0.0));
    assert_eq!(rect.size, Vec2::new(15.0, 4.0));

    apply_size_drag(&mut rect, SizeHandle::Down, Vec2::new(0.0, 1.0));
    assert_eq!(rect.size, Vec2::new(15.0, 3.0));
}

#[test]
fn test_size_drag_follows_rotation() {
    let mut rect = OrientedRect::new(Vec2::zero(), Vec2::new(10.0, 4.0), 90.0);
    // The right handle now points along +Y.
    apply_size_drag(&mut rect, SizeHandle::Right, Vec2::new(0.0, 2.0));
    assert!(rect.size.approx_eq(Vec2::new(12.0, 4.0), EPSILON));
}

#[test]
fn test_size_drag_locked_aspect() {
    let mut rect = OrientedRect::new(Vec2::zero(), Vec2::new(10.0, 5.0), 0.0)
        .with_locked_aspect_ratio(true);

    apply_size_drag(&mut rect, SizeHandle::Right, Vec2::new(4.0, 0.0));
    assert_eq!(rect.size, Vec2::new(14.0, 7.0));

    apply_size_drag(&mut rect, SizeHandle::Up, Vec2::new(0.0, 1.0));
    assert_eq!(rect.size, Vec2::new(16.0, 8.0));
}

#[test]
fn test_size_drag_clamps_to_one() {
    let mut rect = OrientedRect::new(Vec2::zero(), Vec2::new(3.0, 3.0), 0.0);
    let applied = apply_size_drag(&mut rect, SizeHandle::Up, Vec2::new(0.0, -50.0));
    assert_eq!(rect.size, Vec2::new(3.0, 1.0));
    assert_eq!(applied, Vec2::new(0.0, -2.0));
}

#[test]
fn test_handles_for_edges() {
    let all: Vec<_> = handles_for_edges(RectEdges::all()).collect();
    assert_eq!(all, [SizeHandle::Right, SizeHandle::Left, SizeHandle::Up, SizeHandle::Down]);

    let sides: Vec<_> = handles_for_edges(RectEdges::Left | RectEdges::Right).collect();
    assert_eq!(sides, [SizeHandle::Right, SizeHandle::Left]);

    assert_eq!(handles_for_edges(RectEdges::empty()).count(), 0);
    assert_eq!(SizeHandle::Up.to_string(), "Up");
    assert_eq!(SizeHandle::Down.edge().to_string(), "Bottom");
}

// ----------------------------------------------
// Properties
// ----------------------------------------------

proptest! {
    #[test]
    fn prop_contains_center_and_corners(
        cx in -1e5f32..1e5,
        cy in -1e5f32..1e5,
        w in 0.5f32..200.0,
        h in 0.5f32..200.0,
        rotation in -720.0f32..720.0,
    ) {
        let rect = OrientedRect::new(Vec2::new(cx, cy), Vec2::new(w, h), rotation);
        prop_assert!(rect.contains(rect.center));
        for corner in rect.corners() {
            prop_assert!(rect.contains(corner));
        }
    }

    #[test]
    fn prop_unrotated_min_max(
        cx in -500.0f32..500.0,
        cy in -500.0f32..500.0,
        w in 0.0f32..200.0,
        h in 0.0f32..200.0,
    ) {
        let rect = OrientedRect::new(Vec2::new(cx, cy), Vec2::new(w, h), 0.0);
        prop_assert!(rect.min().approx_eq(rect.center - rect.size / 2.0, EPSILON));
        prop_assert!(rect.max().approx_eq(rect.center + rect.size / 2.0, EPSILON));
    }
}
